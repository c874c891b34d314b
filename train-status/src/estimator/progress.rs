//! Trip progress policies.

use crate::domain::{StopId, StopRecord};

use super::config::ProgressPolicy;

/// Compute trip progress as a percentage in `0..=100`.
///
/// `last_seen` is the row index of the last stop with an actual time.
/// Returns `None` only for `ProgressPolicy::Disabled`.
pub fn compute_progress(
    stops: &[StopRecord],
    policy: &ProgressPolicy,
    target: &StopId,
    last_seen: Option<usize>,
) -> Option<u8> {
    match policy {
        ProgressPolicy::Disabled => None,
        ProgressPolicy::StopCount => Some(stop_count_progress(stops, target)),
        ProgressPolicy::FromOrigin(origin) => {
            Some(origin_progress(stops, origin, target, last_seen))
        }
    }
}

/// Position of the last reported row between origin and target.
fn origin_progress(
    stops: &[StopRecord],
    origin: &StopId,
    target: &StopId,
    last_seen: Option<usize>,
) -> u8 {
    let origin_idx = stops.iter().position(|r| r.is_at(origin));
    let target_idx = stops.iter().position(|r| r.is_at(target));

    let (Some(o), Some(t), Some(l)) = (origin_idx, target_idx, last_seen) else {
        return 0;
    };
    if o == t {
        return 0;
    }

    let span = t as f64 - o as f64;
    let done = l as f64 - o as f64;
    clamp_percent(100.0 * done / span)
}

/// Share of rows reported so far; 100 once the target has been reached.
fn stop_count_progress(stops: &[StopRecord], target: &StopId) -> u8 {
    if stops.iter().any(|r| r.is_at(target) && r.has_actual()) {
        return 100;
    }
    if stops.is_empty() {
        return 0;
    }

    let reported = stops.iter().filter(|r| r.has_actual()).count();
    clamp_percent(100.0 * reported as f64 / stops.len() as f64)
}

fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: &str = "2024-03-01 10:00:00";

    fn id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn seen(s: &str) -> StopRecord {
        StopRecord::new(id(s)).with_actual_departure(T)
    }

    fn unseen(s: &str) -> StopRecord {
        StopRecord::new(id(s)).with_scheduled_arrival(T)
    }

    #[test]
    fn disabled_policy() {
        let stops = vec![seen("A")];
        assert_eq!(
            compute_progress(&stops, &ProgressPolicy::Disabled, &id("A"), Some(0)),
            None
        );
    }

    #[test]
    fn origin_progress_midway() {
        let stops = vec![seen("A"), seen("B"), unseen("C"), unseen("D"), unseen("E")];
        let policy = ProgressPolicy::FromOrigin(id("A"));
        // last seen B (1) between A (0) and E (4)
        assert_eq!(compute_progress(&stops, &policy, &id("E"), Some(1)), Some(25));
    }

    #[test]
    fn origin_progress_endpoints() {
        let stops = vec![seen("A"), unseen("B"), unseen("C")];
        let policy = ProgressPolicy::FromOrigin(id("A"));
        assert_eq!(compute_progress(&stops, &policy, &id("C"), Some(0)), Some(0));
        assert_eq!(compute_progress(&stops, &policy, &id("C"), Some(2)), Some(100));
    }

    #[test]
    fn origin_progress_clamps() {
        let stops = vec![seen("X"), seen("A"), seen("B"), seen("C"), seen("Y")];
        let policy = ProgressPolicy::FromOrigin(id("A"));
        // Seen before origin
        assert_eq!(compute_progress(&stops, &policy, &id("C"), Some(0)), Some(0));
        // Seen past the target
        assert_eq!(compute_progress(&stops, &policy, &id("C"), Some(4)), Some(100));
    }

    #[test]
    fn origin_progress_degenerate() {
        let stops = vec![seen("A"), seen("B")];
        // Origin not on the trip
        let policy = ProgressPolicy::FromOrigin(id("Z"));
        assert_eq!(compute_progress(&stops, &policy, &id("B"), Some(1)), Some(0));
        // Target not on the trip
        let policy = ProgressPolicy::FromOrigin(id("A"));
        assert_eq!(compute_progress(&stops, &policy, &id("Z"), Some(1)), Some(0));
        // Zero span
        assert_eq!(compute_progress(&stops, &policy, &id("A"), Some(1)), Some(0));
        // Nothing seen
        assert_eq!(compute_progress(&stops, &policy, &id("B"), None), Some(0));
    }

    #[test]
    fn stop_count_share() {
        let stops = vec![seen("A"), unseen("B"), unseen("C"), unseen("D")];
        let policy = ProgressPolicy::StopCount;
        assert_eq!(compute_progress(&stops, &policy, &id("D"), Some(0)), Some(25));
    }

    #[test]
    fn stop_count_rounds() {
        let stops = vec![seen("A"), unseen("B"), unseen("C")];
        let policy = ProgressPolicy::StopCount;
        assert_eq!(compute_progress(&stops, &policy, &id("C"), Some(0)), Some(33));
    }

    #[test]
    fn stop_count_forced_full_at_target() {
        let stops = vec![unseen("A"), seen("B"), unseen("C")];
        let policy = ProgressPolicy::StopCount;
        assert_eq!(compute_progress(&stops, &policy, &id("B"), Some(1)), Some(100));
    }

    #[test]
    fn stop_count_empty() {
        let policy = ProgressPolicy::StopCount;
        assert_eq!(compute_progress(&[], &policy, &id("B"), None), Some(0));
    }

    #[test]
    fn clamp_percent_bounds() {
        assert_eq!(clamp_percent(-12.0), 0);
        assert_eq!(clamp_percent(140.0), 100);
        assert_eq!(clamp_percent(49.5), 50);
        assert_eq!(clamp_percent(f64::NAN), 0);
    }
}
