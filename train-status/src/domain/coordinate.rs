//! Geographic coordinate parsing.
//!
//! The station table writes coordinates as `<hemisphere><degrees>°` with a
//! comma decimal separator, e.g. `N49,724049°` or `E17,165214°`. These are
//! normalized to signed decimal degrees (south and west negative).

/// Which axis a coordinate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn max_degrees(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    /// Sign for a hemisphere letter, or `None` if the letter does not
    /// belong to this axis.
    fn hemisphere_sign(self, letter: char) -> Option<f64> {
        match (self, letter.to_ascii_uppercase()) {
            (Axis::Latitude, 'N') | (Axis::Longitude, 'E') => Some(1.0),
            (Axis::Latitude, 'S') | (Axis::Longitude, 'W') => Some(-1.0),
            _ => None,
        }
    }
}

/// Parse a latitude such as `N49,724049°`.
///
/// Malformed input yields `None`, never zero.
///
/// # Examples
///
/// ```
/// use train_status::domain::parse_latitude;
///
/// assert_eq!(parse_latitude("N49,724049°"), Some(49.724049));
/// assert_eq!(parse_latitude("S33,5°"), Some(-33.5));
/// assert_eq!(parse_latitude("E17,1°"), None);
/// assert_eq!(parse_latitude("N°"), None);
/// ```
pub fn parse_latitude(s: &str) -> Option<f64> {
    parse_coordinate(s, Axis::Latitude)
}

/// Parse a longitude such as `E17,165214°`.
///
/// Malformed input yields `None`, never zero.
pub fn parse_longitude(s: &str) -> Option<f64> {
    parse_coordinate(s, Axis::Longitude)
}

/// Parse a coordinate for the given axis.
///
/// Accepts either a leading hemisphere letter or a leading minus sign (not
/// both), a decimal number using either `,` or `.` as separator, and an
/// optional trailing degree sign.
pub fn parse_coordinate(s: &str, axis: Axis) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix('°').unwrap_or(s).trim_end();

    let mut chars = s.chars();
    let first = chars.next()?;
    let (sign, number) = if first.is_ascii_alphabetic() {
        (axis.hemisphere_sign(first)?, chars.as_str().trim_start())
    } else if first == '-' {
        (-1.0, chars.as_str())
    } else {
        (1.0, s)
    };

    // Unsigned decimal digits only; the sign was taken above
    if number.is_empty()
        || !number
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.')
    {
        return None;
    }

    let degrees: f64 = number.replace(',', ".").parse().ok()?;
    let value = sign * degrees;

    if !value.is_finite() || value.abs() > axis.max_degrees() {
        return None;
    }

    Some(value)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Formatting a latitude in table style and parsing it recovers the value
        #[test]
        fn table_style_latitude(deg in 0u32..90, frac in 0u32..1_000_000, south in any::<bool>()) {
            let letter = if south { 'S' } else { 'N' };
            let raw = format!("{letter}{deg},{frac:06}°");
            let expected: f64 = format!("{deg}.{frac:06}").parse().unwrap();
            let parsed = parse_latitude(&raw).unwrap();
            let signed = if south { -expected } else { expected };
            prop_assert!((parsed - signed).abs() < 1e-9);
        }

        /// Parsing never panics and never yields an out-of-range value
        #[test]
        fn never_out_of_range(s in "\\PC{0,12}") {
            if let Some(v) = parse_longitude(&s) {
                prop_assert!(v.is_finite());
                prop_assert!(v.abs() <= 180.0);
            }
        }
    }
}
