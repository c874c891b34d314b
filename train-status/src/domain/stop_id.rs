//! Station identifier types.

use std::fmt;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop identifier: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A stable station identifier as used by the stop-history feed.
///
/// Feed identifiers look like `-SR70ST-333120`; the static station table
/// uses the bare numeric code (`333120`). Both forms are valid `StopId`s.
/// Surrounding whitespace is trimmed, and the result is never empty.
///
/// # Examples
///
/// ```
/// use train_status::domain::StopId;
///
/// let id = StopId::parse("-SR70ST-333120").unwrap();
/// assert_eq!(id.as_str(), "-SR70ST-333120");
/// assert_eq!(id.numeric_code(), Some("333120"));
///
/// assert!(StopId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidStopId {
                reason: "must not contain control characters",
            });
        }

        Ok(StopId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the trailing run of ASCII digits, if any.
    ///
    /// Feed identifiers carry the station's numeric code as a suffix, which
    /// is how the static station table is keyed.
    pub fn numeric_code(&self) -> Option<&str> {
        let digits = self
            .0
            .bytes()
            .rev()
            .take_while(|b| b.is_ascii_digit())
            .count();

        if digits == 0 {
            None
        } else {
            Some(&self.0[self.0.len() - digits..])
        }
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_feed_identifiers() {
        assert!(StopId::parse("-SR70ST-333120").is_ok());
        assert!(StopId::parse("33605").is_ok());
        assert!(StopId::parse("-SR70ST-34534").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let id = StopId::parse("  33605 \n").unwrap();
        assert_eq!(id.as_str(), "33605");
    }

    #[test]
    fn reject_empty() {
        assert!(StopId::parse("").is_err());
        assert!(StopId::parse("   ").is_err());
    }

    #[test]
    fn reject_control_characters() {
        assert!(StopId::parse("333\u{0}120").is_err());
    }

    #[test]
    fn numeric_code_suffix() {
        let id = StopId::parse("-SR70ST-333120").unwrap();
        assert_eq!(id.numeric_code(), Some("333120"));

        let id = StopId::parse("33605").unwrap();
        assert_eq!(id.numeric_code(), Some("33605"));

        let id = StopId::parse("OLOMOUC").unwrap();
        assert_eq!(id.numeric_code(), None);
    }

    #[test]
    fn display_and_debug() {
        let id = StopId::parse("33605").unwrap();
        assert_eq!(format!("{}", id), "33605");
        assert_eq!(format!("{:?}", id), "StopId(33605)");
    }

    #[test]
    fn equality_ignores_padding() {
        let a = StopId::parse("33605").unwrap();
        let b = StopId::parse(" 33605").unwrap();
        let c = StopId::parse("33606").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Parsing is idempotent: re-parsing the output yields the same id
        #[test]
        fn reparse_is_stable(s in "[ ]{0,2}[-A-Z0-9]{1,16}[ ]{0,2}") {
            let id = StopId::parse(&s).unwrap();
            let again = StopId::parse(id.as_str()).unwrap();
            prop_assert_eq!(id, again);
        }

        /// The numeric code is always a suffix made of digits only
        #[test]
        fn numeric_code_is_digit_suffix(prefix in "-SR70ST-|[A-Z]{0,3}", code in "[0-9]{1,7}") {
            let id = StopId::parse(&format!("{prefix}{code}")).unwrap();
            prop_assert_eq!(id.numeric_code(), Some(code.as_str()));
        }
    }
}
