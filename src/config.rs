//! # Runtime configuration.
//!
//! [`Config`] is the validated input of one supervised run: the command
//! template, the placeholder token, the ordered rotation values, and the
//! overlap between starting a replacement process and retiring the one it
//! replaces.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use rotavisor::Config;
//!
//! let cfg = Config {
//!     command: "myserver 127.0.0.1:%alt".into(),
//!     placeholder: "%alt".into(),
//!     values: vec!["3000".into(), "3001".into()],
//!     overlap: Duration::from_secs(10),
//! };
//! assert!(cfg.validate().is_ok());
//! ```

use std::time::Duration;

use crate::error::ConfigError;

/// Default placeholder token substituted in the command template.
pub const DEFAULT_PLACEHOLDER: &str = "%alt";

/// Validated configuration for one supervised run.
///
/// The value list is fixed for the lifetime of the run; values may repeat
/// (two slots sharing a value then share one live-process registry entry)
/// and may be empty strings.
#[derive(Clone, Debug)]
pub struct Config {
    /// Command template containing the placeholder token.
    pub command: String,
    /// Placeholder token to substitute with the active rotation value.
    pub placeholder: String,
    /// Ordered rotation values, length >= 1.
    pub values: Vec<String>,
    /// Delay between starting the next process and retiring the previous one.
    pub overlap: Duration,
}

impl Config {
    /// Checks the structural invariants the coordinator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command.trim().is_empty() {
            return Err(ConfigError::EmptyCommand);
        }
        if self.values.is_empty() {
            return Err(ConfigError::EmptyValues);
        }
        Ok(())
    }

    /// One-line summary used in the `Starting` event.
    pub fn summary(&self) -> String {
        format!(
            "command={:?} placeholder={:?} values={:?} overlap={:?}",
            self.command, self.placeholder, self.values, self.overlap
        )
    }
}

/// Parses a duration string with unit suffixes, e.g. `"300ms"`, `"5s"`,
/// `"1m30s"`, `"2h"`.
///
/// Accepted units: `ns`, `us`, `µs`, `ms`, `s`, `m`, `h`. A bare `"0"` is
/// valid; any other bare number is not (a unit is required). Negative
/// durations are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidOverlap(input.to_string());

    let s = input.trim();
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() || s.starts_with('-') || s.starts_with('+') {
        return Err(invalid());
    }

    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .ok_or_else(invalid)?;
        if digits == 0 {
            return Err(invalid());
        }
        let (number, tail) = rest.split_at(digits);
        let number: f64 = number.parse().map_err(|_| invalid())?;
        let (unit_secs, tail) = split_unit(tail).ok_or_else(invalid)?;
        total += Duration::try_from_secs_f64(number * unit_secs).map_err(|_| invalid())?;
        rest = tail;
    }
    Ok(total)
}

/// Strips a recognized unit prefix and returns its length in seconds.
fn split_unit(s: &str) -> Option<(f64, &str)> {
    const UNITS: [(&str, f64); 7] = [
        ("ns", 1e-9),
        ("us", 1e-6),
        ("µs", 1e-6),
        ("ms", 1e-3),
        ("s", 1.0),
        ("m", 60.0),
        ("h", 3600.0),
    ];
    UNITS
        .iter()
        .find_map(|(unit, secs)| s.strip_prefix(unit).map(|rest| (*secs, rest)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zero_without_unit() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_simple_units() {
        assert_eq!(parse_duration("123ms").unwrap(), Duration::from_millis(123));
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(
            parse_duration("1s500ms").unwrap(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_parse_fractional() {
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_rejects_bare_number() {
        assert!(parse_duration("5").is_err());
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(parse_duration("-5s").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("overlap").is_err());
        assert!(parse_duration("5parsecs").is_err());
        assert!(parse_duration("s5").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let cfg = Config {
            command: "cmd %alt".into(),
            placeholder: "%alt".into(),
            values: vec![],
            overlap: Duration::ZERO,
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyValues)));
    }

    #[test]
    fn test_validate_rejects_empty_command() {
        let cfg = Config {
            command: "  ".into(),
            placeholder: "%alt".into(),
            values: vec!["a".into()],
            overlap: Duration::ZERO,
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyCommand)));
    }

    #[test]
    fn test_validate_accepts_odd_values() {
        // The original accepts empty strings and strings with spaces as values.
        let cfg = Config {
            command: "cmd %alt".into(),
            placeholder: "%alt".into(),
            values: vec!["val0".into(), "val%1".into(), "val 2".into(), "".into()],
            overlap: Duration::ZERO,
        };
        assert!(cfg.validate().is_ok());
    }
}
