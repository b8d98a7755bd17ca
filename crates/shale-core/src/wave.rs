//! Wave-field kinds for locating a response within the layered medium.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kinematic interpretation of a response at a point in the medium.
///
/// Constructed from either the canonical name or a compatible symbolic alias
/// (`"incoming_only"` for [`Incoming`]); normalization happens once, at
/// parse time.
///
/// [`Incoming`]: WaveField::Incoming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveField {
    /// Upward-propagating incoming motion only.
    #[serde(alias = "incoming_only")]
    Incoming,
    /// Free-surface (outcrop) motion.
    Outcrop,
    /// In-medium motion.
    Within,
}

impl fmt::Display for WaveField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaveField::Incoming => "incoming",
            WaveField::Outcrop => "outcrop",
            WaveField::Within => "within",
        };
        f.write_str(name)
    }
}

impl FromStr for WaveField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incoming" | "incoming_only" => Ok(WaveField::Incoming),
            "outcrop" => Ok(WaveField::Outcrop),
            "within" => Ok(WaveField::Within),
            other => Err(Error::PreconditionViolation(format!(
                "unknown wave field: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        assert_eq!("incoming".parse::<WaveField>().unwrap(), WaveField::Incoming);
        assert_eq!("outcrop".parse::<WaveField>().unwrap(), WaveField::Outcrop);
        assert_eq!("within".parse::<WaveField>().unwrap(), WaveField::Within);
    }

    #[test]
    fn parses_symbolic_alias() {
        assert_eq!(
            "incoming_only".parse::<WaveField>().unwrap(),
            WaveField::Incoming
        );
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("sideways".parse::<WaveField>().is_err());
    }

    #[test]
    fn serde_round_trip_with_alias() {
        let json = serde_json::to_string(&WaveField::Incoming).unwrap();
        assert_eq!(json, "\"incoming\"");
        let parsed: WaveField = serde_json::from_str("\"incoming_only\"").unwrap();
        assert_eq!(parsed, WaveField::Incoming);
    }

    #[test]
    fn display_matches_canonical_name() {
        assert_eq!(WaveField::Within.to_string(), "within");
    }
}
