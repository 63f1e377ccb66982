//! Enum types for Flightdeck entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// FLIGHT STATUS
// ============================================================================

/// Operational status of a flight.
///
/// The wire and database representation uses the human-readable form
/// ("On Time", not "OnTime"), matching what the chat model and the UI
/// tables display verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Cancelled,
    Boarding,
    Departed,
    Landed,
}

impl FlightStatus {
    /// The database/wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::Departed => "Departed",
            FlightStatus::Landed => "Landed",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "On Time" => Ok(FlightStatus::OnTime),
            "Delayed" => Ok(FlightStatus::Delayed),
            "Cancelled" => Ok(FlightStatus::Cancelled),
            "Boarding" => Ok(FlightStatus::Boarding),
            "Departed" => Ok(FlightStatus::Departed),
            "Landed" => Ok(FlightStatus::Landed),
            other => Err(format!("Unknown flight status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&FlightStatus::OnTime).unwrap();
        assert_eq!(json, "\"On Time\"");

        let parsed: FlightStatus = serde_json::from_str("\"Cancelled\"").unwrap();
        assert_eq!(parsed, FlightStatus::Cancelled);
    }

    #[test]
    fn test_status_roundtrip_from_str() {
        for status in [
            FlightStatus::OnTime,
            FlightStatus::Delayed,
            FlightStatus::Cancelled,
            FlightStatus::Boarding,
            FlightStatus::Departed,
            FlightStatus::Landed,
        ] {
            assert_eq!(status.as_str().parse::<FlightStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_unknown_string_rejected() {
        assert!("Diverted".parse::<FlightStatus>().is_err());
    }
}
