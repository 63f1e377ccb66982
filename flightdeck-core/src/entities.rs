//! Core entity structures
//!
//! Row-shaped records for the three store entities. `FlightWithRoute` and
//! `WeatherReport` carry the airport joins the lookup tools return.

use crate::{FlightStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// A scheduled flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Flight {
    pub flight_code: String,
    pub airline: String,
    pub from_airport: String,
    pub to_airport: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub departure_time: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub arrival_time: Timestamp,
    pub status: FlightStatus,
    pub gate: Option<String>,
    /// Ticket price in VND.
    pub price: i64,
    pub delay_minutes: i32,
    pub delay_reason: Option<String>,
}

/// A flight joined with its endpoint airports.
///
/// `from_name`/`to_name` are only populated by the single-flight lookup;
/// list queries join the cities alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FlightWithRoute {
    #[serde(flatten)]
    pub flight: Flight,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    pub from_city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_name: Option<String>,
    pub to_city: String,
}

/// An airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Airport {
    pub airport_code: String,
    pub name: String,
    pub city: String,
    pub lounges: Vec<String>,
}

/// Current weather conditions at an airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Weather {
    pub airport_code: String,
    /// Degrees Celsius.
    pub temperature: i32,
    pub condition: String,
    /// Relative humidity, percent.
    pub humidity: i32,
    pub wind: String,
}

/// Weather joined with the airport's name and city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WeatherReport {
    #[serde(flatten)]
    pub weather: Weather,
    pub airport_name: String,
    pub city: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_flight() -> Flight {
        Flight {
            flight_code: "VN123".to_string(),
            airline: "Vietnam Airlines".to_string(),
            from_airport: "SGN".to_string(),
            to_airport: "HAN".to_string(),
            departure_time: chrono::Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
            arrival_time: chrono::Utc.with_ymd_and_hms(2025, 6, 1, 10, 10, 0).unwrap(),
            status: FlightStatus::OnTime,
            gate: Some("A12".to_string()),
            price: 1_500_000,
            delay_minutes: 0,
            delay_reason: None,
        }
    }

    #[test]
    fn test_flight_with_route_flattens() {
        let joined = FlightWithRoute {
            flight: sample_flight(),
            from_name: Some("Tan Son Nhat International".to_string()),
            from_city: "Ho Chi Minh City".to_string(),
            to_name: Some("Noi Bai International".to_string()),
            to_city: "Hanoi".to_string(),
        };

        let value = serde_json::to_value(&joined).unwrap();
        // Joined fields sit alongside the flight columns, not nested.
        assert_eq!(value["flight_code"], "VN123");
        assert_eq!(value["from_city"], "Ho Chi Minh City");
        assert_eq!(value["status"], "On Time");
        assert!(value.get("flight").is_none());
    }

    #[test]
    fn test_route_name_fields_omitted_when_absent() {
        let joined = FlightWithRoute {
            flight: sample_flight(),
            from_name: None,
            from_city: "Ho Chi Minh City".to_string(),
            to_name: None,
            to_city: "Hanoi".to_string(),
        };

        let value = serde_json::to_value(&joined).unwrap();
        assert!(value.get("from_name").is_none());
        assert!(value.get("to_name").is_none());
    }
}
