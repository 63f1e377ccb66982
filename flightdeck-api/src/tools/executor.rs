//! Tool executor
//!
//! Executes one named tool against the backing store. Argument validation
//! happens before any connection is acquired; lookups normalize their key
//! to uppercase. Unknown tool names yield a sentinel payload instead of
//! an error so the orchestration loop always has something to feed back
//! to the model.

use crate::db::DbClient;
use crate::error::ApiError;
use flightdeck_core::{calculate_compensation, ToolError};
use serde_json::{json, Value as JsonValue};

/// Database-backed tool executor.
#[derive(Clone)]
pub struct ToolExecutor {
    db: DbClient,
}

impl ToolExecutor {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }

    /// Execute one tool call.
    pub async fn execute(&self, name: &str, args: &JsonValue) -> Result<JsonValue, ToolError> {
        match name {
            "search_flight" => {
                let code = require_str(args, "flight_code")?;
                let flight = self
                    .db
                    .flight_by_code(&code)
                    .await
                    .map_err(db_failure)?
                    .ok_or_else(|| ToolError::not_found("Flight"))?;
                to_payload(&flight)
            }

            "get_weather" => {
                let code = require_str(args, "airport_code")?;
                let report = self
                    .db
                    .weather_by_airport(&code)
                    .await
                    .map_err(db_failure)?
                    .ok_or_else(|| ToolError::not_found("Airport"))?;
                to_payload(&report)
            }

            "get_airport_info" => {
                // Absence is a data value here: a missing or unknown code
                // returns a marker object rather than failing the call.
                let code = optional_str(args, "airport_code").unwrap_or_default();
                match self.db.airport_by_code(&code).await.map_err(db_failure)? {
                    Some(airport) => to_payload(&airport),
                    None => Ok(json!({ "error": "Airport not found" })),
                }
            }

            "list_flights" => {
                let from = optional_str(args, "from_airport");
                let to = optional_str(args, "to_airport");
                let flights = self
                    .db
                    .flights_list(from.as_deref(), to.as_deref())
                    .await
                    .map_err(db_failure)?;
                to_payload(&flights)
            }

            "find_alternatives" => {
                let from = require_str(args, "from_airport")?;
                let to = require_str(args, "to_airport")?;
                let alternatives = self
                    .db
                    .alternatives(&from, &to)
                    .await
                    .map_err(db_failure)?;
                Ok(json!({ "alternatives": alternatives }))
            }

            "calculate_compensation" => {
                let delay_minutes = require_number(args, "delay_minutes")?;
                let ticket_price = require_number(args, "ticket_price")?;
                let compensation = calculate_compensation(delay_minutes, ticket_price)?;
                to_payload(&compensation)
            }

            unknown => Ok(json!({ "error": format!("Unknown tool: {}", unknown) })),
        }
    }
}

#[async_trait::async_trait]
impl super::ToolDispatcher for ToolExecutor {
    async fn dispatch(&self, name: &str, args: &JsonValue) -> Result<JsonValue, ToolError> {
        self.execute(name, args).await
    }
}

impl std::fmt::Debug for ToolExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolExecutor")
            .field("pool_size", &self.db.pool_size())
            .finish()
    }
}

// ============================================================================
// ARGUMENT HELPERS
// ============================================================================

fn require_str(args: &JsonValue, field: &str) -> Result<String, ToolError> {
    match args.get(field).and_then(JsonValue::as_str) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ToolError::missing(field)),
    }
}

fn optional_str(args: &JsonValue, field: &str) -> Option<String> {
    args.get(field)
        .and_then(JsonValue::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn require_number(args: &JsonValue, field: &str) -> Result<f64, ToolError> {
    match args.get(field) {
        None | Some(JsonValue::Null) => Err(ToolError::missing(field)),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| ToolError::invalid(field, "must be a number")),
    }
}

fn to_payload<T: serde::Serialize>(value: &T) -> Result<JsonValue, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::Database {
        reason: format!("Failed to serialize tool result: {}", e),
    })
}

fn db_failure(err: ApiError) -> ToolError {
    ToolError::Database {
        reason: err.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConfig;

    // Pool construction is lazy, so argument validation and the pure
    // tools are testable without a running database.
    fn executor() -> ToolExecutor {
        let db = DbClient::from_config(&DbConfig::default()).expect("lazy pool");
        ToolExecutor::new(db)
    }

    #[tokio::test]
    async fn test_search_flight_missing_code() {
        let err = executor()
            .execute("search_flight", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::missing("flight_code"));
    }

    #[tokio::test]
    async fn test_find_alternatives_requires_both_endpoints() {
        let err = executor()
            .execute("find_alternatives", &json!({"from_airport": "SGN"}))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::missing("to_airport"));
    }

    #[tokio::test]
    async fn test_compensation_severe_delay() {
        let result = executor()
            .execute(
                "calculate_compensation",
                &json!({"delay_minutes": 180, "ticket_price": 2_000_000}),
            )
            .await
            .unwrap();
        assert_eq!(result["eligible"], true);
        assert_eq!(result["rate"], "50%");
        assert_eq!(result["compensation_amount"], 1_000_000);
    }

    #[tokio::test]
    async fn test_compensation_invalid_arguments() {
        let err = executor()
            .execute(
                "calculate_compensation",
                &json!({"delay_minutes": -10, "ticket_price": 500_000}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));

        let err = executor()
            .execute(
                "calculate_compensation",
                &json!({"delay_minutes": 120, "ticket_price": 0}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_compensation_missing_arguments() {
        let err = executor()
            .execute("calculate_compensation", &json!({"delay_minutes": 120}))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::missing("ticket_price"));
    }

    #[tokio::test]
    async fn test_compensation_non_numeric_argument() {
        let err = executor()
            .execute(
                "calculate_compensation",
                &json!({"delay_minutes": "late", "ticket_price": 100}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_unknown_tool_yields_sentinel_payload() {
        let result = executor()
            .execute("book_flight", &json!({}))
            .await
            .unwrap();
        assert_eq!(result["error"], "Unknown tool: book_flight");
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod db_tests {
    use super::*;
    use crate::db::DbConfig;

    fn executor() -> ToolExecutor {
        let db = DbClient::from_config(&DbConfig::from_env()).expect("pool");
        ToolExecutor::new(db)
    }

    #[tokio::test]
    async fn test_search_flight_normalizes_case() {
        let result = executor()
            .execute("search_flight", &json!({"flight_code": "vn123"}))
            .await
            .unwrap();
        assert_eq!(result["flight_code"], "VN123");
    }

    #[tokio::test]
    async fn test_search_flight_unknown_code_not_found() {
        let err = executor()
            .execute("search_flight", &json!({"flight_code": "INVALID999"}))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::not_found("Flight"));
    }

    #[tokio::test]
    async fn test_airport_info_absence_is_a_value() {
        let result = executor()
            .execute("get_airport_info", &json!({"airport_code": "ZZZ"}))
            .await
            .unwrap();
        assert_eq!(result["error"], "Airport not found");
    }

    #[tokio::test]
    async fn test_alternatives_excludes_cancelled() {
        let result = executor()
            .execute(
                "find_alternatives",
                &json!({"from_airport": "SGN", "to_airport": "HAN"}),
            )
            .await
            .unwrap();
        let alternatives = result["alternatives"].as_array().unwrap();
        for flight in alternatives {
            assert_ne!(flight["status"], "Cancelled");
        }
    }

    #[tokio::test]
    async fn test_list_flights_empty_filter_is_valid() {
        let result = executor()
            .execute(
                "list_flights",
                &json!({"from_airport": "VDO", "to_airport": "VDO"}),
            )
            .await
            .unwrap();
        assert!(result.as_array().unwrap().is_empty() || result.is_array());
    }
}
