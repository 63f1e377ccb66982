//! Tool registry schema tests
//!
//! The parameter declarations surfaced to the model are standard JSON
//! Schema; verify each one compiles and constrains arguments the way the
//! executor expects.

use flightdeck_api::available_tools;
use serde_json::json;

#[test]
fn every_tool_schema_compiles() {
    for tool in available_tools() {
        jsonschema::validator_for(&tool.parameters)
            .unwrap_or_else(|e| panic!("{}: invalid schema: {}", tool.name, e));
    }
}

#[test]
fn search_flight_schema_requires_flight_code() {
    let tool = available_tools()
        .into_iter()
        .find(|t| t.name == "search_flight")
        .unwrap();
    let validator = jsonschema::validator_for(&tool.parameters).unwrap();

    assert!(validator.is_valid(&json!({"flight_code": "VN123"})));
    assert!(!validator.is_valid(&json!({})));
}

#[test]
fn calculate_compensation_schema_requires_both_numbers() {
    let tool = available_tools()
        .into_iter()
        .find(|t| t.name == "calculate_compensation")
        .unwrap();
    let validator = jsonschema::validator_for(&tool.parameters).unwrap();

    assert!(validator.is_valid(&json!({"delay_minutes": 180, "ticket_price": 2_000_000})));
    assert!(!validator.is_valid(&json!({"delay_minutes": 180})));
    assert!(!validator.is_valid(&json!({"delay_minutes": "late", "ticket_price": 100})));
}

#[test]
fn list_flights_schema_accepts_empty_arguments() {
    let tool = available_tools()
        .into_iter()
        .find(|t| t.name == "list_flights")
        .unwrap();
    let validator = jsonschema::validator_for(&tool.parameters).unwrap();

    assert!(validator.is_valid(&json!({})));
    assert!(validator.is_valid(&json!({"from_airport": "SGN"})));
    assert!(validator.is_valid(&json!({"from_airport": "SGN", "to_airport": "HAN"})));
}

#[test]
fn find_alternatives_schema_requires_both_endpoints() {
    let tool = available_tools()
        .into_iter()
        .find(|t| t.name == "find_alternatives")
        .unwrap();
    let validator = jsonschema::validator_for(&tool.parameters).unwrap();

    assert!(validator.is_valid(&json!({"from_airport": "SGN", "to_airport": "HAN"})));
    assert!(!validator.is_valid(&json!({"to_airport": "HAN"})));
}
