//! Tool registry
//!
//! The fixed catalogue of tools surfaced to the chat model. Constructed
//! once at startup and never mutated; descriptions are what the model
//! sees when deciding relevance, parameter schemas are standard JSON
//! Schema objects.

use flightdeck_core::ToolSpec;

/// The ordered list of tool specifications offered on every model call.
pub fn available_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "search_flight".to_string(),
            description: "Search for flight information by flight code. Returns flight \
                          details including status, times, gate, and price."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "flight_code": {
                        "type": "string",
                        "description": "The flight code, e.g., VN123, VJ789, QH101"
                    }
                },
                "required": ["flight_code"]
            }),
        },
        ToolSpec {
            name: "get_weather".to_string(),
            description: "Get current weather conditions at an airport".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "airport_code": {
                        "type": "string",
                        "description": "Airport code: SGN, HAN, DAD, PQC, CXR, VDO"
                    }
                },
                "required": ["airport_code"]
            }),
        },
        ToolSpec {
            name: "get_airport_info".to_string(),
            description: "Get airport details including name, city, and available lounges"
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "airport_code": {
                        "type": "string",
                        "description": "Airport code"
                    }
                }
            }),
        },
        ToolSpec {
            name: "list_flights".to_string(),
            description: "List all flights, optionally filtered by departure and/or arrival \
                          airport"
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "from_airport": {
                        "type": "string",
                        "description": "Departure airport code (optional)"
                    },
                    "to_airport": {
                        "type": "string",
                        "description": "Arrival airport code (optional)"
                    }
                }
            }),
        },
        ToolSpec {
            name: "find_alternatives".to_string(),
            description: "Find alternative flights for a specific route".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "from_airport": { "type": "string", "description": "Departure airport code" },
                    "to_airport": { "type": "string", "description": "Arrival airport code" }
                },
                "required": ["from_airport", "to_airport"]
            }),
        },
        ToolSpec {
            name: "calculate_compensation".to_string(),
            description: "Calculate compensation amount for delayed or cancelled flights \
                          based on delay duration and ticket price"
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "delay_minutes": {
                        "type": "number",
                        "description": "Delay duration in minutes (use 999 for cancelled)"
                    },
                    "ticket_price": {
                        "type": "number",
                        "description": "Original ticket price in VND"
                    }
                },
                "required": ["delay_minutes", "ticket_price"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_unique() {
        let tools = available_tools();
        let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), tools.len());
    }

    #[test]
    fn test_catalogue_is_stable() {
        let names: Vec<String> = available_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "search_flight",
                "get_weather",
                "get_airport_info",
                "list_flights",
                "find_alternatives",
                "calculate_compensation",
            ]
        );
    }

    #[test]
    fn test_descriptions_non_empty() {
        for tool in available_tools() {
            assert!(!tool.description.trim().is_empty(), "{}", tool.name);
        }
    }

    #[test]
    fn test_every_schema_is_an_object_schema() {
        for tool in available_tools() {
            assert_eq!(tool.parameters["type"], "object", "{}", tool.name);
            assert!(tool.parameters["properties"].is_object(), "{}", tool.name);
        }
    }
}
