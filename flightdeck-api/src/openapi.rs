//! OpenAPI Document
//!
//! Aggregates the annotated routes and schemas into the document served
//! at /openapi.json.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::chat::{ChatRequestBody, ChatResponseBody};
use crate::routes::health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus};
use crate::routes::tools::DirectToolResponse;
use flightdeck_core::{
    ActivityLogEntry, ActivityType, AgentLabel, Airport, ChatMessage, ChatRole, Compensation,
    Flight, FlightStatus, FlightWithRoute, TokenUsage, ToolCallRequest, Weather, WeatherReport,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Flightdeck API",
        description = "Conversational flight-information assistant: chat orchestration, \
                       direct tool invocation, and flight/airport/weather data endpoints.",
        license(name = "MIT"),
    ),
    paths(
        crate::routes::chat::chat,
        crate::routes::tools::call_tool,
        crate::routes::flights::list_flights,
        crate::routes::flights::get_flight,
        crate::routes::airports::list_airports,
        crate::routes::weather::list_weather,
        crate::routes::health::ping,
        crate::routes::health::liveness,
        crate::routes::health::readiness,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        ChatRequestBody,
        ChatResponseBody,
        DirectToolResponse,
        ActivityLogEntry,
        ActivityType,
        AgentLabel,
        ChatMessage,
        ChatRole,
        ToolCallRequest,
        TokenUsage,
        Flight,
        FlightWithRoute,
        FlightStatus,
        Airport,
        Weather,
        WeatherReport,
        Compensation,
        HealthResponse,
        HealthStatus,
        HealthDetails,
        ComponentHealth,
    )),
    tags(
        (name = "Chat", description = "Orchestrated chat exchanges"),
        (name = "Tools", description = "Direct tool invocation"),
        (name = "Flights", description = "Flight data"),
        (name = "Airports", description = "Airport data"),
        (name = "Weather", description = "Weather data"),
        (name = "Health", description = "Health checks"),
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/api/chat"));
        assert!(json.contains("/api/tools/{tool}"));
        assert!(json.contains("/health/ready"));
    }
}
