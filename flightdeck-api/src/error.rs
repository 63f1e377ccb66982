//! Error Types for the Flightdeck API
//!
//! This module defines error handling for the API layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! All errors are serialized as JSON with appropriate HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flightdeck_core::{LlmError, ToolError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code and represents
/// a category of error that can occur during API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request validation failed
    ValidationFailed,

    /// Request contains invalid input data
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Requested entity does not exist
    EntityNotFound,

    /// Requested flight does not exist
    FlightNotFound,

    /// Requested airport does not exist
    AirportNotFound,

    // ========================================================================
    // Server Errors (5xx)
    // ========================================================================
    /// Internal server error
    InternalError,

    /// Database operation failed
    DatabaseError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// Database connection pool exhausted
    ConnectionPoolExhausted,

    /// Operation timed out
    Timeout,

    /// The chat-completion provider failed
    UpstreamFailure,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Validation errors
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidInput
            | ErrorCode::MissingField => StatusCode::BAD_REQUEST,

            // Not found errors
            ErrorCode::EntityNotFound
            | ErrorCode::FlightNotFound
            | ErrorCode::AirportNotFound => StatusCode::NOT_FOUND,

            // Server errors
            ErrorCode::ServiceUnavailable
            | ErrorCode::ConnectionPoolExhausted => StatusCode::SERVICE_UNAVAILABLE,

            ErrorCode::Timeout => StatusCode::GATEWAY_TIMEOUT,

            ErrorCode::UpstreamFailure => StatusCode::BAD_GATEWAY,

            ErrorCode::InternalError
            | ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::MissingField => "Required field is missing",
            ErrorCode::EntityNotFound => "Entity not found",
            ErrorCode::FlightNotFound => "Flight not found",
            ErrorCode::AirportNotFound => "Airport not found",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database operation failed",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
            ErrorCode::ConnectionPoolExhausted => "Connection pool exhausted",
            ErrorCode::Timeout => "Operation timed out",
            ErrorCode::UpstreamFailure => "Chat provider request failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
///
/// This type is returned by all API endpoints when an error occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[derive(utoipa::ToSchema)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create a ValidationFailed error.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a MissingField error.
    pub fn missing_field(field: &str) -> Self {
        Self::new(ErrorCode::MissingField, format!("Missing {}", field))
    }

    /// Create a FlightNotFound error.
    pub fn flight_not_found(code: &str) -> Self {
        Self::new(ErrorCode::FlightNotFound, format!("Flight {} not found", code))
    }

    /// Create an AirportNotFound error.
    pub fn airport_not_found(code: &str) -> Self {
        Self::new(ErrorCode::AirportNotFound, format!("Airport {} not found", code))
    }

    /// Create a generic not found error with custom message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EntityNotFound, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a DatabaseError.
    pub fn database_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Create a ServiceUnavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Create a ConnectionPoolExhausted error.
    pub fn connection_pool_exhausted() -> Self {
        Self::from_code(ErrorCode::ConnectionPoolExhausted)
    }

    /// Create a Timeout error.
    pub fn timeout(operation: &str) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Operation '{}' timed out", operation),
        )
    }

    /// Create an UpstreamFailure error.
    pub fn upstream_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamFailure, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError to enable automatic error handling in Axum.
///
/// This allows ApiError to be returned directly from Axum handlers:
/// ```ignore
/// async fn handler() -> Result<Json<Response>, ApiError> {
///     Err(ApiError::missing_field("flight_code"))
/// }
/// ```
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM STANDARD ERRORS
// ============================================================================

/// Convert from tokio_postgres::Error to ApiError.
impl From<tokio_postgres::Error> for ApiError {
    fn from(err: tokio_postgres::Error) -> Self {
        // Log the full error for debugging
        tracing::error!("Database error: {:?}", err);

        // Return a generic database error to avoid leaking internal details
        ApiError::database_error("Database operation failed")
    }
}

/// Convert from deadpool_postgres::PoolError to ApiError.
impl From<deadpool_postgres::PoolError> for ApiError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        tracing::error!("Connection pool error: {:?}", err);

        match err {
            deadpool_postgres::PoolError::Timeout(_) => ApiError::connection_pool_exhausted(),
            deadpool_postgres::PoolError::Closed => {
                ApiError::service_unavailable("Database connection pool is closed")
            }
            _ => ApiError::database_error("Failed to acquire database connection"),
        }
    }
}

/// Convert from serde_json::Error to ApiError.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON serialization error: {:?}", err);
        ApiError::invalid_input(format!("Invalid JSON: {}", err))
    }
}

/// Convert classified tool errors into HTTP errors.
///
/// Used by the direct tool invocation surface; on the orchestrated path
/// recoverable tool errors never reach this conversion.
impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        let message = err.to_string();
        match err {
            ToolError::MissingArgument { .. } => ApiError::new(ErrorCode::MissingField, message),
            ToolError::InvalidArgument { .. } => ApiError::new(ErrorCode::InvalidInput, message),
            ToolError::NotFound { .. } => ApiError::new(ErrorCode::EntityNotFound, message),
            ToolError::Database { .. } => ApiError::new(ErrorCode::DatabaseError, message),
        }
    }
}

/// Convert chat-provider failures, preserving the upstream message for
/// diagnostics.
impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        ApiError::upstream_failure(err.to_string())
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
///
/// This is the standard result type used throughout the API layer.
pub type ApiResult<T> = Result<T, ApiError>;
