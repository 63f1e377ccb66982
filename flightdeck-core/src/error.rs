//! Error types for Flightdeck operations

use thiserror::Error;

/// Tool execution errors.
///
/// `MissingArgument`, `InvalidArgument` and `NotFound` are recoverable on
/// the orchestrated path: they are serialized into the tool result so the
/// model can correct itself or tell the user. `Database` is not — it
/// aborts the exchange.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Missing {field}")]
    MissingArgument { field: String },

    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("{entity} not found")]
    NotFound { entity: String },

    #[error("Database error: {reason}")]
    Database { reason: String },
}

impl ToolError {
    pub fn missing(field: impl Into<String>) -> Self {
        ToolError::MissingArgument {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        ToolError::NotFound {
            entity: entity.into(),
        }
    }

    /// Whether the orchestration loop can continue after this error by
    /// feeding it back to the model as an ordinary tool result.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ToolError::Database { .. })
    }
}

/// Chat-completion provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("No chat provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Rate limited by {provider}, retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: i64,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },
}
