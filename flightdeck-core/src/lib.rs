//! Flightdeck Core - Entity Types and Policies
//!
//! Shared data types for the Flightdeck flight-information assistant.
//! This crate contains the domain entities (flights, airports, weather),
//! the conversation and activity-log types exchanged between the
//! orchestrator and its clients, the error taxonomy, and the pure
//! compensation policy. No I/O lives here.

use chrono::{DateTime, Utc};

pub mod activity;
pub mod compensation;
pub mod conversation;
pub mod entities;
pub mod enums;
pub mod error;

pub use activity::{agent_for_tool, ActivityLog, ActivityLogEntry, ActivityType, AgentLabel};
pub use compensation::{calculate_compensation, Compensation, CANCELLED_DELAY_SENTINEL};
pub use conversation::{ChatMessage, ChatRole, TokenUsage, ToolCallRequest, ToolSpec};
pub use entities::{Airport, Flight, FlightWithRoute, Weather, WeatherReport};
pub use enums::FlightStatus;
pub use error::{LlmError, ToolError};

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;
