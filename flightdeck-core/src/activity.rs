//! Per-exchange activity log
//!
//! An append-only sequence of structured events describing orchestration
//! progress. The log is owned by exactly one exchange, carried by value
//! through the loop, and returned to the client whole; it never crosses
//! request boundaries and never influences control flow.

use crate::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Conceptual sub-agent an activity entry is attributed to.
///
/// Attribution is cosmetic: execution is centralized, but the UI renders
/// activity as if dedicated agents handled each tool family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AgentLabel {
    Orchestrator,
    Flight,
    Weather,
    Support,
    Info,
}

impl AgentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentLabel::Orchestrator => "orchestrator",
            AgentLabel::Flight => "flight",
            AgentLabel::Weather => "weather",
            AgentLabel::Support => "support",
            AgentLabel::Info => "info",
        }
    }
}

impl std::fmt::Display for AgentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of activity event, used by the client for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Request,
    A2a,
    Mcp,
    Llm,
    Success,
    Error,
    Complete,
}

/// One immutable log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ActivityLogEntry {
    pub agent: AgentLabel,
    pub action: String,
    pub details: String,
    #[serde(rename = "type")]
    pub entry_type: ActivityType,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub time: Timestamp,
}

/// Append-only activity log scoped to one chat exchange.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityLogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry, stamping it with the current time.
    pub fn record(
        &mut self,
        agent: AgentLabel,
        action: impl Into<String>,
        details: impl Into<String>,
        entry_type: ActivityType,
    ) {
        self.entries.push(ActivityLogEntry {
            agent,
            action: action.into(),
            details: details.into(),
            entry_type,
            time: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[ActivityLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the log, yielding the ordered entries for the response.
    pub fn into_entries(self) -> Vec<ActivityLogEntry> {
        self.entries
    }
}

/// Map a tool name to the sub-agent label its activity is attributed to.
///
/// Unmapped names (including unknown tools) fall back to the orchestrator.
pub fn agent_for_tool(tool_name: &str) -> AgentLabel {
    match tool_name {
        "search_flight" | "list_flights" => AgentLabel::Flight,
        "get_weather" => AgentLabel::Weather,
        "get_airport_info" => AgentLabel::Info,
        "find_alternatives" | "calculate_compensation" => AgentLabel::Support,
        _ => AgentLabel::Orchestrator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_order() {
        let mut log = ActivityLog::new();
        log.record(AgentLabel::Orchestrator, "Received", "User: \"hi\"", ActivityType::Request);
        log.record(AgentLabel::Flight, "Result", "{}", ActivityType::Success);
        log.record(AgentLabel::Orchestrator, "Complete", "done", ActivityType::Complete);

        let kinds: Vec<ActivityType> = log.entries().iter().map(|e| e.entry_type).collect();
        assert_eq!(
            kinds,
            vec![ActivityType::Request, ActivityType::Success, ActivityType::Complete]
        );
    }

    #[test]
    fn test_entry_wire_format_uses_type_key() {
        let mut log = ActivityLog::new();
        log.record(AgentLabel::Support, "[MCP] Execute", "calculate_compensation", ActivityType::Mcp);
        let value = serde_json::to_value(&log.into_entries()[0]).unwrap();
        assert_eq!(value["agent"], "support");
        assert_eq!(value["type"], "mcp");
        assert!(value.get("entry_type").is_none());
        assert!(value["time"].is_string());
    }

    #[test]
    fn test_agent_attribution_mapping() {
        assert_eq!(agent_for_tool("search_flight"), AgentLabel::Flight);
        assert_eq!(agent_for_tool("list_flights"), AgentLabel::Flight);
        assert_eq!(agent_for_tool("get_weather"), AgentLabel::Weather);
        assert_eq!(agent_for_tool("get_airport_info"), AgentLabel::Info);
        assert_eq!(agent_for_tool("find_alternatives"), AgentLabel::Support);
        assert_eq!(agent_for_tool("calculate_compensation"), AgentLabel::Support);
        assert_eq!(agent_for_tool("no_such_tool"), AgentLabel::Orchestrator);
    }
}
