//! Stream event types and definitions
//!
//! Contains the StreamEvent enum with every event the assistant backend
//! emits while answering a query, plus the per-frame parse error.

use serde::{Deserialize, Serialize};

/// Typed events from the assistant's query stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// The agent entered a new pipeline node (transient progress)
    StatusUpdate { node: String },
    /// The agent's final answer for this turn
    FinalAnswer { answer: String },
    /// The agent failed upstream; carries its message verbatim
    Error { message: String },
    /// A tag this client does not know about
    #[serde(skip)]
    Unknown { event_type: String },
}

impl StreamEvent {
    /// Returns the event type name as a string for debugging purposes.
    pub fn event_type_name(&self) -> &str {
        match self {
            StreamEvent::StatusUpdate { .. } => "status_update",
            StreamEvent::FinalAnswer { .. } => "final_answer",
            StreamEvent::Error { .. } => "error",
            StreamEvent::Unknown { event_type } => event_type,
        }
    }
}

/// Errors that can occur while parsing a single frame.
///
/// A parse error only ever affects the frame it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SseParseError {
    /// The payload after the prefix is not valid JSON or lacks `type`/`data`
    InvalidJson { source: String },
    /// The envelope was fine but `data` does not fit the tag's shape
    InvalidPayload { event_type: String, source: String },
}

impl SseParseError {
    /// The event tag involved, when it got far enough to know one.
    pub fn event_type(&self) -> Option<&str> {
        match self {
            SseParseError::InvalidJson { .. } => None,
            SseParseError::InvalidPayload { event_type, .. } => Some(event_type),
        }
    }
}

impl std::fmt::Display for SseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SseParseError::InvalidJson { source } => {
                write!(f, "Invalid JSON in event frame: {}", source)
            }
            SseParseError::InvalidPayload { event_type, source } => {
                write!(f, "Invalid data for event '{}': {}", event_type, source)
            }
        }
    }
}

impl std::error::Error for SseParseError {}
