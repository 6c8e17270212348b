//! Conversation state management
//!
//! - SessionState: transcript, streaming gate, status line and error banner
//! - apply_event: the pure event dispatcher

pub mod session;

pub use session::{apply_event, status_for_node, SessionState, TurnPhase, CONNECTING_STATUS};
