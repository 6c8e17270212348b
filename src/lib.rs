//! Reploit - a streaming chat client for a codebase assistant
//!
//! The backend answers each question with a stream of `data: <json>` events.
//! This library decodes that stream ([`sse`]), applies the events to a
//! conversation ([`state`]) and runs one turn at a time against the
//! backend ([`session`]).

pub mod adapters;
pub mod cli;
pub mod cli_output;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sse;
pub mod state;
pub mod traits;

pub use client::AssistantClient;
pub use config::ClientConfig;
pub use session::{QuerySession, SubmitRejected, TurnOutcome};
pub use sse::{SseParser, StreamEvent};
pub use state::{SessionState, TurnPhase};
