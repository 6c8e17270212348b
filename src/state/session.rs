//! Conversation state and event dispatch
//!
//! `SessionState` is everything a presentation layer needs to render a
//! conversation: the transcript, whether a turn is in flight, the transient
//! status line and the error banner. Stream events are applied to it by
//! [`apply_event`] / [`SessionState::apply`].

use crate::models::{ConversationLog, Message};
use crate::sse::StreamEvent;

/// Status shown between submitting a question and the first event.
pub const CONNECTING_STATUS: &str = "Connecting to agent...";

/// Human-readable status for an agent pipeline node.
pub fn status_for_node(node: &str) -> String {
    format!("Agent is: {}", node)
}

/// Where the current turn is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TurnPhase {
    /// No turn in flight
    #[default]
    Idle,
    /// Request sent, waiting for the response body
    Connecting,
    /// Reading and applying events
    Streaming,
    /// The stream ended normally
    Completed,
    /// The transport failed, timed out or was cancelled
    Failed,
}

impl TurnPhase {
    /// True while a turn holds the session.
    pub fn is_active(&self) -> bool {
        matches!(self, TurnPhase::Connecting | TurnPhase::Streaming)
    }
}

/// Snapshot-able state of one conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Transcript, oldest first
    pub log: ConversationLog,
    /// True from request dispatch until the stream completes or fails
    pub is_streaming: bool,
    /// Transient progress text; empty when nothing is in flight
    pub current_status: String,
    /// Error banner text, kept apart from the transcript
    pub last_error: Option<String>,
    /// Where the current or most recent turn is in its lifecycle
    pub phase: TurnPhase,
    /// Frames dropped because they could not be decoded
    pub decode_errors: usize,
}

impl SessionState {
    /// Empty state with no greeting.
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose transcript opens with a synthetic assistant greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            log: ConversationLog::with_greeting(greeting),
            ..Self::default()
        }
    }

    /// Apply one decoded event.
    pub fn apply(&mut self, event: &StreamEvent) {
        match event {
            StreamEvent::StatusUpdate { node } => {
                self.current_status = status_for_node(node);
            }
            StreamEvent::FinalAnswer { answer } => {
                self.log.push(Message::assistant(answer.clone()));
            }
            StreamEvent::Error { message } => {
                self.last_error = Some(message.clone());
            }
            StreamEvent::Unknown { event_type } => {
                tracing::debug!("Ignoring unknown event type: {}", event_type);
            }
        }
    }

    /// Start a turn: record the question and raise the streaming gate.
    ///
    /// Callers must check `is_streaming` first; this does not.
    pub(crate) fn begin_turn(&mut self, question: &str) {
        self.log.push(Message::user(question));
        self.is_streaming = true;
        self.current_status = CONNECTING_STATUS.to_string();
        self.last_error = None;
        self.phase = TurnPhase::Connecting;
    }

    pub(crate) fn mark_streaming(&mut self) {
        self.phase = TurnPhase::Streaming;
    }

    pub(crate) fn record_decode_error(&mut self) {
        self.decode_errors += 1;
    }

    /// End the turn in `phase`, lowering the gate and clearing the status.
    pub(crate) fn finish_turn(&mut self, phase: TurnPhase, error: Option<String>) {
        self.is_streaming = false;
        self.current_status.clear();
        self.phase = phase;
        if error.is_some() {
            self.last_error = error;
        }
    }

    /// Return to `Idle` after a finished turn has been observed.
    pub(crate) fn settle(&mut self) {
        if !self.phase.is_active() {
            self.phase = TurnPhase::Idle;
        }
    }
}

/// Apply `event` to `state`, returning the new state.
pub fn apply_event(state: SessionState, event: &StreamEvent) -> SessionState {
    let mut next = state;
    next.apply(event);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageRole;

    fn streaming_state() -> SessionState {
        let mut state = SessionState::with_greeting("Ready to chat about repo!");
        state.begin_turn("What does X do?");
        state.mark_streaming();
        state
    }

    #[test]
    fn test_status_update_does_not_touch_log() {
        let state = streaming_state();
        let before = state.log.clone();

        let state = apply_event(
            state,
            &StreamEvent::StatusUpdate {
                node: "retriever".to_string(),
            },
        );

        assert_eq!(state.current_status, "Agent is: retriever");
        assert_eq!(state.log, before);
    }

    #[test]
    fn test_final_answer_appends_assistant_message() {
        let state = apply_event(
            streaming_state(),
            &StreamEvent::FinalAnswer {
                answer: "X does Y.".to_string(),
            },
        );

        let last = state.log.last().unwrap();
        assert_eq!(last.role, MessageRole::Assistant);
        assert_eq!(last.content, "X does Y.");
        assert_eq!(state.log.len(), 3);
    }

    #[test]
    fn test_second_final_answer_appends_again() {
        let answer = StreamEvent::FinalAnswer {
            answer: "again".to_string(),
        };
        let state = apply_event(apply_event(streaming_state(), &answer), &answer);
        assert_eq!(state.log.len(), 4);
    }

    #[test]
    fn test_error_sets_banner_only() {
        let state = streaming_state();
        let before = state.log.clone();

        let state = apply_event(
            state,
            &StreamEvent::Error {
                message: "index not found".to_string(),
            },
        );

        assert_eq!(state.last_error.as_deref(), Some("index not found"));
        assert_eq!(state.log, before);
        assert!(state.is_streaming);
    }

    #[test]
    fn test_unknown_is_noop() {
        let state = streaming_state();
        let after = apply_event(
            state.clone(),
            &StreamEvent::Unknown {
                event_type: "heartbeat".to_string(),
            },
        );
        assert_eq!(after, state);
    }

    #[test]
    fn test_begin_turn() {
        let mut state = SessionState::new();
        state.last_error = Some("old".to_string());
        state.begin_turn("hello");

        assert!(state.is_streaming);
        assert_eq!(state.phase, TurnPhase::Connecting);
        assert_eq!(state.current_status, CONNECTING_STATUS);
        assert_eq!(state.last_error, None);
        assert_eq!(state.log.last().unwrap().content, "hello");
    }

    #[test]
    fn test_finish_turn_clears_progress() {
        let mut state = streaming_state();
        state.apply(&StreamEvent::StatusUpdate {
            node: "generate".to_string(),
        });
        state.finish_turn(TurnPhase::Failed, Some("lost".to_string()));

        assert!(!state.is_streaming);
        assert!(state.current_status.is_empty());
        assert_eq!(state.phase, TurnPhase::Failed);
        assert_eq!(state.last_error.as_deref(), Some("lost"));

        state.settle();
        assert_eq!(state.phase, TurnPhase::Idle);
    }

    #[test]
    fn test_finish_turn_keeps_backend_error() {
        let mut state = streaming_state();
        state.apply(&StreamEvent::Error {
            message: "index not found".to_string(),
        });
        state.finish_turn(TurnPhase::Completed, None);
        assert_eq!(state.last_error.as_deref(), Some("index not found"));
    }

    #[test]
    fn test_phase_is_active() {
        assert!(TurnPhase::Connecting.is_active());
        assert!(TurnPhase::Streaming.is_active());
        assert!(!TurnPhase::Idle.is_active());
        assert!(!TurnPhase::Completed.is_active());
        assert!(!TurnPhase::Failed.is_active());
    }
}
