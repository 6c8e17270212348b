//! CLI output utilities for the conversation transcript.
//!
//! The transcript goes to stdout; the error banner goes to stderr so it
//! never mixes with answers.

mod transcript;

pub use transcript::*;
