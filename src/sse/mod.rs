//! Query stream decoder
//!
//! Parses the assistant backend's streamed query response. The wire format:
//! - Events are separated by a blank line (`\n\n`)
//! - Each event is one line `data: <json>`
//! - The JSON is `{"type": <tag>, "data": <object>}`
//! - Frames without the `data: ` prefix are ignored
//!
//! # Module structure
//! - `decoder` - UTF-8 decoding that survives characters split across chunks
//! - `framer` - Splits decoded text into frames on the blank-line delimiter
//! - `events` - Event type definitions (StreamEvent, SseParseError)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Parsing logic (SseParser, parse_frame, parse_stream_event)

mod decoder;
mod events;
mod framer;
mod parser;
mod payloads;

// Re-export public types
pub use decoder::Utf8ChunkDecoder;
pub use events::{SseParseError, StreamEvent};
pub use framer::{EventFramer, FRAME_DELIMITER};
pub use parser::{parse_frame, parse_stream_event, FrameResult, SseParser, DATA_PREFIX};
