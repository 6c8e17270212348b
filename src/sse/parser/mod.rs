//! Stream parsing logic
//!
//! Contains the stateful SseParser that turns raw body chunks into events,
//! as well as the per-frame parsing functions.

use serde::de::DeserializeOwned;

use crate::sse::decoder::Utf8ChunkDecoder;
use crate::sse::events::{SseParseError, StreamEvent};
use crate::sse::framer::EventFramer;
use crate::sse::payloads::{
    ErrorPayload, EventEnvelope, FinalAnswerPayload, StatusUpdatePayload,
};

/// Literal marker every protocol frame starts with
pub const DATA_PREFIX: &str = "data: ";

/// Outcome of parsing one frame
pub type FrameResult = Result<StreamEvent, SseParseError>;

/// Parse a single frame into an event.
///
/// Returns:
/// - `Ok(Some(event))` - the frame is a protocol event
/// - `Ok(None)` - the frame has no `data: ` prefix (keep-alive, comment) and is skipped
/// - `Err(error)` - the frame is a protocol event but its payload is malformed
pub fn parse_frame(frame: &str) -> Result<Option<StreamEvent>, SseParseError> {
    let line = frame.trim_matches(|c| c == '\n' || c == '\r');

    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        tracing::debug!("Skipping non-data frame ({} bytes)", line.len());
        return Ok(None);
    };

    let envelope: EventEnvelope =
        serde_json::from_str(payload).map_err(|e| SseParseError::InvalidJson {
            source: e.to_string(),
        })?;

    parse_stream_event(&envelope.event_type, envelope.data).map(Some)
}

/// Map an event tag and its data object to a typed StreamEvent
pub fn parse_stream_event(
    event_type: &str,
    data: serde_json::Value,
) -> Result<StreamEvent, SseParseError> {
    match event_type {
        "status_update" => {
            let payload: StatusUpdatePayload = parse_payload(event_type, data)?;
            Ok(StreamEvent::StatusUpdate { node: payload.node })
        }
        "final_answer" => {
            let payload: FinalAnswerPayload = parse_payload(event_type, data)?;
            Ok(StreamEvent::FinalAnswer {
                answer: payload.answer,
            })
        }
        "error" => {
            let payload: ErrorPayload = parse_payload(event_type, data)?;
            Ok(StreamEvent::Error {
                message: payload.message,
            })
        }
        // Unknown tags are carried through rather than rejected
        other => Ok(StreamEvent::Unknown {
            event_type: other.to_string(),
        }),
    }
}

fn parse_payload<T: DeserializeOwned>(
    event_type: &str,
    data: serde_json::Value,
) -> Result<T, SseParseError> {
    serde_json::from_value(data).map_err(|e| SseParseError::InvalidPayload {
        event_type: event_type.to_string(),
        source: e.to_string(),
    })
}

/// Stateful parser that turns body chunks into events.
///
/// Chains UTF-8 decoding, frame splitting and frame parsing. Results come
/// out in stream order; a malformed frame yields an `Err` entry and parsing
/// carries on with the next frame.
#[derive(Debug, Default)]
pub struct SseParser {
    decoder: Utf8ChunkDecoder,
    framer: EventFramer,
}

impl SseParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next body chunk, returning every frame it completed
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<FrameResult> {
        let text = self.decoder.decode(chunk);
        Self::parse_frames(self.framer.push(&text))
    }

    /// Flush at end of stream.
    ///
    /// Any text left without a closing delimiter is still parsed as a final
    /// frame, so an event cut short only by the connection closing is not lost.
    pub fn finish(&mut self) -> Vec<FrameResult> {
        let text = self.decoder.finish();
        let mut results = Self::parse_frames(self.framer.push(&text));

        if let Some(tail) = self.framer.finish() {
            tracing::warn!(
                "Stream ended with an unterminated frame ({} bytes); parsing it anyway",
                tail.len()
            );
            if let Some(result) = parse_frame(&tail).transpose() {
                results.push(result);
            }
        }

        results
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.decoder = Utf8ChunkDecoder::new();
        self.framer = EventFramer::new();
    }

    fn parse_frames(frames: Vec<String>) -> Vec<FrameResult> {
        frames
            .iter()
            .filter_map(|frame| parse_frame(frame).transpose())
            .collect()
    }
}
