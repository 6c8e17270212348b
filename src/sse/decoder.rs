//! Incremental UTF-8 decoding for chunked response bodies.
//!
//! The transport hands us arbitrary byte chunks, so a multi-byte character
//! can straddle two chunks. The decoder carries the incomplete tail forward
//! until the next chunk completes it.

/// Stateful UTF-8 decoder that never splits a character across outputs.
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    /// Bytes of an incomplete trailing character from the previous chunk
    pending: Vec<u8>,
}

impl Utf8ChunkDecoder {
    /// Create a new decoder with no carried state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk.
    ///
    /// Returns all text that is complete so far. An incomplete trailing
    /// sequence is held back and prepended to the next chunk. Malformed
    /// sequences in the middle of the input become U+FFFD.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut out = String::with_capacity(self.pending.len());
        let mut rest: &[u8] = &self.pending;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[bad..];
                        }
                        None => {
                            // Incomplete sequence at the end; wait for more bytes
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }

        let remainder = rest.to_vec();
        self.pending = remainder;
        out
    }

    /// Flush at end of stream.
    ///
    /// Any bytes still held are decoded leniently, so a truncated trailing
    /// character surfaces as U+FFFD instead of disappearing.
    pub fn finish(&mut self) -> String {
        let tail = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&tail).into_owned()
    }

    /// Whether an incomplete character is being carried.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
