//! Frame boundary reconstruction.
//!
//! The backend separates events with a blank line. Chunk boundaries can fall
//! anywhere, including between the two newlines of the delimiter, so text is
//! buffered until a delimiter is seen.

/// Separator between two event frames.
pub const FRAME_DELIMITER: &str = "\n\n";

/// Accumulates decoded text and splits it into complete frames.
#[derive(Debug, Default)]
pub struct EventFramer {
    /// Text after the last delimiter seen so far
    buffer: String,
}

impl EventFramer {
    /// Create an empty framer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text and return every frame it completes, in order.
    ///
    /// Empty frames (from doubled delimiters) are dropped. Whatever follows
    /// the last delimiter stays buffered for the next call.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        self.buffer.push_str(text);

        if !self.buffer.contains(FRAME_DELIMITER) {
            return Vec::new();
        }

        // Split left to right so the result does not depend on where the
        // chunk boundaries fell.
        let mut parts: Vec<String> = self
            .buffer
            .split(FRAME_DELIMITER)
            .map(str::to_string)
            .collect();
        self.buffer = parts.pop().unwrap_or_default();

        parts.retain(|frame| !frame.is_empty());
        parts
    }

    /// Take the unterminated trailing text at end of stream.
    ///
    /// Returns `None` when nothing but whitespace is left.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest)
        }
    }

    /// Number of bytes currently buffered.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_complete_frame() {
        let mut framer = EventFramer::new();
        assert_eq!(framer.push("data: a\n\n"), vec!["data: a"]);
        assert_eq!(framer.buffered_len(), 0);
        assert_eq!(framer.finish(), None);
    }

    #[test]
    fn test_partial_frame_is_retained() {
        let mut framer = EventFramer::new();
        assert!(framer.push("data: par").is_empty());
        assert_eq!(framer.push("tial\n\ndata: next"), vec!["data: partial"]);
        assert_eq!(framer.finish(), Some("data: next".to_string()));
    }

    #[test]
    fn test_delimiter_split_between_chunks() {
        let mut framer = EventFramer::new();
        assert!(framer.push("data: a\n").is_empty());
        assert_eq!(framer.push("\ndata: b\n"), vec!["data: a"]);
        assert_eq!(framer.push("\n"), vec!["data: b"]);
    }

    #[test]
    fn test_multiple_frames_in_one_push() {
        let mut framer = EventFramer::new();
        let frames = framer.push("data: 1\n\ndata: 2\n\ndata: 3\n\n");
        assert_eq!(frames, vec!["data: 1", "data: 2", "data: 3"]);
    }

    #[test]
    fn test_empty_frames_skipped() {
        let mut framer = EventFramer::new();
        let frames = framer.push("\n\n\n\ndata: x\n\n\n\n");
        assert_eq!(frames, vec!["data: x"]);
    }

    #[test]
    fn test_odd_newline_run_is_chunk_independent() {
        let input = "data: a\n\n\ndata: b\n\n";

        let mut whole = EventFramer::new();
        let expected = whole.push(input);

        for split in 0..=input.len() {
            let mut framer = EventFramer::new();
            let mut frames = framer.push(&input[..split]);
            frames.extend(framer.push(&input[split..]));
            assert_eq!(frames, expected, "split at {}", split);
        }
    }

    #[test]
    fn test_finish_ignores_whitespace_tail() {
        let mut framer = EventFramer::new();
        framer.push("data: x\n\n\n");
        assert_eq!(framer.finish(), None);
    }
}
