//! Newline framing of the raw byte stream.
//!
//! TCP delivers bytes in arbitrary chunks: one read may carry half a
//! message, or several messages plus the start of the next. The decoder
//! reassembles those chunks into discrete newline-terminated messages,
//! carrying any partial trailing fragment over to the next feed.

/// Incremental splitter for newline-delimited messages.
///
/// `feed` never drops or reorders data; a message truncated across two
/// reads is reconstructed byte-exactly. There is no cap on the carry-over
/// buffer, so a server that never sends a newline grows it without bound.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Appends `bytes` and returns every complete message now available,
    /// in arrival order, without the delimiter.
    ///
    /// Messages are decoded as UTF-8 with replacement for invalid bytes so
    /// a corrupt frame cannot abort the session.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);

        let mut messages = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let frame: Vec<u8> = self.buf.drain(..=pos).collect();
            // Drop the trailing '\n' before decoding.
            messages.push(String::from_utf8_lossy(&frame[..frame.len() - 1]).into_owned());
        }
        messages
    }

    /// Bytes received but not yet terminated by a newline.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_complete_message() {
        let mut decoder = FrameDecoder::new();
        let messages = decoder.feed(b"hello\n");
        assert_eq!(messages, vec!["hello".to_string()]);
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn test_multiple_messages_in_one_chunk() {
        let mut decoder = FrameDecoder::new();
        let messages = decoder.feed(b"one\ntwo\nthree\n");
        assert_eq!(messages, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_partial_message_is_retained() {
        let mut decoder = FrameDecoder::new();
        let messages = decoder.feed(b"no newline yet");
        assert!(messages.is_empty());
        assert_eq!(decoder.pending(), b"no newline yet");
    }

    #[test]
    fn test_message_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(b"7:New").is_empty());
        let messages = decoder.feed(b"Game\n");
        assert_eq!(messages, vec!["7:NewGame"]);
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn test_trailing_fragment_carries_over() {
        let mut decoder = FrameDecoder::new();
        let messages = decoder.feed(b"complete\npart");
        assert_eq!(messages, vec!["complete"]);
        assert_eq!(decoder.pending(), b"part");

        let messages = decoder.feed(b"ial\n");
        assert_eq!(messages, vec!["partial"]);
    }

    #[test]
    fn test_byte_at_a_time_reconstruction() {
        let mut decoder = FrameDecoder::new();
        let stream = b"first\nsecond\nthird\n";

        let mut collected = Vec::new();
        for byte in stream {
            collected.extend(decoder.feed(std::slice::from_ref(byte)));
        }

        assert_eq!(collected, vec!["first", "second", "third"]);
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn test_empty_line_is_an_empty_message() {
        let mut decoder = FrameDecoder::new();
        let messages = decoder.feed(b"\n\n");
        assert_eq!(messages, vec!["", ""]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_fatal() {
        let mut decoder = FrameDecoder::new();
        let messages = decoder.feed(b"ok\n\xff\xfe\nafter\n");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], "ok");
        assert_eq!(messages[2], "after");
    }
}
