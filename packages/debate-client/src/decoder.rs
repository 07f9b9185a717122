//! Incremental decoder for the `event:`/`data:` line framing of the debate stream.
//!
//! Network fragments may split anywhere, including inside a multi-byte UTF-8
//! sequence or in the middle of a `\r\n` pair. The decoder buffers text until
//! a blank line closes a block, so feeding a stream in any number of pieces
//! produces the same frames as feeding it whole.
//!
//! Malformed input never fails; it only produces fewer frames.

/// Event type used when a block carries no `event:` line.
pub const DEFAULT_EVENT: &str = "message";

/// One decoded block: an event type and its raw payload text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    pub event: String,
    pub data: String,
}

/// Buffering block decoder.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Trailing bytes of an incomplete UTF-8 sequence
    pending: Vec<u8>,
    /// Decoded text of the block(s) not yet terminated by a blank line
    buffer: String,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes and return every block completed by them.
    pub fn decode(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.pending.extend_from_slice(chunk);
        let text = take_utf8(&mut self.pending);
        self.push_text(&text)
    }

    /// Feed already-decoded text and return every block completed by it.
    pub fn decode_str(&mut self, chunk: &str) -> Vec<SseFrame> {
        if !self.pending.is_empty() {
            return self.decode(chunk.as_bytes());
        }
        self.push_text(chunk)
    }

    /// Decode whatever is left once the stream has ended.
    ///
    /// A final block without a terminating blank line still yields its frame.
    /// The decoder is empty afterwards.
    pub fn flush(&mut self) -> Option<SseFrame> {
        if !self.pending.is_empty() {
            let rest = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            self.buffer.push_str(&rest);
        }

        let tail = std::mem::take(&mut self.buffer).replace("\r\n", "\n");
        let tail = tail.trim();
        if tail.is_empty() {
            return None;
        }
        parse_block(tail)
    }

    /// True when no bytes or text are held back.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.buffer.is_empty()
    }

    fn push_text(&mut self, text: &str) -> Vec<SseFrame> {
        self.buffer.push_str(text);
        // The whole buffer is normalized so a `\r` ending the previous chunk
        // pairs with a `\n` starting this one.
        if self.buffer.contains("\r\n") {
            self.buffer = self.buffer.replace("\r\n", "\n");
        }

        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.find("\n\n") {
            let block: String = self.buffer.drain(..pos + 2).collect();
            if let Some(frame) = parse_block(&block[..pos]) {
                frames.push(frame);
            }
        }
        frames
    }
}

/// Drain the longest valid UTF-8 prefix of `bytes`.
///
/// An incomplete sequence at the end stays in `bytes` for the next call;
/// invalid sequences are replaced with U+FFFD.
fn take_utf8(bytes: &mut Vec<u8>) -> String {
    let mut out = String::new();
    let mut start = 0;

    loop {
        match std::str::from_utf8(&bytes[start..]) {
            Ok(text) => {
                out.push_str(text);
                start = bytes.len();
                break;
            }
            Err(e) => {
                let valid = start + e.valid_up_to();
                out.push_str(&String::from_utf8_lossy(&bytes[start..valid]));
                match e.error_len() {
                    Some(len) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        start = valid + len;
                    }
                    None => {
                        start = valid;
                        break;
                    }
                }
            }
        }
    }

    bytes.drain(..start);
    out
}

/// Decode a single block. Returns `None` when it carries no `data:` line.
fn parse_block(block: &str) -> Option<SseFrame> {
    let mut event: Option<String> = None;
    let mut data: Vec<&str> = Vec::new();

    for line in block.split('\n') {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(value) = line.strip_prefix("event:") {
            event = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("data:") {
            data.push(value.trim_start());
        }
    }

    if data.is_empty() {
        return None;
    }

    Some(SseFrame {
        event: event.unwrap_or_else(|| DEFAULT_EVENT.to_string()),
        data: data.join("\n"),
    })
}
