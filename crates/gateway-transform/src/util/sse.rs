// SSE parser for the gateway's event stream.
//
// The gateway only ever emits `data:` lines (plus keep-alive comments), so
// this parser is data-oriented: each blank-line boundary yields the joined
// data payload of the event. `event:`/`id:`/`retry:` fields never appear
// upstream and are ignored.

/// Incremental parser that handles partial chunks.
///
/// Feed chunks of text via `feed()` and receive the data payloads of
/// complete events.
pub struct SseParser {
    /// Buffer for incomplete lines spanning chunk boundaries.
    buffer: String,
    /// Data lines accumulated for the current event.
    data_lines: Vec<String>,
    /// Whether the current event has seen a data field.
    has_data: bool,
}

impl Default for SseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SseParser {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            data_lines: Vec::new(),
            has_data: false,
        }
    }

    /// Feed a chunk of text. Returns the data payload of every event
    /// completed by this chunk.
    pub fn feed(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);
        let mut payloads = Vec::new();

        loop {
            let Some(pos) = self.buffer.find('\n') else {
                break; // No complete line yet, wait for more data
            };
            // Strip \r for CRLF endings.
            let line_end = if pos > 0 && self.buffer.as_bytes()[pos - 1] == b'\r' {
                pos - 1
            } else {
                pos
            };
            let line = self.buffer[..line_end].to_string();
            self.buffer = self.buffer[pos + 1..].to_string();

            if line.is_empty() {
                // Blank line = event boundary
                if self.has_data {
                    payloads.push(self.data_lines.join("\n"));
                    self.data_lines.clear();
                    self.has_data = false;
                }
            } else {
                self.process_line(&line);
            }
        }

        payloads
    }

    fn process_line(&mut self, line: &str) {
        // Comment lines start with ':'
        if line.starts_with(':') {
            return;
        }

        if let Some(value) = line.strip_prefix("data:") {
            let value = value.strip_prefix(' ').unwrap_or(value);
            self.data_lines.push(value.to_string());
            self.has_data = true;
        }
        // Other fields and field-less lines are ignored.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_data_event() {
        let mut parser = SseParser::new();
        let payloads = parser.feed("data: hello\n\n");
        assert_eq!(payloads, vec!["hello"]);
    }

    #[test]
    fn test_multiple_events() {
        let mut parser = SseParser::new();
        let payloads = parser.feed("data: first\n\ndata: second\n\n");
        assert_eq!(payloads, vec!["first", "second"]);
    }

    #[test]
    fn test_multiline_data_joined_with_newline() {
        let mut parser = SseParser::new();
        let payloads = parser.feed("data: line1\ndata: line2\n\n");
        assert_eq!(payloads, vec!["line1\nline2"]);
    }

    #[test]
    fn test_comment_lines_ignored() {
        let mut parser = SseParser::new();
        let payloads = parser.feed(": keep-alive\ndata: real\n\n");
        assert_eq!(payloads, vec!["real"]);
    }

    #[test]
    fn test_partial_chunks_accumulated() {
        let mut parser = SseParser::new();
        assert!(parser.feed("data: hel").is_empty());
        let payloads = parser.feed("lo\n\n");
        assert_eq!(payloads, vec!["hello"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut parser = SseParser::new();
        let payloads = parser.feed("data: hello\r\n\r\n");
        assert_eq!(payloads, vec!["hello"]);
    }

    #[test]
    fn test_data_without_space_after_colon() {
        let mut parser = SseParser::new();
        let payloads = parser.feed("data:hello\n\n");
        assert_eq!(payloads, vec!["hello"]);
    }

    #[test]
    fn test_empty_data_line() {
        let mut parser = SseParser::new();
        let payloads = parser.feed("data:\n\n");
        assert_eq!(payloads, vec![""]);
    }

    #[test]
    fn test_blank_lines_without_data_emit_nothing() {
        let mut parser = SseParser::new();
        assert!(parser.feed("\n\n\n").is_empty());
    }

    #[test]
    fn test_done_sentinel_passes_through() {
        let mut parser = SseParser::new();
        let payloads = parser.feed("data: [DONE]\n\n");
        assert_eq!(payloads, vec!["[DONE]"]);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut parser = SseParser::new();
        let payloads = parser.feed("event: chunk\nid: 7\ndata: payload\n\n");
        assert_eq!(payloads, vec!["payload"]);
    }
}
