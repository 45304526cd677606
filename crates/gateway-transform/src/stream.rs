// Incremental decoding of streaming chunks into generic stream parts.
//
// Tool-call fragments accumulate per position until their argument text
// parses as complete JSON; each assembled call is emitted exactly once,
// either early or during the finish sweep.

use gateway_transform_types::{StreamError, StreamPart};

use crate::finish::map_finish_reason;
use crate::wire::{GatewayChunk, WireUsage};

#[derive(Debug, Default)]
struct ToolCallAccumulator {
    id: String,
    name: String,
    arguments: String,
    emitted: bool,
}

impl ToolCallAccumulator {
    /// Emit the assembled call if the argument text now parses as complete
    /// JSON. Sets the emitted flag so the finish sweep skips it.
    fn try_emit(&mut self) -> Option<StreamPart> {
        if self.emitted {
            return None;
        }
        if serde_json::from_str::<serde_json::Value>(&self.arguments).is_err() {
            return None;
        }
        self.emitted = true;
        Some(StreamPart::ToolCall {
            id: self.id.clone(),
            name: self.name.clone(),
            arguments: self.arguments.clone(),
        })
    }
}

/// Stateful decoder for one streaming response.
///
/// Feed it each SSE data payload; it returns the stream parts the payload
/// produced, zero or more per chunk. Chunks after the finish chunk are
/// ignored. Dropping the decoder discards any unfinished accumulators; it
/// never fabricates a finish part.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    calls: Vec<ToolCallAccumulator>,
    finished: bool,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one SSE data payload (the text after `data:`, excluding the
    /// `[DONE]` sentinel, which the caller handles).
    pub fn decode_data(&mut self, data: &str) -> Vec<StreamPart> {
        if self.finished {
            return Vec::new();
        }
        match serde_json::from_str::<GatewayChunk>(data) {
            Ok(chunk) => self.process(chunk),
            Err(e) => vec![StreamPart::Error {
                error: StreamError::validation(format!("Malformed stream chunk: {e}")),
            }],
        }
    }

    fn process(&mut self, chunk: GatewayChunk) -> Vec<StreamPart> {
        let mut parts = Vec::new();

        let Some(choice) = chunk.choices.into_iter().next() else {
            // Keepalive or usage-only chunk.
            return parts;
        };

        if let Some(delta) = choice.delta {
            if let Some(text) = delta.content {
                parts.push(StreamPart::TextDelta { text });
            }

            for (i, entry) in delta.tool_calls.unwrap_or_default().into_iter().enumerate() {
                let pos = entry.index.unwrap_or(i);
                if pos >= self.calls.len() {
                    self.calls.resize_with(pos + 1, ToolCallAccumulator::default);
                }
                let acc = &mut self.calls[pos];

                if let Some(id) = entry.id {
                    // A fresh id restarts the slot.
                    acc.id = id;
                    acc.arguments.clear();
                    acc.emitted = false;
                }
                if let Some(function) = entry.function {
                    if let Some(name) = function.name {
                        acc.name = name;
                    }
                    if let Some(fragment) = function.arguments {
                        acc.arguments.push_str(&fragment);
                        parts.push(StreamPart::ToolCallDelta {
                            id: acc.id.clone(),
                            name: acc.name.clone(),
                            args_text_delta: fragment,
                        });
                        if let Some(call) = acc.try_emit() {
                            parts.push(call);
                        }
                    }
                }
            }
        }

        if let Some(reason) = choice.finish_reason {
            // Sweep assembled-but-unemitted calls before the finish part.
            // Accumulators whose arguments never became valid JSON are dropped.
            for acc in &mut self.calls {
                if let Some(call) = acc.try_emit() {
                    parts.push(call);
                }
            }
            parts.push(StreamPart::Finish {
                finish_reason: map_finish_reason(Some(&reason)),
                usage: WireUsage::to_usage(chunk.usage.as_ref()),
            });
            self.finished = true;
        }

        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_transform_types::{ErrorKind, FinishReason};
    use serde_json::json;

    fn delta_chunk(delta: serde_json::Value) -> String {
        json!({"choices": [{"delta": delta, "finish_reason": null}]}).to_string()
    }

    fn finish_chunk(reason: &str) -> String {
        json!({"choices": [{"delta": {}, "finish_reason": reason}]}).to_string()
    }

    #[test]
    fn test_text_deltas() {
        let mut dec = StreamDecoder::new();
        let parts = dec.decode_data(&delta_chunk(json!({"content": "Hel"})));
        assert_eq!(parts, vec![StreamPart::TextDelta { text: "Hel".into() }]);
        let parts = dec.decode_data(&delta_chunk(json!({"content": ""})));
        // Empty string is still a delta; only absence is skipped.
        assert_eq!(parts, vec![StreamPart::TextDelta { text: "".into() }]);
        let parts = dec.decode_data(&delta_chunk(json!({})));
        assert!(parts.is_empty());
    }

    #[test]
    fn test_tool_call_fragments_emit_deltas_then_one_call() {
        let mut dec = StreamDecoder::new();

        let parts = dec.decode_data(&delta_chunk(json!({
            "tool_calls": [{"index": 0, "id": "tc1", "function": {"name": "get_weather", "arguments": ""}}]
        })));
        assert_eq!(parts.len(), 1);
        assert!(matches!(parts[0], StreamPart::ToolCallDelta { .. }));

        let parts = dec.decode_data(&delta_chunk(json!({
            "tool_calls": [{"index": 0, "function": {"arguments": "{\"a\":"}}]
        })));
        assert_eq!(
            parts,
            vec![StreamPart::ToolCallDelta {
                id: "tc1".into(),
                name: "get_weather".into(),
                args_text_delta: "{\"a\":".into(),
            }]
        );

        // Final fragment completes the JSON: delta plus the assembled call.
        let parts = dec.decode_data(&delta_chunk(json!({
            "tool_calls": [{"index": 0, "function": {"arguments": "1}"}}]
        })));
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1],
            StreamPart::ToolCall {
                id: "tc1".into(),
                name: "get_weather".into(),
                arguments: "{\"a\":1}".into(),
            }
        );

        // Already emitted, so the sweep must not repeat it.
        let parts = dec.decode_data(&finish_chunk("tool_calls"));
        assert_eq!(parts.len(), 1);
        match &parts[0] {
            StreamPart::Finish {
                finish_reason,
                usage,
            } => {
                assert_eq!(*finish_reason, FinishReason::ToolCalls);
                assert!(usage.is_missing());
            }
            other => panic!("expected finish, got {other:?}"),
        }
    }

    #[test]
    fn test_finish_sweep_emits_pending_calls() {
        let mut dec = StreamDecoder::new();
        // Whole argument object in one fragment that happens to arrive with
        // the finish in the next chunk unswept? No: a self-contained fragment
        // emits early. Use a two-fragment call where the closing fragment and
        // finish arrive in the same chunk.
        dec.decode_data(&delta_chunk(json!({
            "tool_calls": [{"index": 0, "id": "tc1", "function": {"name": "f", "arguments": "{\"x\":"}}]
        })));
        let parts = dec.decode_data(
            &json!({"choices": [{
                "delta": {"tool_calls": [{"index": 0, "function": {"arguments": "2}"}}]},
                "finish_reason": "tool_calls"
            }]})
            .to_string(),
        );
        // Delta, assembled call (exactly once), then finish.
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[0], StreamPart::ToolCallDelta { .. }));
        assert_eq!(
            parts[1],
            StreamPart::ToolCall {
                id: "tc1".into(),
                name: "f".into(),
                arguments: "{\"x\":2}".into(),
            }
        );
        assert!(matches!(parts[2], StreamPart::Finish { .. }));
    }

    #[test]
    fn test_never_valid_arguments_dropped_at_finish() {
        let mut dec = StreamDecoder::new();
        dec.decode_data(&delta_chunk(json!({
            "tool_calls": [{"index": 0, "id": "tc1", "function": {"name": "f", "arguments": "{\"broken\":"}}]
        })));
        let parts = dec.decode_data(&finish_chunk("stop"));
        // No tool-call part; just the finish.
        assert_eq!(parts.len(), 1);
        assert!(matches!(parts[0], StreamPart::Finish { .. }));
    }

    #[test]
    fn test_finish_carries_usage() {
        let mut dec = StreamDecoder::new();
        let parts = dec.decode_data(
            &json!({
                "choices": [{"delta": {}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 11, "completion_tokens": 5}
            })
            .to_string(),
        );
        match &parts[0] {
            StreamPart::Finish {
                finish_reason,
                usage,
            } => {
                assert_eq!(*finish_reason, FinishReason::Stop);
                assert_eq!(usage.prompt_tokens, 11.0);
                assert_eq!(usage.completion_tokens, 5.0);
            }
            other => panic!("expected finish, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_chunk_emits_error_and_stream_continues() {
        let mut dec = StreamDecoder::new();
        let parts = dec.decode_data("{not json");
        assert_eq!(parts.len(), 1);
        match &parts[0] {
            StreamPart::Error { error } => {
                assert_eq!(error.kind, ErrorKind::Validation);
                assert!(!error.retryable);
            }
            other => panic!("expected error part, got {other:?}"),
        }
        // Next valid chunk still decodes.
        let parts = dec.decode_data(&delta_chunk(json!({"content": "ok"})));
        assert_eq!(parts, vec![StreamPart::TextDelta { text: "ok".into() }]);
    }

    #[test]
    fn test_no_choices_chunk_ignored() {
        let mut dec = StreamDecoder::new();
        assert!(dec.decode_data(&json!({"choices": []}).to_string()).is_empty());
        assert!(dec.decode_data(&json!({}).to_string()).is_empty());
    }

    #[test]
    fn test_chunks_after_finish_ignored() {
        let mut dec = StreamDecoder::new();
        let parts = dec.decode_data(&finish_chunk("stop"));
        assert_eq!(parts.len(), 1);
        assert!(dec.decode_data(&delta_chunk(json!({"content": "late"}))).is_empty());
        assert!(dec.decode_data("{not json").is_empty());
        assert!(dec.decode_data(&finish_chunk("stop")).is_empty());
    }

    #[test]
    fn test_exactly_one_finish_part() {
        let mut dec = StreamDecoder::new();
        let mut finishes = 0;
        for data in [
            delta_chunk(json!({"content": "a"})),
            finish_chunk("stop"),
            finish_chunk("stop"),
        ] {
            for part in dec.decode_data(&data) {
                if matches!(part, StreamPart::Finish { .. }) {
                    finishes += 1;
                }
            }
        }
        assert_eq!(finishes, 1);
    }

    #[test]
    fn test_id_arrival_reinitializes_slot() {
        let mut dec = StreamDecoder::new();
        dec.decode_data(&delta_chunk(json!({
            "tool_calls": [{"index": 0, "id": "tc1", "function": {"name": "f", "arguments": "{}"}}]
        })));
        // "{}" parsed immediately, so tc1 was emitted. A new id reuses slot 0.
        let parts = dec.decode_data(&delta_chunk(json!({
            "tool_calls": [{"index": 0, "id": "tc2", "function": {"name": "g", "arguments": "{\"b\":true}"}}]
        })));
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[1],
            StreamPart::ToolCall {
                id: "tc2".into(),
                name: "g".into(),
                arguments: "{\"b\":true}".into(),
            }
        );
    }

    #[test]
    fn test_missing_index_falls_back_to_array_position() {
        let mut dec = StreamDecoder::new();
        let parts = dec.decode_data(&delta_chunk(json!({
            "tool_calls": [
                {"id": "tc1", "function": {"name": "a", "arguments": "1"}},
                {"id": "tc2", "function": {"name": "b", "arguments": "2"}}
            ]
        })));
        // Each single-digit fragment is complete JSON: delta + call per entry.
        assert_eq!(parts.len(), 4);
        assert_eq!(
            parts[1],
            StreamPart::ToolCall {
                id: "tc1".into(),
                name: "a".into(),
                arguments: "1".into(),
            }
        );
        assert_eq!(
            parts[3],
            StreamPart::ToolCall {
                id: "tc2".into(),
                name: "b".into(),
                arguments: "2".into(),
            }
        );
    }

    #[test]
    fn test_parallel_tool_calls_interleaved() {
        let mut dec = StreamDecoder::new();
        dec.decode_data(&delta_chunk(json!({
            "tool_calls": [
                {"index": 0, "id": "tc1", "function": {"name": "a", "arguments": "{\"x\":"}},
                {"index": 1, "id": "tc2", "function": {"name": "b", "arguments": "{\"y\":"}}
            ]
        })));
        let parts = dec.decode_data(&delta_chunk(json!({
            "tool_calls": [
                {"index": 1, "function": {"arguments": "2}"}},
                {"index": 0, "function": {"arguments": "1}"}}
            ]
        })));
        // Both complete in this chunk, each exactly once.
        let calls: Vec<_> = parts
            .iter()
            .filter_map(|p| match p {
                StreamPart::ToolCall { id, arguments, .. } => {
                    Some((id.clone(), arguments.clone()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            calls,
            vec![
                ("tc2".to_string(), "{\"y\":2}".to_string()),
                ("tc1".to_string(), "{\"x\":1}".to_string()),
            ]
        );
    }
}
