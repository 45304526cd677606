use serde::{Deserialize, Serialize};

use crate::tool::ToolCall;

/// Why generation stopped, normalized to a fixed generic set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    Unknown,
}

/// Token usage counters.
///
/// Absent counters are `f64::NAN`, never zero — callers can tell "the
/// gateway reported nothing" apart from "the gateway reported 0".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Usage {
    pub prompt_tokens: f64,
    pub completion_tokens: f64,
}

impl Usage {
    /// Usage with both counters set to the not-a-number sentinel.
    pub fn missing() -> Self {
        Self {
            prompt_tokens: f64::NAN,
            completion_tokens: f64::NAN,
        }
    }

    /// True when neither counter was reported.
    pub fn is_missing(&self) -> bool {
        self.prompt_tokens.is_nan() && self.completion_tokens.is_nan()
    }
}

/// The decoded result of a non-streaming generation call.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Assistant text, when the gateway produced any.
    pub text: Option<String>,
    /// Tool calls in gateway order, arguments left as raw strings.
    pub tool_calls: Vec<ToolCall>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
    /// The raw response body, for callers that need gateway extras.
    pub raw: Option<serde_json::Value>,
}
