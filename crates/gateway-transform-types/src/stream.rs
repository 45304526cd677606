use serde::Serialize;

use crate::error::{Error, ErrorKind};
use crate::response::{FinishReason, Usage};

/// Error payload carried on `StreamPart::Error`.
///
/// A malformed chunk surfaces as one of these without terminating the
/// stream, so the payload is a serializable snapshot rather than the full
/// `Error` (which owns a non-cloneable source chain).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamError {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl StreamError {
    /// A chunk that failed wire-schema validation.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
            retryable: false,
        }
    }

    /// Snapshot an `Error` for stream emission.
    pub fn from_error(error: &Error) -> Self {
        Self {
            kind: error.kind,
            message: error.message.clone(),
            retryable: error.retryable,
        }
    }
}

/// One unit of streamed output, emitted in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamPart {
    /// Incremental assistant text. May be empty on the turn-start chunk.
    TextDelta { text: String },
    /// One argument fragment for an in-flight tool call.
    ToolCallDelta {
        id: String,
        name: String,
        args_text_delta: String,
    },
    /// A completed tool call with its full accumulated argument text.
    ToolCall {
        id: String,
        name: String,
        arguments: String,
    },
    /// Terminal part for a choice: mapped finish reason plus usage counters.
    Finish {
        finish_reason: FinishReason,
        usage: Usage,
    },
    /// A malformed chunk; the stream continues afterwards.
    Error { error: StreamError },
}
