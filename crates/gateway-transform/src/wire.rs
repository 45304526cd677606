// Wire-format structs for gateway responses, plus decoding.
//
// Typed deserialization through serde is the schema-validation step:
// a payload that fails to deserialize failed validation.

use serde::Deserialize;

use gateway_transform_types::{Error, GenerationResult, ToolCall, Usage};

use crate::finish::map_finish_reason;
use crate::util::http::parse_retry_after;

pub(crate) const PROVIDER_NAME: &str = "gateway-transform";

// === Non-streaming response ===

#[derive(Debug, Deserialize)]
pub(crate) struct GatewayResponse {
    #[serde(default)]
    pub choices: Vec<ResponseChoice>,
    pub usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseChoice {
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireToolCall {
    pub id: String,
    pub function: WireFunction,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireFunction {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUsage {
    pub prompt_tokens: Option<f64>,
    pub completion_tokens: Option<f64>,
}

impl WireUsage {
    /// Absent counters become the NaN sentinel, never zero.
    pub(crate) fn to_usage(opt: Option<&WireUsage>) -> Usage {
        match opt {
            Some(u) => Usage {
                prompt_tokens: u.prompt_tokens.unwrap_or(f64::NAN),
                completion_tokens: u.completion_tokens.unwrap_or(f64::NAN),
            },
            None => Usage::missing(),
        }
    }
}

// === Streaming chunks ===

#[derive(Debug, Deserialize)]
pub(crate) struct GatewayChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    pub usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChunkChoice {
    pub delta: Option<ChunkDelta>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChunkDelta {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCallDelta>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToolCallDelta {
    /// Position within the turn; continuation deltas may rely on array order
    /// instead of carrying this.
    pub index: Option<usize>,
    pub id: Option<String>,
    pub function: Option<FunctionDelta>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FunctionDelta {
    pub name: Option<String>,
    pub arguments: Option<String>,
}

// === Decoding ===

/// Decode a complete gateway response into a generic result.
pub(crate) fn decode_response(raw: serde_json::Value) -> Result<GenerationResult, Error> {
    let response: GatewayResponse = serde_json::from_value(raw.clone())
        .map_err(|e| Error::validation(format!("Response failed validation: {e}")))?;

    let choice = response.choices.into_iter().next().ok_or_else(Error::no_choice)?;

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| ToolCall {
            id: tc.id,
            name: tc.function.name,
            arguments: tc.function.arguments,
        })
        .collect();

    Ok(GenerationResult {
        text: choice.message.content,
        tool_calls,
        finish_reason: map_finish_reason(choice.finish_reason.as_deref()),
        usage: WireUsage::to_usage(response.usage.as_ref()),
        raw: Some(raw),
    })
}

// === Error bodies ===

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: GatewayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorDetail {
    message: String,
    #[allow(dead_code)]
    r#type: Option<String>,
    code: Option<String>,
}

/// Parse an HTTP error response from the gateway into a structured error.
pub(crate) fn parse_error(
    status: u16,
    headers: &reqwest::header::HeaderMap,
    body: serde_json::Value,
) -> Error {
    let parsed: Option<GatewayErrorBody> = serde_json::from_value(body.clone()).ok();
    let (message, code) = match parsed {
        Some(b) => (b.error.message, b.error.code),
        None => (format!("HTTP {status}"), None),
    };

    let retry_after = parse_retry_after(headers);

    let mut err = Error::from_http_status(status, message, PROVIDER_NAME, Some(body), retry_after);
    err.error_code = code;
    err
}
