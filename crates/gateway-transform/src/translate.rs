// Request-side translation: content part codec, message translator, and
// request builder. All pure and synchronous; errors abort before any I/O.

use serde_json::json;

use gateway_transform_types::{
    ContentPart, Error, GenerationMode, ImageData, ImageSource, Message, Request, Role, ToolChoice,
    ToolDefinition,
};

use crate::util::image::{base64_encode, encode_data_url, is_data_url};

/// Encode one image part into the gateway's `image_url` content part.
///
/// A URL passes through as the href. A base64 string becomes a data URL
/// unless it already carries the `data:` prefix; the media type falls back
/// to `image/jpeg` for strings and `image/png` for raw bytes.
pub(crate) fn encode_image_part(image: &ImageData) -> serde_json::Value {
    let url = match &image.source {
        ImageSource::Url(href) => href.clone(),
        ImageSource::Base64(data) if is_data_url(data) => data.clone(),
        ImageSource::Base64(data) => {
            let media_type = image.media_type.as_deref().unwrap_or("image/jpeg");
            encode_data_url(media_type, data)
        }
        ImageSource::Bytes(bytes) => {
            let media_type = image.media_type.as_deref().unwrap_or("image/png");
            encode_data_url(media_type, &base64_encode(bytes))
        }
    };
    json!({"type": "image_url", "image_url": {"url": url}})
}

/// Translate a conversation into the gateway's wire message list.
///
/// Order-preserving; one wire message per source message, except tool
/// messages which expand to one wire message per tool-result part. Any
/// untranslatable role or part kind aborts the whole translation.
pub(crate) fn translate_messages(messages: &[Message]) -> Result<Vec<serde_json::Value>, Error> {
    let mut wire: Vec<serde_json::Value> = Vec::new();

    for msg in messages {
        match msg.role {
            Role::System => {
                for part in &msg.content {
                    if !matches!(part, ContentPart::Text { .. }) {
                        return Err(Error::unsupported_content_part(
                            msg.role.as_str(),
                            part.kind().as_str(),
                        ));
                    }
                }
                wire.push(json!({
                    "role": "system",
                    "content": msg.text(),
                }));
            }
            Role::User => {
                wire.push(json!({
                    "role": "user",
                    "content": translate_user_content(&msg.content)?,
                }));
            }
            Role::Assistant => {
                let mut text = String::new();
                let mut tool_calls: Vec<serde_json::Value> = Vec::new();

                for part in &msg.content {
                    match part {
                        ContentPart::Text { text: t } => text.push_str(t),
                        ContentPart::ToolCall { tool_call } => {
                            let arguments = serde_json::to_string(&tool_call.arguments)
                                .unwrap_or_else(|_| "{}".to_string());
                            tool_calls.push(json!({
                                "id": tool_call.id,
                                "type": "function",
                                "function": {
                                    "name": tool_call.name,
                                    "arguments": arguments,
                                }
                            }));
                        }
                        other => {
                            return Err(Error::unsupported_content_part(
                                msg.role.as_str(),
                                other.kind().as_str(),
                            ));
                        }
                    }
                }

                let mut assistant_msg = json!({
                    "role": "assistant",
                    "content": text,
                });
                // Key absence, not an empty array, signals "no tool calls".
                if !tool_calls.is_empty() {
                    assistant_msg["tool_calls"] = json!(tool_calls);
                }
                wire.push(assistant_msg);
            }
            Role::Tool => {
                // One wire message per tool result.
                for part in &msg.content {
                    match part {
                        ContentPart::ToolResult { tool_result } => {
                            let content = serde_json::to_string(&tool_result.result)
                                .unwrap_or_default();
                            wire.push(json!({
                                "role": "tool",
                                "content": content,
                                "tool_call_id": tool_result.tool_call_id,
                            }));
                        }
                        other => {
                            return Err(Error::unsupported_content_part(
                                msg.role.as_str(),
                                other.kind().as_str(),
                            ));
                        }
                    }
                }
            }
            Role::Developer => {
                return Err(Error::unsupported_role(msg.role.as_str()));
            }
        }
    }

    Ok(wire)
}

/// Translate user content parts.
///
/// All-text content collapses to one concatenated string (a message with no
/// parts is treated as an empty text message); any image forces array form.
fn translate_user_content(parts: &[ContentPart]) -> Result<serde_json::Value, Error> {
    let mut has_image = false;
    for part in parts {
        match part {
            ContentPart::Text { .. } => {}
            ContentPart::Image { .. } => has_image = true,
            other => {
                return Err(Error::unsupported_content_part(
                    "user",
                    other.kind().as_str(),
                ));
            }
        }
    }

    if !has_image {
        let text: String = parts
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        return Ok(json!(text));
    }

    let content: Vec<serde_json::Value> = parts
        .iter()
        .map(|part| match part {
            ContentPart::Text { text } => json!({"type": "text", "text": text}),
            ContentPart::Image { image } => encode_image_part(image),
            _ => unreachable!("non-text/image parts rejected above"),
        })
        .collect();
    Ok(json!(content))
}

/// Build the full gateway request body.
///
/// Always emits `model`, `task`, `model-params`, and the `streaming` flag;
/// sampling parameters appear only when explicitly supplied.
pub(crate) fn build_request_body(
    request: &Request,
    streaming: bool,
) -> Result<serde_json::Value, Error> {
    let (tools, tool_choice): (Option<Vec<ToolDefinition>>, Option<ToolChoice>) =
        match &request.mode {
            GenerationMode::Regular => (request.tools.clone(), request.tool_choice.clone()),
            GenerationMode::ForcedTool { tool } => (
                Some(vec![tool.clone()]),
                Some(ToolChoice::named(&tool.name)),
            ),
            GenerationMode::Json => {
                return Err(Error::unsupported_mode(request.mode.as_str()));
            }
        };

    let mut params = serde_json::Map::new();
    params.insert("messages".into(), json!(translate_messages(&request.messages)?));

    if let Some(max_tokens) = request.max_tokens {
        params.insert("max_tokens".into(), json!(max_tokens));
    }
    if let Some(temperature) = request.temperature {
        params.insert("temperature".into(), json!(temperature));
    }
    if let Some(top_p) = request.top_p {
        params.insert("top_p".into(), json!(top_p));
    }
    if let Some(top_k) = request.top_k {
        params.insert("top_k".into(), json!(top_k));
    }
    if let Some(frequency_penalty) = request.frequency_penalty {
        params.insert("frequency_penalty".into(), json!(frequency_penalty));
    }
    if let Some(presence_penalty) = request.presence_penalty {
        params.insert("presence_penalty".into(), json!(presence_penalty));
    }
    if let Some(ref stop) = request.stop_sequences {
        params.insert("stop".into(), json!(stop));
    }
    if let Some(seed) = request.seed {
        params.insert("seed".into(), json!(seed));
    }
    if let Some(ref fmt) = request.response_format {
        params.insert("response_format".into(), json!({"type": fmt.r#type}));
    }

    if let Some(tools) = tools {
        let tool_defs: Vec<serde_json::Value> = tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {
                        "name": t.name,
                        "description": t.description,
                        "parameters": t.parameters,
                    }
                })
            })
            .collect();
        params.insert("tools".into(), json!(tool_defs));
    }

    if let Some(ref tc) = tool_choice {
        let choice_val = match tc.mode.as_str() {
            "auto" => json!("auto"),
            "none" => json!("none"),
            "required" => json!("required"),
            "named" => match tc.tool_name {
                Some(ref name) => json!({"type": "function", "function": {"name": name}}),
                None => json!("auto"),
            },
            _ => json!("auto"),
        };
        params.insert("tool_choice".into(), choice_val);
    }

    // Gateway-specific passthrough merges last, on purpose.
    if let Some(ref extra) = request.model_params {
        for (k, v) in extra {
            params.insert(k.clone(), v.clone());
        }
    }

    Ok(json!({
        "model": request.model,
        "task": "chat/completions",
        "model-params": params,
        "streaming": streaming,
    }))
}
