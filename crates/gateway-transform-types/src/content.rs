use serde::{Deserialize, Serialize};

/// Discriminator for content part variants, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Text,
    Image,
    ToolCall,
    ToolResult,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Image => "image",
            ContentKind::ToolCall => "tool_call",
            ContentKind::ToolResult => "tool_result",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single content part within a message. Tagged union on `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    Image { image: ImageData },
    ToolCall { tool_call: ToolCallData },
    ToolResult { tool_result: ToolResultData },
}

impl ContentPart {
    /// Convenience: create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// Convenience: create an image part referencing a remote URL.
    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::Image {
            image: ImageData::url(url),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ContentPart::Text { .. } => ContentKind::Text,
            ContentPart::Image { .. } => ContentKind::Image,
            ContentPart::ToolCall { .. } => ContentKind::ToolCall,
            ContentPart::ToolResult { .. } => ContentKind::ToolResult,
        }
    }
}

/// Image content. The enum guarantees exactly one source representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(flatten)]
    pub source: ImageSource,
    /// MIME type accompanying the source, when known (e.g. `image/png`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

/// The three supported image source representations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// Remote URL, or an already-assembled `data:` URL.
    Url(String),
    /// Base64-encoded image bytes, without a `data:` prefix.
    Base64(String),
    /// Raw image bytes.
    Bytes(Vec<u8>),
}

impl ImageData {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Url(url.into()),
            media_type: None,
        }
    }

    pub fn base64(data: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Base64(data.into()),
            media_type: None,
        }
    }

    pub fn bytes(data: Vec<u8>) -> Self {
        Self {
            source: ImageSource::Bytes(data),
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

/// A tool invocation requested by the assistant (request side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallData {
    pub id: String,
    pub name: String,
    /// Structured argument value; stringified during translation.
    pub arguments: serde_json::Value,
}

/// The result of executing a tool, fed back in a tool message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultData {
    pub tool_call_id: String,
    pub result: serde_json::Value,
    #[serde(default)]
    pub is_error: bool,
}
