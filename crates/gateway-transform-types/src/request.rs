use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::message::Message;
use crate::tool::{ToolChoice, ToolDefinition};

/// How generation output is shaped.
///
/// The gateway implements plain generation and the single-forced-tool mode
/// used for structured output; a JSON output mode is not available and is
/// rejected at request-build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationMode {
    #[default]
    Regular,
    /// Declare exactly one tool and force the model to call it.
    ForcedTool { tool: ToolDefinition },
    /// Unsupported by the gateway; kept so callers get a structured error.
    Json,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Regular => "regular",
            GenerationMode::ForcedTool { .. } => "forced_tool",
            GenerationMode::Json => "json",
        }
    }
}

/// Output format hint forwarded to the gateway (`text` or `json_object`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub r#type: String,
}

/// A generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "is_regular")]
    pub mode: GenerationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    /// Gateway-specific parameters merged verbatim into `model-params`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_params: Option<serde_json::Map<String, serde_json::Value>>,
}

fn is_regular(mode: &GenerationMode) -> bool {
    matches!(mode, GenerationMode::Regular)
}

impl Request {
    /// Validate that the request has the minimum required fields.
    pub fn validate(&self) -> Result<(), Error> {
        if self.model.trim().is_empty() {
            return Err(Error::configuration("Request model must not be empty"));
        }
        if self.messages.is_empty() {
            return Err(Error::configuration("Request messages must not be empty"));
        }
        if let Some(ref tools) = self.tools {
            for tool in tools {
                tool.validate()?;
            }
        }
        if let Some(ref tc) = self.tool_choice {
            tc.validate()?;
        }
        Ok(())
    }

    /// Builder-style setter for model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder-style setter for messages.
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Builder-style setter for the generation mode.
    pub fn mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder-style setter for tools.
    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Builder-style setter for tool_choice.
    pub fn tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }

    /// Builder-style setter for max_tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Builder-style setter for temperature.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Builder-style setter for top_p.
    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Builder-style setter for top_k.
    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Builder-style setter for frequency_penalty.
    pub fn frequency_penalty(mut self, frequency_penalty: f64) -> Self {
        self.frequency_penalty = Some(frequency_penalty);
        self
    }

    /// Builder-style setter for presence_penalty.
    pub fn presence_penalty(mut self, presence_penalty: f64) -> Self {
        self.presence_penalty = Some(presence_penalty);
        self
    }

    /// Builder-style setter for stop_sequences.
    pub fn stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = Some(stop_sequences);
        self
    }

    /// Builder-style setter for seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder-style setter for response_format.
    pub fn response_format(mut self, response_format: ResponseFormat) -> Self {
        self.response_format = Some(response_format);
        self
    }

    /// Builder-style setter for gateway-specific model parameters.
    pub fn model_params(mut self, model_params: serde_json::Map<String, serde_json::Value>) -> Self {
        self.model_params = Some(model_params);
        self
    }
}
