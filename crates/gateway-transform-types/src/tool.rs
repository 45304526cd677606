use serde::{Deserialize, Serialize};

/// Tool declaration sent to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema for the arguments; must be an object schema at the root.
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Validate the tool name (`[a-zA-Z][a-zA-Z0-9_]{0,63}`) and that the
    /// parameter schema is an object schema.
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        if self.name.is_empty() || self.name.len() > 64 {
            return Err(crate::error::Error::configuration(format!(
                "Tool name '{}' must be 1-64 characters",
                self.name
            )));
        }
        let valid = self.name.chars().enumerate().all(|(i, c)| {
            if i == 0 {
                c.is_ascii_alphabetic()
            } else {
                c.is_ascii_alphanumeric() || c == '_'
            }
        });
        if !valid {
            return Err(crate::error::Error::configuration(format!(
                "Tool name '{}' must match [a-zA-Z][a-zA-Z0-9_]{{0,63}}",
                self.name
            )));
        }

        match self.parameters.as_object() {
            Some(obj) if obj.get("type").and_then(|v| v.as_str()) == Some("object") => Ok(()),
            Some(_) => Err(crate::error::Error::configuration(
                "Tool parameters must have \"type\": \"object\" at root",
            )),
            None => Err(crate::error::Error::configuration(
                "Tool parameters must be a JSON object",
            )),
        }
    }
}

/// Tool choice configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolChoice {
    /// One of "auto", "none", "required", "named".
    pub mode: String,
    /// Required when mode is "named".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

const VALID_TOOL_CHOICE_MODES: &[&str] = &["auto", "none", "required", "named"];

impl ToolChoice {
    pub fn auto() -> Self {
        Self {
            mode: "auto".into(),
            tool_name: None,
        }
    }

    pub fn named(tool_name: impl Into<String>) -> Self {
        Self {
            mode: "named".into(),
            tool_name: Some(tool_name.into()),
        }
    }

    /// Validate that the mode is recognized and "named" carries a tool name.
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        if !VALID_TOOL_CHOICE_MODES.contains(&self.mode.as_str()) {
            return Err(crate::error::Error::configuration(format!(
                "Unknown tool choice mode '{}'",
                self.mode
            )));
        }
        if self.mode == "named" && self.tool_name.is_none() {
            return Err(crate::error::Error::configuration(
                "ToolChoice mode \"named\" requires tool_name to be set",
            ));
        }
        Ok(())
    }
}

/// A tool call decoded from a gateway response.
///
/// `arguments` is the raw, unparsed argument text exactly as the gateway
/// produced it; argument parsing is a caller concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}
