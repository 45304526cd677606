use serde::{Deserialize, Serialize};

use crate::content::{ContentPart, ToolResultData};

/// Message roles in the generic conversation model.
///
/// `Developer` exists in the model but has no gateway representation;
/// translation rejects it. Keeping it in the enum forces every role match
/// to handle the untranslatable case explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    Developer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
            Role::Developer => "developer",
        }
    }
}

/// The fundamental unit of conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentPart>,
}

impl Message {
    /// Convenience: create a system message from text.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: vec![ContentPart::text(text)],
        }
    }

    /// Convenience: create a user message from text.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentPart::text(text)],
        }
    }

    /// Convenience: create an assistant message from text.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentPart::text(text)],
        }
    }

    /// Convenience: create a tool message carrying one result.
    pub fn tool_result(tool_call_id: impl Into<String>, result: serde_json::Value) -> Self {
        Self {
            role: Role::Tool,
            content: vec![ContentPart::ToolResult {
                tool_result: ToolResultData {
                    tool_call_id: tool_call_id.into(),
                    result,
                    is_error: false,
                },
            }],
        }
    }

    /// Concatenate text from all text content parts, in order, no separator.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_roundtrip() {
        for (role, expected_json) in [
            (Role::System, "\"system\""),
            (Role::User, "\"user\""),
            (Role::Assistant, "\"assistant\""),
            (Role::Tool, "\"tool\""),
            (Role::Developer, "\"developer\""),
        ] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, expected_json);
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Developer.as_str(), "developer");
        assert_eq!(Role::Tool.as_str(), "tool");
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Message::system("a").role, Role::System);
        assert_eq!(Message::user("b").role, Role::User);
        assert_eq!(Message::assistant("c").role, Role::Assistant);
        let tool = Message::tool_result("tc1", serde_json::json!({"ok": true}));
        assert_eq!(tool.role, Role::Tool);
    }

    #[test]
    fn test_text_concatenates_in_order_without_separator() {
        let msg = Message {
            role: Role::User,
            content: vec![ContentPart::text("Hello"), ContentPart::text(" world")],
        };
        assert_eq!(msg.text(), "Hello world");
    }

    #[test]
    fn test_text_ignores_non_text_parts() {
        let msg = Message {
            role: Role::User,
            content: vec![
                ContentPart::text("before"),
                ContentPart::image_url("https://example.com/x.png"),
                ContentPart::text("after"),
            ],
        };
        assert_eq!(msg.text(), "beforeafter");
    }

    #[test]
    fn test_text_empty_when_no_parts() {
        let msg = Message {
            role: Role::User,
            content: vec![],
        };
        assert_eq!(msg.text(), "");
    }

    #[test]
    fn test_message_serde_roundtrip() {
        let msg = Message::user("Hi");
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
