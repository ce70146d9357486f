//! Provider-neutral chat messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A role-tagged turn in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: MessageContent,
}

/// The author of a neutral message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    Human,
    Assistant,
    Tool,
    /// Free-form role name produced by the surrounding conversation layer.
    #[serde(untagged)]
    Other(String),
}

/// Message payload: plain text or a list of structured content blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<serde_json::Value>),
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<MessageContent>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<MessageContent>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn human(content: impl Into<MessageContent>) -> Self {
        Self::new(MessageRole::Human, content)
    }

    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Returns the text payload, or `None` for structured content.
    pub fn text(&self) -> Option<&str> {
        self.content.as_text()
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            MessageContent::Text(text) => write!(f, "{}(content={text:?})", self.role),
            MessageContent::Blocks(blocks) => {
                write!(f, "{}(content=<{} blocks>)", self.role, blocks.len())
            }
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => f.write_str("system"),
            MessageRole::Human => f.write_str("human"),
            MessageRole::Assistant => f.write_str("assistant"),
            MessageRole::Tool => f.write_str("tool"),
            MessageRole::Other(name) => f.write_str(name),
        }
    }
}

impl MessageContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Blocks(_) => None,
        }
    }

    /// Short name of the payload kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            MessageContent::Text(_) => "text",
            MessageContent::Blocks(_) => "content blocks",
        }
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<Vec<serde_json::Value>> for MessageContent {
    fn from(blocks: Vec<serde_json::Value>) -> Self {
        MessageContent::Blocks(blocks)
    }
}
