//! Chat adapters for the AI21 J2 and Jamba wire formats.
//!
//! A [`Chat`] adapter turns neutral [`ChatMessage`]s into provider messages,
//! pulling out a leading system message, and calls the provider through an
//! [`Ai21Client`]. Two adapters exist:
//!
//! - [`LegacyChat`]: J2 models, messages carry `text`, system prompt is a
//!   top-level `system` field.
//! - [`ChatCompletions`]: Jamba models, messages carry `content`, system
//!   prompt is a leading `system` entry in the message list.
//!
//! Use [`chat_adapter`] to pick one from a model name.

mod completions;
mod error;
mod legacy;
mod types;

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::client::Ai21Client;
use crate::message::{ChatMessage, MessageContent, MessageRole};

pub use completions::ChatCompletions;
pub use error::ChatError;
pub use legacy::LegacyChat;
pub use types::{
    Choice, CompletionMessage, CompletionsResponse, ConversionResult, FinishReason, LegacyMessage,
    LegacyOutput, LegacyResponse, Params, ProviderMessage, RoleType, Usage,
};

/// Which wire format an adapter speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Legacy,
    Completions,
}

impl fmt::Display for ChatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatKind::Legacy => f.write_str("j2-chat"),
            ChatKind::Completions => f.write_str("chat-completions"),
        }
    }
}

/// Conversion contract shared by both AI21 wire formats.
#[async_trait]
pub trait Chat: Send + Sync {
    fn kind(&self) -> ChatKind;

    /// Build a provider message in this adapter's wire shape.
    fn chat_message(&self, role: RoleType, content: String) -> ProviderMessage;

    /// Assemble request parameters for this adapter's endpoint.
    ///
    /// Keys in `extra` are applied last and win over generated ones.
    fn build_params(&self, model: &str, conversion: ConversionResult, extra: Params) -> Params;

    /// Call the provider and return the first choice as an assistant message.
    async fn call(&self, client: &dyn Ai21Client, params: Params)
    -> Result<ChatMessage, ChatError>;

    /// Split `messages` into an optional leading system prompt and provider messages.
    fn convert_messages(&self, messages: &[ChatMessage]) -> Result<ConversionResult, ChatError> {
        let mut system = None;
        let mut converted = Vec::with_capacity(messages.len());

        for (i, message) in messages.iter().enumerate() {
            if message.role == MessageRole::System {
                if i != 0 {
                    return Err(ChatError::InvalidMessageOrder { index: i });
                }
                system = Some(system_text(message)?);
            } else {
                converted.push(self.convert_message(message)?);
            }
        }

        debug!(
            kind = %self.kind(),
            has_system = system.is_some(),
            messages = converted.len(),
            "Converted chat messages"
        );

        Ok(ConversionResult {
            system,
            messages: converted,
        })
    }

    /// Map one non-system message to the provider shape.
    fn convert_message(&self, message: &ChatMessage) -> Result<ProviderMessage, ChatError> {
        let role = match message.role {
            MessageRole::Human => RoleType::User,
            MessageRole::Assistant => RoleType::Assistant,
            _ => {
                return Err(ChatError::UnsupportedRole {
                    message: message.to_string(),
                });
            }
        };

        let content = match &message.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Blocks(_) => {
                return Err(ChatError::UnsupportedContent {
                    message: message.to_string(),
                });
            }
        };

        Ok(self.chat_message(role, content))
    }
}

fn system_text(message: &ChatMessage) -> Result<String, ChatError> {
    match &message.content {
        MessageContent::Text(text) => Ok(text.clone()),
        other => Err(ChatError::InvalidSystemContent {
            found: other.kind_name(),
        }),
    }
}

/// Select the adapter for a model name: `j2*` speaks the J2 format,
/// `jamba*` speaks chat completions.
pub fn chat_adapter(model: &str) -> Result<Box<dyn Chat>, ChatError> {
    let name = model.to_ascii_lowercase();
    if name.starts_with("j2") {
        Ok(Box::new(LegacyChat))
    } else if name.starts_with("jamba") {
        Ok(Box::new(ChatCompletions))
    } else {
        Err(ChatError::UnsupportedModel(model.to_string()))
    }
}

/// Insert generated keys, then overlay the caller's keys.
fn merge_params(mut generated: Params, extra: Params) -> Params {
    generated.extend(extra);
    generated
}
