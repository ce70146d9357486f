//! Jamba chat-completions adapter.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::error::ChatError;
use super::types::{CompletionMessage, ConversionResult, Params, ProviderMessage, RoleType};
use super::{Chat, ChatKind, merge_params};
use crate::client::Ai21Client;
use crate::message::ChatMessage;

/// Adapter for the Jamba `/chat/completions` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatCompletions;

#[async_trait]
impl Chat for ChatCompletions {
    fn kind(&self) -> ChatKind {
        ChatKind::Completions
    }

    fn chat_message(&self, role: RoleType, content: String) -> ProviderMessage {
        ProviderMessage::Completion(CompletionMessage { role, content })
    }

    fn build_params(&self, model: &str, conversion: ConversionResult, extra: Params) -> Params {
        let mut messages = Vec::with_capacity(conversion.messages.len() + 1);
        // Jamba takes the system prompt as the first entry of the message list
        if let Some(system) = conversion.system {
            messages.push(serde_json::json!({"role": "system", "content": system}));
        }
        messages.extend(conversion.messages.iter().map(ProviderMessage::to_value));

        let mut params = Params::new();
        params.insert("model".to_string(), Value::String(model.to_string()));
        params.insert("messages".to_string(), Value::Array(messages));
        merge_params(params, extra)
    }

    async fn call(
        &self,
        client: &dyn Ai21Client,
        params: Params,
    ) -> Result<ChatMessage, ChatError> {
        let response = client.chat_completions_create(params).await?;
        debug!(
            id = %response.id,
            choices = response.choices.len(),
            "Received chat completions response"
        );

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ChatError::EmptyResponse)?;
        Ok(ChatMessage::assistant(choice.message.content))
    }
}
