//! J2 chat adapter.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::error::ChatError;
use super::types::{ConversionResult, LegacyMessage, Params, ProviderMessage, RoleType};
use super::{Chat, ChatKind, merge_params};
use crate::client::Ai21Client;
use crate::message::ChatMessage;

/// Adapter for the legacy J2 `/{model}/chat` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyChat;

#[async_trait]
impl Chat for LegacyChat {
    fn kind(&self) -> ChatKind {
        ChatKind::Legacy
    }

    fn chat_message(&self, role: RoleType, content: String) -> ProviderMessage {
        ProviderMessage::Legacy(LegacyMessage {
            role,
            text: content,
        })
    }

    fn build_params(&self, model: &str, conversion: ConversionResult, extra: Params) -> Params {
        let mut params = Params::new();
        params.insert("model".to_string(), Value::String(model.to_string()));
        params.insert(
            "messages".to_string(),
            Value::Array(conversion.messages.iter().map(ProviderMessage::to_value).collect()),
        );
        // J2 requires the field even without a system prompt.
        params.insert(
            "system".to_string(),
            Value::String(conversion.system.unwrap_or_default()),
        );
        merge_params(params, extra)
    }

    async fn call(
        &self,
        client: &dyn Ai21Client,
        params: Params,
    ) -> Result<ChatMessage, ChatError> {
        let response = client.chat_create(params).await?;
        debug!(outputs = response.outputs.len(), "Received J2 chat response");

        let output = response
            .outputs
            .into_iter()
            .next()
            .ok_or(ChatError::EmptyResponse)?;
        Ok(ChatMessage::assistant(output.text))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::chat::{CompletionsResponse, LegacyOutput, LegacyResponse};
    use crate::client::ClientError;

    /// Records the params it receives and replies with fixed outputs.
    struct StubClient {
        outputs: Vec<&'static str>,
        seen: Mutex<Option<Params>>,
    }

    impl StubClient {
        fn new(outputs: Vec<&'static str>) -> Self {
            Self {
                outputs,
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Ai21Client for StubClient {
        async fn chat_create(&self, params: Params) -> Result<LegacyResponse, ClientError> {
            *self.seen.lock().unwrap() = Some(params);
            Ok(LegacyResponse {
                id: Some("stub".to_string()),
                outputs: self
                    .outputs
                    .iter()
                    .map(|text| LegacyOutput {
                        text: text.to_string(),
                        role: Some(RoleType::Assistant),
                        finish_reason: None,
                    })
                    .collect(),
            })
        }

        async fn chat_completions_create(
            &self,
            _params: Params,
        ) -> Result<CompletionsResponse, ClientError> {
            panic!("J2 adapter must not call chat completions");
        }
    }

    struct FailingClient;

    #[async_trait]
    impl Ai21Client for FailingClient {
        async fn chat_create(&self, _params: Params) -> Result<LegacyResponse, ClientError> {
            Err(ClientError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        }

        async fn chat_completions_create(
            &self,
            _params: Params,
        ) -> Result<CompletionsResponse, ClientError> {
            Err(ClientError::RateLimit { retry_after: None })
        }
    }

    fn sample_params() -> Params {
        let mut params = Params::new();
        params.insert("model".to_string(), "j2-ultra".into());
        params.insert("numResults".to_string(), serde_json::json!(1));
        params.insert("system".to_string(), "be nice".into());
        params
    }

    #[tokio::test]
    async fn test_call_returns_first_output_and_forwards_params() {
        let client = StubClient::new(vec!["hi", "ignored"]);

        let reply = LegacyChat.call(&client, sample_params()).await.unwrap();
        assert_eq!(reply, ChatMessage::assistant("hi"));
        assert_eq!(client.seen.lock().unwrap().clone(), Some(sample_params()));
    }

    #[tokio::test]
    async fn test_call_with_no_outputs_is_empty_response() {
        let client = StubClient::new(Vec::new());

        let err = LegacyChat.call(&client, Params::new()).await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_call_propagates_client_error() {
        let err = LegacyChat
            .call(&FailingClient, Params::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ChatError::CallFailed(ClientError::Api { status: 500, .. })
        ));
    }

    #[test]
    fn test_build_params() {
        let conversion = LegacyChat
            .convert_messages(&[ChatMessage::system("Be brief."), ChatMessage::human("Hi")])
            .unwrap();

        let mut extra = Params::new();
        extra.insert("maxTokens".to_string(), serde_json::json!(64));

        let params = LegacyChat.build_params("j2-mid", conversion, extra);
        assert_eq!(
            Value::Object(params),
            serde_json::json!({
                "model": "j2-mid",
                "system": "Be brief.",
                "messages": [{"role": "user", "text": "Hi"}],
                "maxTokens": 64
            })
        );
    }

    #[test]
    fn test_build_params_without_system_sends_empty_string() {
        let conversion = LegacyChat
            .convert_messages(&[ChatMessage::human("Hi")])
            .unwrap();

        let params = LegacyChat.build_params("j2-mid", conversion, Params::new());
        assert_eq!(params["system"], "");
    }
}
