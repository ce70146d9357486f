//! Wire types for the AI21 J2 and Jamba chat APIs.

use serde::{Deserialize, Serialize};

/// Request parameters forwarded untouched to the client.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Message role accepted by the provider. System content travels separately.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    User,
    Assistant,
}

impl RoleType {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleType::User => "user",
            RoleType::Assistant => "assistant",
        }
    }
}

/// A J2 chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacyMessage {
    pub role: RoleType,
    pub text: String,
}

/// A Jamba chat-completions message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionMessage {
    pub role: RoleType,
    pub content: String,
}

/// A message in one of the provider's wire shapes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ProviderMessage {
    Legacy(LegacyMessage),
    Completion(CompletionMessage),
}

impl ProviderMessage {
    pub fn role(&self) -> RoleType {
        match self {
            ProviderMessage::Legacy(m) => m.role,
            ProviderMessage::Completion(m) => m.role,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ProviderMessage::Legacy(m) => &m.text,
            ProviderMessage::Completion(m) => &m.content,
        }
    }

    /// JSON form as sent in a request body.
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            ProviderMessage::Legacy(m) => {
                serde_json::json!({"role": m.role.as_str(), "text": m.text})
            }
            ProviderMessage::Completion(m) => {
                serde_json::json!({"role": m.role.as_str(), "content": m.content})
            }
        }
    }
}

/// Output of [`Chat::convert_messages`](super::Chat::convert_messages).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Text of the leading system message, if one was present.
    pub system: Option<String>,
    pub messages: Vec<ProviderMessage>,
}

// ============================================================================
// J2 response
// ============================================================================

/// Response of the J2 `/{model}/chat` endpoint.
#[derive(Debug, Deserialize)]
pub struct LegacyResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub outputs: Vec<LegacyOutput>,
}

/// A single J2 output.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOutput {
    pub text: String,
    #[serde(default)]
    pub role: Option<RoleType>,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// J2 finish reason object.
#[derive(Debug, Deserialize)]
pub struct FinishReason {
    pub reason: String,
}

// ============================================================================
// Jamba response
// ============================================================================

/// Response of the Jamba `/chat/completions` endpoint.
#[derive(Debug, Deserialize)]
pub struct CompletionsResponse {
    pub id: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A single completion choice.
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: CompletionMessage,
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_serializes_inner_shape() {
        let legacy = ProviderMessage::Legacy(LegacyMessage {
            role: RoleType::User,
            text: "Hello!".to_string(),
        });
        let completion = ProviderMessage::Completion(CompletionMessage {
            role: RoleType::Assistant,
            content: "Hi".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&legacy).unwrap(),
            serde_json::json!({"role": "user", "text": "Hello!"})
        );
        assert_eq!(
            serde_json::to_value(&completion).unwrap(),
            serde_json::json!({"role": "assistant", "content": "Hi"})
        );
        assert_eq!(legacy.to_value(), serde_json::to_value(&legacy).unwrap());
        assert_eq!(
            completion.to_value(),
            serde_json::to_value(&completion).unwrap()
        );
    }

    #[test]
    fn test_legacy_response_deserialization() {
        let json = r#"{
            "id": "f1b3",
            "outputs": [
                {
                    "text": "Hello there",
                    "role": "assistant",
                    "finishReason": {"reason": "endoftext"}
                }
            ]
        }"#;

        let response: LegacyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id.as_deref(), Some("f1b3"));
        assert_eq!(response.outputs.len(), 1);
        assert_eq!(response.outputs[0].text, "Hello there");
        assert_eq!(response.outputs[0].role, Some(RoleType::Assistant));
        assert_eq!(
            response.outputs[0]
                .finish_reason
                .as_ref()
                .map(|r| r.reason.as_str()),
            Some("endoftext")
        );
    }

    #[test]
    fn test_completions_response_deserialization() {
        let json = r#"{
            "id": "chat-123",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": "Hello! How can I help you today?"
                    },
                    "finish_reason": "stop"
                }
            ],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 8,
                "total_tokens": 18
            }
        }"#;

        let response: CompletionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, "chat-123");
        assert_eq!(response.choices[0].message.role, RoleType::Assistant);
        assert_eq!(
            response.choices[0].message.content,
            "Hello! How can I help you today?"
        );
        assert_eq!(response.choices[0].finish_reason, Some("stop".to_string()));

        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 10);
        assert_eq!(usage.total_tokens, 18);
    }

    #[test]
    fn test_completions_response_without_usage() {
        let json = r#"{"id": "chat-456", "choices": []}"#;

        let response: CompletionsResponse = serde_json::from_str(json).unwrap();
        assert!(response.usage.is_none());
        assert!(response.choices.is_empty());
    }
}
