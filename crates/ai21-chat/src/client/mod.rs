//! AI21 API client seam and its HTTP implementation.

mod error;
mod http;

use async_trait::async_trait;

use crate::chat::{CompletionsResponse, LegacyResponse, Params};

pub use error::ClientError;
pub use http::HttpClient;

/// Operations the chat adapters need from an AI21 client.
///
/// Parameters are passed through as-is; the client owns transport,
/// authentication and serialization.
#[async_trait]
pub trait Ai21Client: Send + Sync {
    /// J2 chat: `POST /{model}/chat`.
    async fn chat_create(&self, params: Params) -> Result<LegacyResponse, ClientError>;

    /// Jamba chat completions: `POST /chat/completions`.
    async fn chat_completions_create(
        &self,
        params: Params,
    ) -> Result<CompletionsResponse, ClientError>;
}
