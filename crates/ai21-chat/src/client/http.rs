//! HTTP client for the AI21 Studio API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::Ai21Client;
use super::error::{ClientError, check_response_error};
use crate::chat::{CompletionsResponse, LegacyResponse, Params};
use crate::config::ApiConfig;

/// AI21 Studio client over HTTP.
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpClient {
    #[must_use]
    pub fn new(client: Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Build a client from configuration, applying the request timeout.
    pub fn from_config(config: &ApiConfig, api_key: Option<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Ok(Self::new(client, config.base_url.clone(), api_key))
    }

    async fn post<T: DeserializeOwned>(&self, url: &str, body: &Params) -> Result<T, ClientError> {
        debug!(url, "Sending AI21 request");

        let mut req = self
            .client
            .post(url)
            .header("Content-Type", "application/json");

        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let response = req.json(body).send().await?;

        if let Some(err) = check_response_error(&response) {
            return Err(err);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Ai21Client for HttpClient {
    async fn chat_create(&self, mut params: Params) -> Result<LegacyResponse, ClientError> {
        let model = match params.remove("model") {
            Some(serde_json::Value::String(model)) => model,
            _ => return Err(ClientError::MissingModel),
        };
        let url = format!("{}/{}/chat", self.base_url, model);
        self.post(&url, &params).await
    }

    async fn chat_completions_create(
        &self,
        params: Params,
    ) -> Result<CompletionsResponse, ClientError> {
        let url = format!("{}/chat/completions", self.base_url);
        self.post(&url, &params).await
    }
}
