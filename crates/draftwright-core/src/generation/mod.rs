//! Client for the text-generation service
//!
//! One request per draft: no retries, no streaming, no client-side timeout
//! unless `generation.timeout_secs` is set.

mod prompt;
mod protocol;

pub use prompt::*;
pub use protocol::*;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::models::{Draft, GenerationResult};

/// Anything that can turn a draft into an email body
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce the email body for a draft, or a typed failure
    async fn generate_email(&self, draft: &Draft) -> Result<String>;
}

/// HTTP client for the messages endpoint
pub struct GenerationClient {
    client: Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    api_key: Option<String>,
    api_version: String,
}

impl GenerationClient {
    /// Create a client from config. The API key is read from the configured
    /// environment variable once, here.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let api_key = config.api_key();
        if api_key.is_none() {
            info!(
                "{} not set, sending unauthenticated requests to {}",
                config.api_key_env, config.endpoint
            );
        }

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_key,
            api_version: config.api_version.clone(),
        })
    }

    /// Override the API key
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Request body for a draft
    pub fn build_request(&self, draft: &Draft) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message::user(build_prompt(draft))],
        }
    }

    /// Issue the request and fold the outcome into a [`GenerationResult`]
    pub async fn generate(&self, draft: &Draft) -> GenerationResult {
        self.try_generate(draft).await.into()
    }

    /// Issue the request and return the generated text or a typed error.
    ///
    /// The body is interpreted whatever the HTTP status, so an error object
    /// on a 4xx/5xx still surfaces its message. A body that is not JSON is
    /// reported as [`Error::Network`].
    pub async fn try_generate(&self, draft: &Draft) -> Result<String> {
        let request_id = Uuid::new_v4();
        info!(
            "Generation {} started (tone: {}, reply: {})",
            request_id,
            draft.tone,
            draft.is_reply()
        );

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&self.build_request(draft));
        if let Some(key) = &self.api_key {
            request = request
                .header("x-api-key", key)
                .header("anthropic-version", &self.api_version);
        }

        let response = request.send().await.map_err(|e| {
            error!("Generation {} transport error: {}", request_id, e);
            Error::Network(e.to_string())
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            error!("Generation {} failed reading body: {}", request_id, e);
            Error::Network(e.to_string())
        })?;
        debug!("Generation {} got {} ({} bytes)", request_id, status, bytes.len());

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            error!("Generation {} returned non-JSON body ({}): {}", request_id, status, e);
            Error::Network(format!("non-JSON response with status {}", status))
        })?;

        match interpret_response(&body) {
            Ok(text) => {
                info!("Generation {} succeeded ({} chars)", request_id, text.len());
                Ok(text)
            }
            Err(e) => {
                warn!("Generation {} failed ({}): {}", request_id, status, e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Generator for GenerationClient {
    async fn generate_email(&self, draft: &Draft) -> Result<String> {
        self.try_generate(draft).await
    }
}
