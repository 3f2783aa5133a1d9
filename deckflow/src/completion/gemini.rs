//! Gemini-backed completion client.
//!
//! Boundary adapter only: maps [`GenerationParams`] onto the provider's
//! generation config and pulls the first candidate's text back out.
//! Retry and fallback policy live in the stage layer, not here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CompletionClient;
use crate::config::GenerationParams;
use crate::errors::CompletionUnavailable;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Configuration for the Gemini client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; read from `GEMINI_API_KEY` when constructed from the
    /// environment.
    pub api_key: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl GeminiConfig {
    /// Creates a configuration with the given key and default model.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }

    /// Reads the API key from `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Fails when the variable is unset.
    pub fn from_env() -> Result<Self, CompletionUnavailable> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| CompletionUnavailable::new("GEMINI_API_KEY is not set"))?;
        Ok(Self::new(api_key))
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// A [`CompletionClient`] speaking the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiCompletionClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiCompletionClient {
    /// Creates a client from a configuration.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, self.config.api_key
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, CompletionUnavailable> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": params.temperature,
                "topP": params.top_p,
                "maxOutputTokens": params.max_output_tokens,
            },
        });

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionUnavailable::new(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionUnavailable::new(format!(
                "provider returned {status}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CompletionUnavailable::new(format!("unreadable response body: {e}")))?;

        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| CompletionUnavailable::new("response carried no candidate text"))?;

        debug!(model = %self.config.model, chars = text.len(), "completion received");
        Ok(text.to_string())
    }
}
