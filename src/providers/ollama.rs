/*!
 * Client for an Ollama server's generate endpoint.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{api_error, http_client, Provider};

/// Ollama server hosting the translation model
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Server root without a trailing slash
    base_url: String,
    client: Client,
}

/// Body of a non-streaming `/api/generate` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    stream: bool,
}

/// Sampling options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Reply of `/api/generate`
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub model: String,
    /// The completion
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options: None,
            stream: false,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options = Some(GenerationOptions {
            temperature: Some(temperature),
        });
        self
    }
}

impl Ollama {
    /// Create a client for `endpoint` with explicit timeouts
    pub fn new_with_config(
        endpoint: impl Into<String>,
        connection_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Self {
        let endpoint = endpoint.into();
        let base_url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", endpoint.trim_end_matches('/'))
        };

        Self {
            base_url,
            client: http_client(connection_timeout_secs, read_timeout_secs),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate text from the Ollama API
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        debug!("Ollama generate: model={}, prompt_len={}", request.model, request.prompt.len());

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let err = api_error(response).await;
            error!("Ollama API error: {}", err);
            return Err(err);
        }

        let response_text = response.text().await?;
        serde_json::from_str::<GenerationResponse>(&response_text).map_err(|e| {
            let preview: String = response_text.chars().take(500).collect();
            error!("Failed to parse Ollama API response: {}. Raw response: {}", e, preview);
            ProviderError::ParseError(e.to_string())
        })
    }
}

#[async_trait]
impl Provider for Ollama {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.generate(request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.clone()
    }
}
