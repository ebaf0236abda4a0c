use async_trait::async_trait;
use log::error;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{api_error, http_client, Provider};

/// Client for OpenAI-compatible chat completion endpoints
#[derive(Debug, Clone)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL, e.g. `https://api.openai.com/v1`
    endpoint: String,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,
    /// The messages for the conversation
    messages: Vec<OpenAIMessage>,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    /// The generated message
    pub message: OpenAIMessage,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    /// Completion choices, the first one is used
    pub choices: Vec<OpenAIChoice>,
}

impl OpenAIRequest {
    /// Create a new request for `model`
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl OpenAI {
    /// Create a new client with explicit timeouts
    pub fn new_with_config(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        connection_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Self {
        Self {
            client: http_client(connection_timeout_secs, read_timeout_secs),
            api_key: api_key.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

/// Parse a completion body; a reply without choices is an error
fn parse_completion(body: &str) -> Result<OpenAIResponse, ProviderError> {
    let parsed: OpenAIResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::ParseError(e.to_string()))?;
    if parsed.choices.is_empty() {
        error!("OpenAI API returned no choices");
        return Err(ProviderError::ParseError("Response has no choices".to_string()));
    }
    Ok(parsed)
}

#[async_trait]
impl Provider for OpenAI {
    type Request = OpenAIRequest;
    type Response = OpenAIResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let response = self
            .client
            .post(self.completions_url())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = api_error(response).await;
            error!("OpenAI API error: {}", err);
            return Err(err);
        }

        let body = response.text().await?;
        parse_completion(&body)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(format!("{}/models", self.endpoint))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default()
    }
}
