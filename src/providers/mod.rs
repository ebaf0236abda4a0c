/*!
 * Model provider clients.
 *
 * A provider turns one prompt into one completion. It knows nothing about
 * languages or content; `translation::core::TranslationService` builds the
 * prompts and interprets the replies.
 * - Ollama: local server hosting the translategemma model
 * - OpenAI: any OpenAI-compatible chat completions endpoint
 * - Mock: scripted behavior for tests
 */

use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ProviderError;

/// Common trait for all model providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// HTTP client with the configured connect and read timeouts.
///
/// No retry layer sits on top: a timed out request is a failed request.
pub(crate) fn http_client(connection_timeout_secs: u64, read_timeout_secs: u64) -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(connection_timeout_secs))
        .timeout(Duration::from_secs(read_timeout_secs))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_default()
}

/// Read the body of a non-success response into an `ApiError`
pub(crate) async fn api_error(response: reqwest::Response) -> ProviderError {
    let status_code = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    ProviderError::ApiError { status_code, message }
}

pub mod mock;
pub mod ollama;
pub mod openai;
