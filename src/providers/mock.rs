/*!
 * Scripted model provider.
 *
 * Answers prompts without a model server so the translation service can be
 * exercised end to end:
 * - `MockProvider::working()` echoes the prompt payload behind a marker
 * - `MockProvider::intermittent(n)` rejects every nth prompt
 * - `MockProvider::failing()` rejects every prompt
 * - `MockProvider::empty()` answers every prompt with nothing
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Marker prepended to echoed payloads
pub const ECHO_MARKER: &str = "[TRANSLATED]";

/// A prompt sent to the scripted provider
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub prompt: String,
}

impl MockRequest {
    /// The text after the prompt's instruction block
    pub fn payload(&self) -> &str {
        self.prompt
            .split_once("\n\n")
            .map(|(_, text)| text)
            .unwrap_or(&self.prompt)
    }
}

/// Completion produced by the scripted provider
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Echo,
    RejectEvery(usize),
    RejectAll,
    Silent,
}

/// Provider answering from a fixed script
#[derive(Debug, Clone)]
pub struct MockProvider {
    script: Script,
    /// Shared by clones so a test can keep a handle on the count
    prompts_seen: Arc<AtomicUsize>,
    reply_with: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    fn scripted(script: Script) -> Self {
        Self {
            script,
            prompts_seen: Arc::new(AtomicUsize::new(0)),
            reply_with: None,
        }
    }

    pub fn working() -> Self {
        Self::scripted(Script::Echo)
    }

    /// Reject the nth, 2nth, 3nth... prompt
    pub fn intermittent(every: usize) -> Self {
        Self::scripted(Script::RejectEvery(every))
    }

    pub fn failing() -> Self {
        Self::scripted(Script::RejectAll)
    }

    pub fn empty() -> Self {
        Self::scripted(Script::Silent)
    }

    /// Compute accepted replies with `reply` instead of echoing
    pub fn with_custom_response(mut self, reply: fn(&MockRequest) -> String) -> Self {
        self.reply_with = Some(reply);
        self
    }

    /// Number of prompts received so far, accepted or not
    pub fn request_count(&self) -> usize {
        self.prompts_seen.load(Ordering::SeqCst)
    }

    fn accept(&self, request: &MockRequest) -> MockResponse {
        let text = match self.reply_with {
            Some(reply) => reply(request),
            None => format!("{} {}", ECHO_MARKER, request.payload()),
        };
        MockResponse { text }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let seen = self.prompts_seen.fetch_add(1, Ordering::SeqCst) + 1;

        match self.script {
            Script::Echo => Ok(self.accept(&request)),
            Script::RejectEvery(every) if every > 0 && seen % every == 0 => {
                Err(ProviderError::ApiError {
                    status_code: 503,
                    message: format!("Scripted rejection of prompt #{}", seen),
                })
            }
            Script::RejectEvery(_) => Ok(self.accept(&request)),
            Script::RejectAll => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Scripted provider rejects every prompt".to_string(),
            }),
            Script::Silent => Ok(MockResponse { text: String::new() }),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        if self.script == Script::RejectAll {
            return Err(ProviderError::ConnectionError(
                "Scripted provider is unreachable".to_string(),
            ));
        }
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}
