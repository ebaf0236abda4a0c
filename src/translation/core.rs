/*!
 * Provider-backed translation service.
 *
 * `TranslationService` turns a `TranslationRequest` into a prompt for the
 * configured model, sends it once and trims the reply. It owns the
 * supported-language table and validates every direction against it.
 */

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, error};
use serde::Serialize;
use url::Url;

use super::backend::{SupportedLanguages, TranslationBackend};
use super::results::{ContentKind, TranslationRequest};
use crate::app_config::{Config, TranslationCommonConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils::get_language_name;
use crate::providers::Provider;
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};

const SERVICE_NAME: &str = "Sitelingo Translation Service";

/// Reply used when the model does not answer with a two-letter code
pub const UNKNOWN_LANGUAGE: &str = "UNKNOWN";

/// Parse an endpoint, accepting a bare `host:port`
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    if endpoint.is_empty() {
        return Err(anyhow!("Endpoint cannot be empty"));
    }

    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)?
    } else {
        Url::parse(&format!("http://{}", endpoint))?
    };

    if url.host_str().is_none() {
        return Err(anyhow!("Invalid host in endpoint: {}", endpoint));
    }
    Ok(url)
}

/// Translation provider implementation variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// Ollama server
    Ollama { client: Ollama },
    /// OpenAI-compatible API
    OpenAI { client: OpenAI },
    /// Scripted provider
    Mock { client: MockProvider },
}

/// Name and attribution of the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub label: String,
    pub attribution: String,
}

/// Translation backend driving a language model
#[derive(Debug)]
pub struct TranslationService {
    provider: TranslationProviderImpl,
    provider_name: String,
    model: String,
    enabled: bool,
    common: TranslationCommonConfig,
}

impl TranslationService {
    /// Create a service for the active provider of `config`
    pub fn new(config: &Config) -> Result<Self> {
        let translation = &config.translation;
        let endpoint = parse_endpoint(&translation.get_endpoint())?;
        let (connect_timeout, read_timeout) = translation.get_timeouts();

        let provider = match translation.provider {
            ConfigTranslationProvider::Ollama => TranslationProviderImpl::Ollama {
                client: Ollama::new_with_config(endpoint.as_str(), connect_timeout, read_timeout),
            },
            ConfigTranslationProvider::OpenAI => TranslationProviderImpl::OpenAI {
                client: OpenAI::new_with_config(
                    translation.get_api_key(),
                    endpoint.as_str(),
                    connect_timeout,
                    read_timeout,
                ),
            },
        };

        Ok(Self {
            provider,
            provider_name: translation.provider.display_name().to_string(),
            model: translation.get_model(),
            enabled: config.enabled,
            common: translation.common.clone(),
        })
    }

    /// Create a service answering from a mock provider
    pub fn with_mock(client: MockProvider, common: TranslationCommonConfig) -> Self {
        Self {
            provider: TranslationProviderImpl::Mock { client },
            provider_name: "Mock".to_string(),
            model: "mock".to_string(),
            enabled: true,
            common,
        }
    }

    /// Enable or disable the service
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            name: SERVICE_NAME.to_string(),
            label: format!("{} ({})", self.model, self.provider_name),
            attribution: format!("Powered by {}", self.model),
        }
    }

    /// Check that the provider answers
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.provider {
            TranslationProviderImpl::Ollama { client } => client.test_connection().await,
            TranslationProviderImpl::OpenAI { client } => client.test_connection().await,
            TranslationProviderImpl::Mock { client } => client.test_connection().await,
        }
    }

    fn translation_prompt(&self, request: &TranslationRequest, source_lang: &str) -> String {
        let languages = &self.common.supported_languages;
        format!(
            "Translate the following {} from {} to {}. \
             Preserve the original formatting and structure. \
             Respond with only the translated text, no explanations.\n\n{}",
            request.content_kind().describe(),
            get_language_name(source_lang, languages),
            get_language_name(request.target_lang(), languages),
            request.text()
        )
    }

    /// Send one prompt and return the raw completion
    async fn complete(&self, prompt: String) -> Result<String, ProviderError> {
        let temperature = self.common.temperature;
        debug!("Sending prompt of {} chars to {}", prompt.len(), self.provider_name);

        match &self.provider {
            TranslationProviderImpl::Ollama { client } => {
                let request = GenerationRequest::new(&self.model, prompt).temperature(temperature);
                let response = client.complete(request).await?;
                Ok(Ollama::extract_text(&response))
            }
            TranslationProviderImpl::OpenAI { client } => {
                let request = OpenAIRequest::new(&self.model)
                    .add_message("user", prompt)
                    .temperature(temperature);
                let response = client.complete(request).await?;
                Ok(OpenAI::extract_text(&response))
            }
            TranslationProviderImpl::Mock { client } => {
                let response = client.complete(MockRequest { prompt }).await?;
                Ok(MockProvider::extract_text(&response))
            }
        }
    }
}

#[async_trait]
impl TranslationBackend for TranslationService {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
        if !self.is_available() {
            return Err(TranslationError::BackendUnavailable);
        }

        let length = request.text().chars().count();
        let max = self.common.max_translation_length;
        if length > max {
            return Err(TranslationError::TextTooLong { length, max });
        }

        let source_lang = if request.source_lang().trim().is_empty() {
            self.detect_language(request.text(), request.content_kind())
                .await?
        } else {
            request.source_lang().to_string()
        };

        if !self.is_direction_supported(&source_lang, request.target_lang()) {
            return Err(TranslationError::UnsupportedLanguageDirection {
                source_lang,
                target_lang: request.target_lang().to_string(),
            });
        }

        let prompt = self.translation_prompt(request, &source_lang);
        let translated = self.complete(prompt).await.map_err(|e| {
            error!("Error translating {} chars to {}: {}", length, request.target_lang(), e);
            TranslationError::from(e)
        })?;

        let translated = translated.trim();
        if translated.is_empty() && !request.text().trim().is_empty() {
            error!("Model returned an empty translation to {}", request.target_lang());
            return Err(TranslationError::TranslationFailed("empty translation".to_string()));
        }
        Ok(translated.to_string())
    }

    async fn detect_language(
        &self,
        text: &str,
        _content_kind: ContentKind,
    ) -> Result<String, TranslationError> {
        if !self.is_available() {
            return Err(TranslationError::BackendUnavailable);
        }

        let prompt = format!(
            "Detect the language of this text and respond with only the ISO 639-1 language code.\n\n{}",
            text
        );
        let reply = self.complete(prompt).await.map_err(|e| {
            error!("Error detecting language: {}", e);
            TranslationError::DetectionFailed(e.to_string())
        })?;

        let code = reply.trim().to_lowercase();
        if code.chars().count() == 2 {
            Ok(code)
        } else {
            debug!("Detection reply is not a language code: {}", code);
            Ok(UNKNOWN_LANGUAGE.to_string())
        }
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    fn supported_languages(&self) -> SupportedLanguages {
        self.common.supported_languages.clone()
    }
}
