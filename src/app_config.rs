use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default source language code (ISO 639-1)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Default target language code (ISO 639-1)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Default content category passed to the backend
    #[serde(default = "default_category")]
    pub category: String,

    /// Whether the translation backend is enabled at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Translation backend config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Which parts of the content tree are translated and how results are applied
    #[serde(default)]
    pub content: ContentConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Ollama (hosts translategemma locally)
    #[default]
    Ollama,
    // @provider: OpenAI-compatible chat completions endpoint
    OpenAI,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::OpenAI => "OpenAI",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::OpenAI => "openai".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Connect timeout seconds
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,

    // @field: Read timeout seconds
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                connection_timeout_secs: default_connection_timeout_secs(),
                read_timeout_secs: default_read_timeout_secs(),
            },
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                connection_timeout_secs: default_connection_timeout_secs(),
                read_timeout_secs: default_read_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Maximum length of text to translate in one request, in characters
    #[serde(default = "default_max_translation_length")]
    pub max_translation_length: usize,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Language codes the backend accepts, mapped to display names
    #[serde(default = "default_supported_languages")]
    pub supported_languages: BTreeMap<String, String>,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            max_translation_length: default_max_translation_length(),
            temperature: default_temperature(),
            supported_languages: default_supported_languages(),
        }
    }
}

/// How a component whose properties only partly translated is written back
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplyPolicy {
    /// A component is written only when every property translated
    #[default]
    AtomicPerNode,
    /// Every property that translated is written, failed ones are left alone
    BestEffort,
}

/// Content tree settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContentConfig {
    /// Property names eligible for translation, in dispatch order
    #[serde(default = "default_translatable_properties")]
    pub translatable_properties: Vec<String>,

    /// Component kinds whose properties are translated (substring match)
    #[serde(default = "default_translatable_component_types")]
    pub translatable_component_types: Vec<String>,

    /// Fixed asset metadata fields that are translated
    #[serde(default = "default_asset_metadata_fields")]
    pub asset_metadata_fields: Vec<String>,

    /// Prefix of custom asset metadata fields that are translated when textual
    #[serde(default = "default_custom_metadata_prefix")]
    pub custom_metadata_prefix: String,

    /// Write-back policy for partially translated components
    #[serde(default)]
    pub apply_policy: ApplyPolicy,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            translatable_properties: default_translatable_properties(),
            translatable_component_types: default_translatable_component_types(),
            asset_metadata_fields: default_asset_metadata_fields(),
            custom_metadata_prefix: default_custom_metadata_prefix(),
            apply_policy: ApplyPolicy::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "es".to_string()
}

fn default_category() -> String {
    "general".to_string()
}

fn default_true() -> bool {
    true
}

fn default_connection_timeout_secs() -> u64 {
    30
}

fn default_read_timeout_secs() -> u64 {
    60
}

fn default_max_translation_length() -> usize {
    5000
}

fn default_temperature() -> f32 {
    0.1
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ollama_model() -> String {
    "translategemma".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Languages the translategemma model handles well
pub fn default_supported_languages() -> BTreeMap<String, String> {
    [
        ("en", "English"),
        ("es", "Spanish"),
        ("fr", "French"),
        ("de", "German"),
        ("it", "Italian"),
        ("pt", "Portuguese"),
        ("ru", "Russian"),
        ("ja", "Japanese"),
        ("ko", "Korean"),
        ("zh", "Chinese"),
        ("ar", "Arabic"),
        ("hi", "Hindi"),
        ("nl", "Dutch"),
        ("sv", "Swedish"),
        ("da", "Danish"),
        ("no", "Norwegian"),
        ("fi", "Finnish"),
        ("pl", "Polish"),
        ("tr", "Turkish"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

fn default_translatable_properties() -> Vec<String> {
    [
        "jcr:title",
        "jcr:description",
        "text",
        "subtitle",
        "heading",
        "alt",
        "title",
        "label",
        "caption",
        "tooltip",
        "placeholder",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_translatable_component_types() -> Vec<String> {
    [
        "core/wcm/components/text/v2/text",
        "core/wcm/components/title/v2/title",
        "core/wcm/components/button/v1/button",
        "core/wcm/components/teaser/v1/teaser",
        "core/wcm/components/image/v2/image",
        "core/wcm/components/carousel/v1/carousel",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_asset_metadata_fields() -> Vec<String> {
    ["dc:title", "dc:description", "dc:subject"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_custom_metadata_prefix() -> String {
    "custom:".to_string()
}

impl Config {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        let supported = &self.translation.common.supported_languages;
        for code in [&self.source_language, &self.target_language] {
            if !supported.contains_key(&code.to_lowercase()) {
                return Err(anyhow!("Language '{}' is not in supported_languages", code));
            }
        }

        if self.translation.common.max_translation_length == 0 {
            return Err(anyhow!("max_translation_length must be greater than zero"));
        }

        if self.translation.get_endpoint().is_empty() {
            return Err(anyhow!(
                "An endpoint is required for the {} provider",
                self.translation.provider.display_name()
            ));
        }

        if self.translation.provider == TranslationProvider::OpenAI
            && self.translation.get_api_key().is_empty()
        {
            return Err(anyhow!("Translation API key is required for OpenAI provider"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            category: default_category(),
            enabled: true,
            translation: TranslationConfig::default(),
            content: ContentConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TranslationProvider::Ollama => default_ollama_model(),
            TranslationProvider::OpenAI => default_openai_model(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::Ollama => default_ollama_endpoint(),
            TranslationProvider::OpenAI => default_openai_endpoint(),
        }
    }

    /// Connect and read timeouts of the active provider, in seconds
    pub fn get_timeouts(&self) -> (u64, u64) {
        self.get_active_provider_config()
            .map(|p| (p.connection_timeout_secs, p.read_timeout_secs))
            .unwrap_or((default_connection_timeout_secs(), default_read_timeout_secs()))
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::Ollama),
                ProviderConfig::new(TranslationProvider::OpenAI),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}
