/*!
 * Tests for application configuration functionality
 */

use sitelingo::app_config::{
    ApplyPolicy, Config, LogLevel, ProviderConfig, TranslationProvider,
};

/// Test default configuration values
#[test]
fn test_defaultConfig_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "es");
    assert_eq!(config.category, "general");
    assert!(config.enabled);
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.get_model(), "translategemma");
    assert_eq!(config.translation.get_timeouts(), (30, 60));
    assert_eq!(config.translation.common.supported_languages.len(), 19);
    assert_eq!(config.content.apply_policy, ApplyPolicy::AtomicPerNode);
    assert_eq!(config.content.translatable_properties.len(), 11);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_configValidation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Not an ISO code
    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());

    // Valid ISO code outside the supported table
    config.source_language = "cs".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();

    config.translation.common.max_translation_length = 0;
    assert!(config.validate().is_err());
    config.translation.common.max_translation_length = 100;
    assert!(config.validate().is_ok());
}

#[test]
fn test_configValidation_emptyEndpoint_shouldFallBackToDefault() {
    let mut config = Config::default();
    let mut ollama = ProviderConfig::new(TranslationProvider::Ollama);
    ollama.endpoint = String::new();
    config.translation.available_providers = vec![ollama];

    // Falls back to the provider default endpoint
    assert!(config.validate().is_ok());
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
}

#[test]
fn test_providerConfig_new_shouldUseProviderDefaults() {
    let openai = ProviderConfig::new(TranslationProvider::OpenAI);
    assert_eq!(openai.provider_type, "openai");
    assert_eq!(openai.model, "gpt-4o-mini");
    assert_eq!(openai.endpoint, "https://api.openai.com/v1");
    assert!(openai.api_key.is_empty());
}

#[test]
fn test_translationProvider_fromStr_shouldBeCaseInsensitive() {
    assert_eq!("OLLAMA".parse::<TranslationProvider>().unwrap(), TranslationProvider::Ollama);
    assert_eq!("openai".parse::<TranslationProvider>().unwrap(), TranslationProvider::OpenAI);
    assert!("anthropic".parse::<TranslationProvider>().is_err());
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_config_serialization_shouldUseSnakeCaseKeys() {
    let json = serde_json::to_value(Config::default()).unwrap();
    assert_eq!(json["content"]["apply_policy"], "atomic_per_node");
    assert_eq!(json["content"]["custom_metadata_prefix"], "custom:");
    assert_eq!(json["translation"]["provider"], "ollama");
    assert_eq!(json["translation"]["available_providers"][0]["type"], "ollama");
}
