/*!
 * Configuration and content store files on disk
 */

use anyhow::Result;
use std::sync::Arc;

use sitelingo::app_config::{ApplyPolicy, Config, TranslationProvider};
use sitelingo::content::{ContentStore, MemoryStore};
use sitelingo::translation::{SiteTranslator, TranslationBackend, TranslationService};
use sitelingo::providers::mock::MockProvider;

use crate::common::{
    CONTENT_PATH, PAGE_PATH, ScriptedBackend, TEXT_PATH, create_temp_dir, create_test_file,
    simple_store,
};

const STORE_DOCUMENT: &str = r#"{
  "nodes": [
    { "path": "/content/site/fr/accueil/jcr:content", "kind": "site/components/page",
      "properties": { "jcr:title": "Bonjour", "jcr:language": "fr-FR", "sling:resourceType": "site/components/page" } },
    { "path": "/content/site/fr/accueil/jcr:content/title", "kind": "core/wcm/components/title/v2/title",
      "properties": { "jcr:title": "Bienvenue", "type": "h1" } }
  ]
}"#;

#[test]
fn test_config_saveAndLoad_shouldRoundTrip() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_language = "fr".to_string();
    config.content.apply_policy = ApplyPolicy::BestEffort;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.target_language, "fr");
    assert_eq!(loaded.content.apply_policy, ApplyPolicy::BestEffort);
    assert!(loaded.validate().is_ok());
    Ok(())
}

#[test]
fn test_config_partialFile_shouldFillDefaults() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(
        dir.path(),
        "conf.json",
        r#"{ "target_language": "de", "content": { "apply_policy": "best_effort" } }"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "de");
    assert_eq!(config.category, "general");
    assert_eq!(config.content.apply_policy, ApplyPolicy::BestEffort);
    assert_eq!(config.content.custom_metadata_prefix, "custom:");
    assert_eq!(config.translation.common.max_translation_length, 5000);
    Ok(())
}

#[test]
fn test_config_malformedFile_shouldFailWithContext() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "conf.json", "{ not json")?;

    let err = Config::from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_translationService_openAiConfig_shouldBuild() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::OpenAI;
    for provider in &mut config.translation.available_providers {
        provider.api_key = "sk-test".to_string();
    }

    assert!(config.validate().is_ok());
    let service = TranslationService::new(&config).unwrap();
    assert!(service.service_info().label.contains("gpt-4o-mini"));
}

#[tokio::test]
async fn test_storeFile_translateAndSave_shouldPersistTranslations() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "site.json", STORE_DOCUMENT)?;

    let store = Arc::new(MemoryStore::from_file(&path)?);
    let backend = Arc::new(ScriptedBackend::new());
    let translator = SiteTranslator::new(backend.clone(), store.clone(), &Config::default());

    let result = translator
        .translate_page("/content/site/fr/accueil", "es", None)
        .await?;
    assert_eq!(result.source_lang(), "fr");
    assert!(backend.requests().iter().all(|r| r.source_lang() == "fr"));
    store.save(&path)?;

    let reloaded = MemoryStore::from_file(&path)?;
    let root = reloaded.node("/content/site/fr/accueil/jcr:content").await?;
    assert_eq!(root.get_str("jcr:title"), Some("BONJOUR_ES"));
    assert_eq!(root.get_str("sling:resourceType"), Some("site/components/page"));

    let title = reloaded.node("/content/site/fr/accueil/jcr:content/title").await?;
    assert_eq!(title.get_str("jcr:title"), Some("BIENVENUE_ES"));
    assert_eq!(title.get_str("type"), Some("h1"));
    Ok(())
}

#[tokio::test]
async fn test_siteTranslator_withMockService_shouldTranslatePage() -> Result<()> {
    let client = MockProvider::working();
    let service = TranslationService::with_mock(client.clone(), Default::default());
    assert!(service.is_direction_supported("en", "es"));

    let store = Arc::new(simple_store());
    let translator = SiteTranslator::new(Arc::new(service), store.clone(), &Config::default());
    let result = translator.translate_page(PAGE_PATH, "es", None).await?;

    assert_eq!(result.translated_properties()["jcr:title"], "[TRANSLATED] Hello");
    assert_eq!(
        result.component_results()[TEXT_PATH].translated_properties()["text"],
        "[TRANSLATED] Hi"
    );
    assert_eq!(client.request_count(), 3);
    assert_eq!(
        store.snapshot(CONTENT_PATH).unwrap().get_str("jcr:description"),
        Some("[TRANSLATED] World")
    );
    Ok(())
}

#[tokio::test]
async fn test_siteTranslator_withFailingService_shouldAbortPage() {
    let service = TranslationService::with_mock(MockProvider::failing(), Default::default());
    let store = Arc::new(simple_store());
    let translator = SiteTranslator::new(Arc::new(service), store, &Config::default());

    let err = translator
        .translate_page(PAGE_PATH, "es", None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Scripted provider rejects every prompt"));
}

#[tokio::test]
async fn test_siteTranslator_disabledService_shouldAbortPage() {
    let service = TranslationService::with_mock(MockProvider::working(), Default::default())
        .with_enabled(false);
    let store = Arc::new(simple_store());
    let translator = SiteTranslator::new(Arc::new(service), store, &Config::default());

    let err = translator
        .translate_page(PAGE_PATH, "es", None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not available"));
}

#[tokio::test]
async fn test_siteTranslator_emptyModelReply_shouldAbortWithoutWipingContent() {
    let client = MockProvider::empty();
    let service = TranslationService::with_mock(client.clone(), Default::default());
    let store = Arc::new(simple_store());
    let translator = SiteTranslator::new(Arc::new(service), store.clone(), &Config::default());

    let err = translator
        .translate_page(PAGE_PATH, "es", None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("empty translation"));
    assert_eq!(client.request_count(), 1);
    let root = store.snapshot(CONTENT_PATH).unwrap();
    assert_eq!(root.get_str("jcr:title"), Some("Hello"));
    assert_eq!(root.get_str("jcr:description"), Some("World"));
}
