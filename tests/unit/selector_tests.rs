/*!
 * Tests for translatable property selection and per-node translation
 */

use serde_json::Value;
use sitelingo::app_config::ContentConfig;
use sitelingo::content::ContentNode;
use sitelingo::translation::{ContentKind, NodeTranslator, PropertySelector};

use crate::common::{IMAGE_KIND, ScriptedBackend, SPACER_KIND, TEXT_KIND};

fn sample_nodes() -> Vec<ContentNode> {
    let mut odd = ContentNode::new("/c/odd", "core/wcm/components/teaser/v1/teaser")
        .with_property("title", "Teaser")
        .with_property("linkURL", "/content/site/en/about")
        .with_property("label", "")
        .with_property("tooltip", "\t");
    odd.properties.insert("placeholder".to_string(), Value::Bool(true));

    vec![
        ContentNode::new("/c/text", TEXT_KIND)
            .with_property("text", "<p>Hi</p>")
            .with_property("textIsRich", "true"),
        ContentNode::new("/c/image", IMAGE_KIND)
            .with_property("alt", "Logo")
            .with_property("caption", "Sunset")
            .with_property("fileReference", "/content/dam/logo.png"),
        ContentNode::new("/c/spacer", SPACER_KIND).with_property("title", "Gap"),
        odd,
    ]
}

#[tokio::test]
async fn test_translateComponent_translatedKeys_shouldBeSubsetOfAllowListAndNonEmpty() {
    let selector = PropertySelector::default();
    let backend = ScriptedBackend::new();
    let translator = NodeTranslator::new(&backend, &selector);

    for node in sample_nodes() {
        let result = translator
            .translate_component(&node, "en", "es", "general")
            .await;

        for key in result.translated_properties().keys() {
            assert!(selector.properties().contains(key), "{key} is not allow-listed");
            let source = node.get_str(key).unwrap_or_default();
            assert!(!source.trim().is_empty(), "{key} was blank on {}", node.path);
        }
    }
}

#[tokio::test]
async fn test_translateComponent_nonTranslatableKind_shouldMakeNoCalls() {
    let selector = PropertySelector::default();
    let backend = ScriptedBackend::new();
    let translator = NodeTranslator::new(&backend, &selector);

    let node = ContentNode::new("/c/spacer", SPACER_KIND).with_property("title", "Gap");
    let result = translator.translate_component(&node, "en", "es", "general").await;

    assert!(result.success());
    assert!(result.translated_properties().is_empty());
    assert_eq!(result.kind(), SPACER_KIND);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_translateComponent_allFailing_shouldKeepFirstMessage() {
    let selector = PropertySelector::default();
    let backend = ScriptedBackend::failing_on(&["Logo", "Sunset"]);
    let translator = NodeTranslator::new(&backend, &selector);

    let node = ContentNode::new("/c/image", IMAGE_KIND)
        .with_property("caption", "Sunset")
        .with_property("alt", "Logo");
    let result = translator.translate_component(&node, "en", "es", "general").await;

    assert!(!result.success());
    assert_eq!(result.error_message(), Some("Translation failed: backend rejected 'Logo'"));
    assert_eq!(backend.call_count(), 2);
}

#[test]
fn test_select_textPropertyOnTextKind_shouldBeHtml() {
    let selector = PropertySelector::default();
    let node = ContentNode::new("/c/text", TEXT_KIND)
        .with_property("text", "<b>Hi</b>")
        .with_property("title", "Plain");

    let selected = selector.select(&node);
    let kinds: Vec<(&str, ContentKind)> = selected
        .iter()
        .map(|p| (p.name.as_str(), p.content_kind))
        .collect();
    assert_eq!(kinds, vec![("text", ContentKind::Html), ("title", ContentKind::Plain)]);
}

#[test]
fn test_selector_customConfig_shouldFollowConfiguredLists() {
    let config = ContentConfig {
        translatable_properties: vec!["headline".to_string()],
        translatable_component_types: vec!["site/components/hero".to_string()],
        ..ContentConfig::default()
    };
    let selector = PropertySelector::from(&config);

    let node = ContentNode::new("/c/hero", "site/components/hero")
        .with_property("headline", "Big news")
        .with_property("title", "Ignored");

    assert!(selector.is_translatable_kind(&node.kind));
    assert!(!selector.is_translatable_kind(TEXT_KIND));
    let selected = selector.select(&node);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].value, "Big news");
}
