/*!
 * Tag translation, resolve-or-create and tag write-back
 */

use std::sync::Arc;

use sitelingo::content::Tag;

use crate::common::{
    CONTENT_PATH, EVENTS_TAG, NEWS_TAG, PAGE_PATH, ScriptedBackend, rich_store, simple_store,
    translator,
};

#[tokio::test]
async fn test_translateResourceTags_missingTags_shouldBeCreatedNextToOriginal() {
    let backend = Arc::new(ScriptedBackend::new());
    let store = Arc::new(rich_store());

    let tags = translator(&backend, &store)
        .translate_resource_tags(CONTENT_PATH, "en", "es")
        .await;

    assert_eq!(
        tags,
        vec![
            Tag::new("/content/cq:tags/site/topics/es/news", "NEWS_ES", Some("es")),
            Tag::new("/content/cq:tags/site/topics/es/events", "EVENTS_ES", Some("es")),
        ]
    );
    assert_eq!(store.all_tags().len(), 4);
    assert_eq!(store.tag_ids(CONTENT_PATH), vec![NEWS_TAG, EVENTS_TAG]);
}

#[tokio::test]
async fn test_translateResourceTags_existingTranslation_shouldBeReused() {
    let backend = Arc::new(ScriptedBackend::new());
    let store = Arc::new(rich_store());
    store.add_tag(Tag::new("/content/cq:tags/site/topics/noticias", "NEWS_ES", Some("es")));

    let tags = translator(&backend, &store)
        .translate_resource_tags(CONTENT_PATH, "en", "es")
        .await;

    assert_eq!(tags[0].id, "/content/cq:tags/site/topics/noticias");
    assert_eq!(tags.len(), 2);
    assert_eq!(store.all_tags().len(), 4);
}

#[tokio::test]
async fn test_translateResourceTags_failedTag_shouldBeOmitted() {
    let backend = Arc::new(ScriptedBackend::failing_on(&["News"]));
    let store = Arc::new(rich_store());

    let tags = translator(&backend, &store)
        .translate_resource_tags(CONTENT_PATH, "en", "es")
        .await;

    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].title, "EVENTS_ES");
    assert_eq!(backend.call_count(), 2);
}

#[tokio::test]
async fn test_translateResourceTags_creationFailure_shouldBeOmitted() {
    let backend = Arc::new(ScriptedBackend::new());
    let store = Arc::new(rich_store());
    store.add_tag(Tag::new("/content/cq:tags/site/topics/es/news", "Noticias", Some("es")));

    let tags = translator(&backend, &store)
        .translate_resource_tags(CONTENT_PATH, "en", "es")
        .await;

    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, "/content/cq:tags/site/topics/es/events");
}

#[tokio::test]
async fn test_translateResourceTags_unreadableNode_shouldReturnEmpty() {
    let backend = Arc::new(ScriptedBackend::new());
    let store = Arc::new(rich_store());
    store.fail_reads_at("/content/site/en/other/jcr:content");

    let tags = translator(&backend, &store)
        .translate_resource_tags("/content/site/en/other/jcr:content", "en", "es")
        .await;

    assert!(tags.is_empty());
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_translateResourceTags_shouldUseGeneralCategoryAndPlainText() {
    let backend = Arc::new(ScriptedBackend::new());
    let store = Arc::new(rich_store());

    translator(&backend, &store)
        .translate_page(PAGE_PATH, "es", Some("marketing"))
        .await
        .unwrap();

    let request = backend.request_for("News").unwrap();
    assert_eq!(request.category(), "general");
    assert_eq!(request.content_kind(), sitelingo::ContentKind::Plain);
}

#[tokio::test]
async fn test_translatePage_withTags_shouldReplaceTagSet() {
    let backend = Arc::new(ScriptedBackend::new());
    let store = Arc::new(rich_store());

    let result = translator(&backend, &store)
        .translate_page(PAGE_PATH, "es", None)
        .await
        .unwrap();

    assert_eq!(result.translated_tags().len(), 2);
    assert_eq!(
        store.tag_ids(CONTENT_PATH),
        vec![
            "/content/cq:tags/site/topics/es/news",
            "/content/cq:tags/site/topics/es/events",
        ]
    );
}

#[tokio::test]
async fn test_translatePage_allTagsFailing_shouldKeepOriginalTags() {
    let backend = Arc::new(ScriptedBackend::failing_on(&["News", "Events"]));
    let store = Arc::new(rich_store());

    let result = translator(&backend, &store)
        .translate_page(PAGE_PATH, "es", None)
        .await
        .unwrap();

    assert!(result.translated_tags().is_empty());
    assert_eq!(store.tag_ids(CONTENT_PATH), vec![NEWS_TAG, EVENTS_TAG]);
}

#[tokio::test]
async fn test_translatePage_untaggedPage_shouldLeaveTagsEmpty() {
    let backend = Arc::new(ScriptedBackend::new());
    let store = Arc::new(simple_store());

    translator(&backend, &store)
        .translate_page(PAGE_PATH, "es", None)
        .await
        .unwrap();

    assert!(store.tag_ids(CONTENT_PATH).is_empty());
}

#[tokio::test]
async fn test_translatePage_tagsWithSameTranslation_shouldBeStoredOnce() {
    let backend = Arc::new(ScriptedBackend::new());
    let store = Arc::new(rich_store());
    let headlines = "/content/cq:tags/site/topics/headlines";
    store.add_tag(Tag::new(headlines, "news", None));
    store.attach_tag(CONTENT_PATH, headlines);

    let result = translator(&backend, &store)
        .translate_page(PAGE_PATH, "es", None)
        .await
        .unwrap();

    let ids: Vec<&str> = result.translated_tags().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["/content/cq:tags/site/topics/es/news", "/content/cq:tags/site/topics/es/events"]
    );
    assert_eq!(
        store.tag_ids(CONTENT_PATH),
        vec!["/content/cq:tags/site/topics/es/news", "/content/cq:tags/site/topics/es/events"]
    );
}
