/*!
 * Translates the tags attached to a node.
 *
 * Each tag title is translated, then matched against existing tags in the
 * target language; a new tag is created when no match exists. A failure on
 * one tag drops that tag and moves on.
 */

use log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::backend::TranslationBackend;
use super::results::{ContentKind, DEFAULT_CATEGORY, TranslationRequest};
use crate::content::{ContentStore, Tag};
use crate::errors::TranslationError;

static LEAF_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/([^/]+)$").unwrap());

/// Id for a tag created in `language`, placed next to the original's leaf.
///
/// `/tags/site/news` becomes `/tags/site/es/news`.
pub fn translated_tag_id(original_id: &str, language: &str) -> String {
    let original_id = original_id.trim_end_matches('/');
    match LEAF_SEGMENT.captures(original_id) {
        Some(caps) => {
            let leaf = &caps[1];
            let parent = LEAF_SEGMENT.replace(original_id, "");
            format!("{}/{}/{}", parent, language, leaf)
        }
        None => format!("{}/{}", language, original_id),
    }
}

/// Tag translator borrowing a backend and a store
pub struct TagTranslator<'a> {
    backend: &'a dyn TranslationBackend,
    store: &'a dyn ContentStore,
}

impl<'a> TagTranslator<'a> {
    pub fn new(backend: &'a dyn TranslationBackend, store: &'a dyn ContentStore) -> Self {
        Self { backend, store }
    }

    /// Translated equivalents of the tags on `path`; failed tags are omitted
    pub async fn translate_tags(&self, path: &str, source_lang: &str, target_lang: &str) -> Vec<Tag> {
        let tags = match self.store.tags(path).await {
            Ok(tags) => tags,
            Err(e) => {
                error!("Failed to read tags of {}: {}", path, e);
                return Vec::new();
            }
        };

        let mut translated = Vec::with_capacity(tags.len());
        for tag in &tags {
            match self.translate_tag(tag, source_lang, target_lang).await {
                Ok(t) if translated.iter().any(|seen: &Tag| seen.id == t.id) => {
                    debug!("Tag {} already translated to {}", tag.id, t.id);
                }
                Ok(t) => translated.push(t),
                Err(e) => warn!("Failed to translate tag {}: {}", tag.id, e),
            }
        }
        translated
    }

    async fn translate_tag(
        &self,
        tag: &Tag,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Tag, TranslationError> {
        let request = TranslationRequest::new(
            tag.title.as_str(),
            source_lang,
            target_lang,
            ContentKind::Plain,
            Some(DEFAULT_CATEGORY),
        );
        let title = self.backend.translate(&request).await?;

        if let Some(existing) = self.store.resolve_tag_by_title(&title, target_lang).await? {
            return Ok(existing);
        }

        let id = translated_tag_id(&tag.id, target_lang);
        Ok(self.store.create_tag(&id, &title, target_lang).await?)
    }
}
