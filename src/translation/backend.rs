/*!
 * The seam between the orchestrator and whatever performs translations.
 */

use async_trait::async_trait;
use std::collections::BTreeMap;

use super::results::{ContentKind, TranslationRequest};
use crate::errors::TranslationError;

/// Language code to display name
pub type SupportedLanguages = BTreeMap<String, String>;

/// A machine translation backend
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate one fragment
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError>;

    /// Guess the language of `text`, returning a code or `UNKNOWN`
    async fn detect_language(
        &self,
        text: &str,
        content_kind: ContentKind,
    ) -> Result<String, TranslationError>;

    /// Whether the backend accepts requests at all
    fn is_available(&self) -> bool;

    /// Languages the backend can work with
    fn supported_languages(&self) -> SupportedLanguages;

    /// True iff both codes are keys of the supported language map
    fn is_direction_supported(&self, source_lang: &str, target_lang: &str) -> bool {
        let languages = self.supported_languages();
        languages.contains_key(&source_lang.to_lowercase())
            && languages.contains_key(&target_lang.to_lowercase())
    }

    /// Translate each text in order, stopping at the first failure
    async fn translate_array(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
        content_kind: ContentKind,
        category: Option<&str>,
    ) -> Result<Vec<String>, TranslationError> {
        let mut translated = Vec::with_capacity(texts.len());
        for text in texts {
            let request =
                TranslationRequest::new(text.as_str(), source_lang, target_lang, content_kind, category);
            translated.push(self.translate(&request).await?);
        }
        Ok(translated)
    }
}
