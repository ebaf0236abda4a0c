/*!
 * Translates the selected properties of one node or one asset.
 *
 * A backend failure is recorded against the property that caused it and the
 * remaining properties are still sent. Nothing here touches the store.
 */

use log::{debug, warn};

use super::backend::TranslationBackend;
use super::results::{
    AssetResult, ComponentResult, PropertyResult, TranslationOutcome, TranslationRequest,
};
use super::selector::{PropertySelector, SelectedProperty};
use crate::content::{Asset, ContentNode};

/// Per-node translator borrowing a backend and the selection rules
pub struct NodeTranslator<'a> {
    backend: &'a dyn TranslationBackend,
    selector: &'a PropertySelector,
}

impl<'a> NodeTranslator<'a> {
    pub fn new(backend: &'a dyn TranslationBackend, selector: &'a PropertySelector) -> Self {
        Self { backend, selector }
    }

    /// Translate a component node.
    ///
    /// A kind outside the translatable component types yields an empty,
    /// successful result without contacting the backend.
    pub async fn translate_component(
        &self,
        node: &ContentNode,
        source_lang: &str,
        target_lang: &str,
        category: &str,
    ) -> ComponentResult {
        if !self.selector.is_translatable_kind(&node.kind) {
            debug!("Skipping non-translatable component {} ({})", node.path, node.kind);
            return ComponentResult::skipped(&node.path, &node.kind);
        }

        let selected = self.selector.select(node);
        let outcomes = self
            .translate_properties(&node.path, selected, source_lang, target_lang, category)
            .await;
        let result = ComponentResult::from_outcomes(&node.path, &node.kind, outcomes);

        if let Some(message) = result.error_message() {
            warn!("Component {} partially failed: {}", node.path, message);
        }
        result
    }

    /// Translate the metadata fields of an asset
    pub async fn translate_asset(
        &self,
        asset: &Asset,
        source_lang: &str,
        target_lang: &str,
        category: &str,
    ) -> AssetResult {
        let selected = self.selector.select_asset_fields(asset);
        let outcomes = self
            .translate_properties(&asset.path, selected, source_lang, target_lang, category)
            .await;
        AssetResult::from_outcomes(&asset.path, &asset.mime_type, outcomes)
    }

    async fn translate_properties(
        &self,
        path: &str,
        selected: Vec<SelectedProperty>,
        source_lang: &str,
        target_lang: &str,
        category: &str,
    ) -> Vec<PropertyResult> {
        let mut outcomes = Vec::with_capacity(selected.len());

        for property in selected {
            debug!("Translating {}@{} as {}", path, property.name, property.content_kind);
            let request = TranslationRequest::new(
                property.value,
                source_lang,
                target_lang,
                property.content_kind,
                Some(category),
            );

            let outcome = match self.backend.translate(&request).await {
                Ok(text) => TranslationOutcome::Translated { text },
                Err(e) => {
                    warn!("Failed to translate {}@{}: {}", path, property.name, e);
                    TranslationOutcome::Failed {
                        error_message: e.to_string(),
                    }
                }
            };
            outcomes.push(PropertyResult::new(property.name, outcome));
        }

        outcomes
    }
}
