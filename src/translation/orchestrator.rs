/*!
 * Walks pages and assets, dispatches their text to a backend and writes the
 * results back to the store.
 *
 * A page walk runs strictly in order: page properties, the direct children
 * of the content root, the root's tags, then the write-back. Any failure on
 * a page property aborts the page; a failing component or tag does not stop
 * its siblings.
 */

use chrono::{Duration, Utc};
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use super::backend::TranslationBackend;
use super::node::NodeTranslator;
use super::results::{AssetResult, ComponentResult, PageResult, TranslationRequest};
use super::selector::PropertySelector;
use super::tags::TagTranslator;
use crate::app_config::{ApplyPolicy, Config};
use crate::content::{ContentStore, Tag};
use crate::errors::TranslationError;
use crate::jobs::{ImmediateJobLedger, JobLedger, JobRequest, JobStatusReport, JobTicket};
use crate::language_utils::primary_language;

/// Site-level translation operations over one backend and one store
pub struct SiteTranslator {
    backend: Arc<dyn TranslationBackend>,
    store: Arc<dyn ContentStore>,
    ledger: Arc<dyn JobLedger>,
    selector: PropertySelector,
    apply_policy: ApplyPolicy,
    default_source_lang: String,
    default_category: String,
}

impl SiteTranslator {
    /// Create a translator using the content settings of `config`
    pub fn new(
        backend: Arc<dyn TranslationBackend>,
        store: Arc<dyn ContentStore>,
        config: &Config,
    ) -> Self {
        Self {
            backend,
            store,
            ledger: Arc::new(ImmediateJobLedger),
            selector: PropertySelector::from(&config.content),
            apply_policy: config.content.apply_policy,
            default_source_lang: config.source_language.clone(),
            default_category: config.category.clone(),
        }
    }

    /// Replace the job ledger
    pub fn with_ledger(mut self, ledger: Arc<dyn JobLedger>) -> Self {
        self.ledger = ledger;
        self
    }

    /// Replace the write-back policy for partially translated nodes
    pub fn with_apply_policy(mut self, apply_policy: ApplyPolicy) -> Self {
        self.apply_policy = apply_policy;
        self
    }

    pub fn apply_policy(&self) -> ApplyPolicy {
        self.apply_policy
    }

    fn category<'a>(&'a self, category: Option<&'a str>) -> &'a str {
        category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(self.default_category.as_str())
    }

    /// Translate a page and write the results back.
    ///
    /// Returns a complete report, possibly holding failed components, or a
    /// single `TranslationFailed` error when the page itself could not be
    /// processed.
    pub async fn translate_page(
        &self,
        page_path: &str,
        target_lang: &str,
        category: Option<&str>,
    ) -> Result<PageResult, TranslationError> {
        let start = Instant::now();
        let category = self.category(category);

        match self.walk_page(page_path, target_lang, category, start).await {
            Ok(result) => {
                info!(
                    "Completed translation for page {} in {}ms ({} components, {} failed)",
                    page_path,
                    result.elapsed_time_ms(),
                    result.component_results().len(),
                    result.failed_components()
                );
                Ok(result)
            }
            Err(e) => {
                error!("Failed to translate page {}: {}", page_path, e);
                Err(TranslationError::TranslationFailed(format!(
                    "Page translation failed: {}",
                    e
                )))
            }
        }
    }

    async fn walk_page(
        &self,
        page_path: &str,
        target_lang: &str,
        category: &str,
        start: Instant,
    ) -> Result<PageResult, TranslationError> {
        let page = self.store.page(page_path).await?;
        let content_path = page.content_path();
        let root = self.store.node(&content_path).await?;

        let mut source_lang = primary_language(page.language.as_deref().unwrap_or_default());
        if source_lang.is_empty() {
            source_lang = self.default_source_lang.clone();
        }
        info!(
            "Starting translation for page {} from {} to {}",
            page.path, source_lang, target_lang
        );

        let mut translated_properties = BTreeMap::new();
        for property in self.selector.select_page(&root) {
            let request = TranslationRequest::new(
                property.value,
                source_lang.as_str(),
                target_lang,
                property.content_kind,
                Some(category),
            );
            let text = self.backend.translate(&request).await?;
            translated_properties.insert(property.name, text);
        }

        let component_results = self
            .translate_components(&content_path, &source_lang, target_lang, Some(category))
            .await?;

        let translated_tags = self
            .translate_resource_tags(&content_path, &source_lang, target_lang)
            .await;

        self.apply_page(
            &content_path,
            &translated_properties,
            &component_results,
            &translated_tags,
        )
        .await?;

        Ok(PageResult::new(
            page.path,
            source_lang,
            target_lang,
            translated_properties,
            component_results,
            translated_tags,
            start.elapsed().as_millis() as u64,
        ))
    }

    async fn apply_page(
        &self,
        content_path: &str,
        translated_properties: &BTreeMap<String, String>,
        component_results: &BTreeMap<String, ComponentResult>,
        translated_tags: &[Tag],
    ) -> Result<(), TranslationError> {
        if !translated_properties.is_empty() {
            self.store
                .set_properties(content_path, translated_properties)
                .await?;
        }

        for (path, result) in component_results {
            let properties = result.applicable_properties(self.apply_policy);
            if !properties.is_empty() {
                self.store.set_properties(path, &properties).await?;
            }
        }

        if !translated_tags.is_empty() {
            self.store.set_tags(content_path, translated_tags).await?;
        }
        Ok(())
    }

    /// Translate the direct children of `parent_path` without writing back.
    ///
    /// A child that cannot be read gets a failed result; only an unreadable
    /// parent is an error.
    pub async fn translate_components(
        &self,
        parent_path: &str,
        source_lang: &str,
        target_lang: &str,
        category: Option<&str>,
    ) -> Result<BTreeMap<String, ComponentResult>, TranslationError> {
        let category = self.category(category);
        let translator = NodeTranslator::new(self.backend.as_ref(), &self.selector);
        let mut results = BTreeMap::new();

        for child in self.store.children(parent_path).await? {
            let result = match self.store.node(&child).await {
                Ok(node) => {
                    translator
                        .translate_component(&node, source_lang, target_lang, category)
                        .await
                }
                Err(e) => {
                    warn!("Failed to translate component {}: {}", child, e);
                    ComponentResult::failed(&child, "", format!("Translation failed: {}", e))
                }
            };
            results.insert(child, result);
        }

        Ok(results)
    }

    /// Translate an asset's metadata and write the result back.
    ///
    /// Never fails: read and write problems end up in the returned report.
    pub async fn translate_asset_metadata(
        &self,
        asset_path: &str,
        source_lang: &str,
        target_lang: &str,
        category: Option<&str>,
    ) -> AssetResult {
        info!("Translating metadata for asset {}", asset_path);
        let category = self.category(category);

        let asset = match self.store.asset(asset_path).await {
            Ok(asset) => asset,
            Err(e) => {
                error!("Failed to read asset {}: {}", asset_path, e);
                return AssetResult::failed(asset_path, "", e.to_string());
            }
        };

        let translator = NodeTranslator::new(self.backend.as_ref(), &self.selector);
        let result = translator
            .translate_asset(&asset, source_lang, target_lang, category)
            .await;
        if let Some(message) = result.error_message() {
            warn!("Asset {} partially failed: {}", asset_path, message);
        }

        let metadata = result.applicable_metadata(self.apply_policy);
        if !metadata.is_empty() {
            if let Err(e) = self.store.set_asset_metadata(asset_path, &metadata).await {
                error!("Failed to write metadata of asset {}: {}", asset_path, e);
                return AssetResult::failed(asset_path, &asset.mime_type, e.to_string());
            }
        }

        result
    }

    /// Translated equivalents of the tags on `path`, without writing back
    pub async fn translate_resource_tags(
        &self,
        path: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Vec<Tag> {
        TagTranslator::new(self.backend.as_ref(), self.store.as_ref())
            .translate_tags(path, source_lang, target_lang)
            .await
    }

    /// Open a job covering `pages` and `assets`, due 24 hours from now
    pub fn create_translation_job(
        &self,
        pages: &[String],
        assets: &[String],
        source_lang: &str,
        target_lang: &str,
        name: &str,
    ) -> Result<JobTicket, TranslationError> {
        info!(
            "Creating translation job {} for {} pages and {} assets",
            name,
            pages.len(),
            assets.len()
        );

        let request = JobRequest {
            name: name.to_string(),
            description: format!(
                "Translate {} pages and {} assets from {} to {}",
                pages.len(),
                assets.len(),
                source_lang,
                target_lang
            ),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            due_date: Utc::now() + Duration::hours(24),
        };

        self.ledger.create_job(&request).map_err(|e| {
            error!("Failed to create translation job {}: {}", name, e);
            TranslationError::TranslationFailed(format!("Failed to create translation job: {}", e))
        })
    }

    /// Status report of a job; the ledger keeps no counts
    pub fn get_job_status(&self, job_id: &str) -> Result<JobStatusReport, TranslationError> {
        let status = self.ledger.get_status(job_id).map_err(|e| {
            error!("Failed to get status for job {}: {}", job_id, e);
            TranslationError::TranslationFailed(format!("Failed to get job status: {}", e))
        })?;

        Ok(JobStatusReport {
            job_id: job_id.to_string(),
            status,
            total_pages: 0,
            completed_pages: 0,
            total_assets: 0,
            completed_assets: 0,
            last_updated: Utc::now(),
        })
    }
}
