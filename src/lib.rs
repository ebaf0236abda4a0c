/*!
 * # sitelingo - content tree translation for a CMS
 *
 * Translates pages, their components, asset metadata and tags by sending
 * each translatable fragment to a language model and writing the results
 * back into the content tree.
 *
 * ## Features
 *
 * - Allow-list driven property selection with plain text and HTML fragments
 * - Partial failure handling per property, component, tag and asset field
 * - Atomic or best-effort write-back of partially translated components
 * - Tag translation with resolve-or-create in the target language
 * - Model providers:
 *   - Ollama (local, translategemma by default)
 *   - OpenAI-compatible APIs
 * - A job facade for callers that expect a job lifecycle
 * - ISO 639 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `content`: Content store trait, data model and in-memory JSON store
 * - `translation`: Translation backend and site orchestration:
 *   - `translation::core`: Model-backed translation service
 *   - `translation::selector`: Translatable property selection
 *   - `translation::node`: Per-node translation
 *   - `translation::tags`: Tag translation
 *   - `translation::orchestrator`: Page and asset walks
 * - `jobs`: Translation job facade
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for model providers
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::too_many_arguments)]

// Public modules
pub mod app_config;
pub mod content;
pub mod errors;
pub mod jobs;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{ApplyPolicy, Config};
pub use content::{ContentStore, MemoryStore};
pub use errors::{AppError, ProviderError, StoreError, TranslationError};
pub use jobs::{ImmediateJobLedger, JobLedger, JobStatus};
pub use language_utils::{get_language_name, primary_language};
pub use translation::{
    AssetResult, ComponentResult, ContentKind, PageResult, SiteTranslator, TranslationBackend,
    TranslationService,
};
