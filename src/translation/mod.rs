/*!
 * Content translation.
 *
 * - `backend`: the `TranslationBackend` trait the orchestrator talks to
 * - `core`: `TranslationService`, a backend driving a language model
 * - `results`: requests and the reports returned to callers
 * - `selector`: which properties of a node are translatable
 * - `node`: per-node and per-asset translation with partial failures
 * - `tags`: tag title translation and resolve-or-create
 * - `orchestrator`: `SiteTranslator`, the page and asset walks
 */

// Re-export main types for easier usage
pub use self::backend::{SupportedLanguages, TranslationBackend};
pub use self::core::{ServiceInfo, TranslationService, UNKNOWN_LANGUAGE};
pub use self::node::NodeTranslator;
pub use self::orchestrator::SiteTranslator;
pub use self::results::{
    AssetResult, ComponentResult, ContentKind, DEFAULT_CATEGORY, PageResult, PropertyResult,
    TranslationOutcome, TranslationRequest,
};
pub use self::selector::{PropertySelector, SelectedProperty};
pub use self::tags::{TagTranslator, translated_tag_id};

// Submodules
pub mod backend;
pub mod core;
pub mod node;
pub mod orchestrator;
pub mod results;
pub mod selector;
pub mod tags;
