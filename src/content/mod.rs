/*!
 * Content store abstraction.
 *
 * The orchestrator never holds on to content: it reads nodes, asset metadata
 * and tags through a `ContentStore` and writes results back through it within
 * a single operation.
 *
 * - `model`: node, page, asset and tag shapes
 * - `memory`: an in-memory store backed by a JSON document
 */

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::errors::StoreError;

pub mod memory;
pub mod model;

pub use memory::MemoryStore;
pub use model::{Asset, ContentNode, Page, PropertyMap, Tag};

/// Read/write access to a tree of content nodes
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Look up a page and its language setting
    async fn page(&self, path: &str) -> Result<Page, StoreError>;

    /// Read one node
    async fn node(&self, path: &str) -> Result<ContentNode, StoreError>;

    /// Paths of the direct children of a node, in tree order
    async fn children(&self, path: &str) -> Result<Vec<String>, StoreError>;

    /// Merge string properties into a node, overwriting existing keys
    async fn set_properties(
        &self,
        path: &str,
        properties: &BTreeMap<String, String>,
    ) -> Result<(), StoreError>;

    /// Tags attached to a node
    async fn tags(&self, path: &str) -> Result<Vec<Tag>, StoreError>;

    /// Find a tag by title within a language scope
    async fn resolve_tag_by_title(
        &self,
        title: &str,
        language: &str,
    ) -> Result<Option<Tag>, StoreError>;

    /// Create a new tag
    async fn create_tag(&self, id: &str, title: &str, language: &str) -> Result<Tag, StoreError>;

    /// Replace the full tag set of a node
    async fn set_tags(&self, path: &str, tags: &[Tag]) -> Result<(), StoreError>;

    /// Read an asset and its metadata
    async fn asset(&self, path: &str) -> Result<Asset, StoreError>;

    /// Merge string fields into an asset's metadata
    async fn set_asset_metadata(
        &self,
        path: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<(), StoreError>;
}
