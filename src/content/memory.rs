/*!
 * In-memory content store.
 *
 * Holds a whole content tree in memory behind a lock and can be loaded from
 * or saved to a JSON document:
 *
 * ```json
 * {
 *   "nodes": [
 *     { "path": "/content/site/en/home/jcr:content", "kind": "site/page",
 *       "properties": { "jcr:title": "Home", "jcr:language": "en" },
 *       "tags": ["/content/cq:tags/site/topics/news"] }
 *   ],
 *   "tags": [ { "id": "/content/cq:tags/site/topics/news", "title": "News" } ],
 *   "assets": [ { "path": "/content/dam/a.png", "mimeType": "image/png",
 *                 "metadata": { "dc:title": "Logo" } } ]
 * }
 * ```
 *
 * Reads and writes on chosen paths can be made to fail, which is how the
 * partial-failure paths of the orchestrator are exercised.
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use super::model::{Asset, ContentNode, LANGUAGE_PROPERTY, Page, Tag};
use super::ContentStore;
use crate::errors::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredNode {
    #[serde(flatten)]
    node: ContentNode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAsset {
    path: String,
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    metadata: super::PropertyMap,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    nodes: Vec<StoredNode>,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    assets: Vec<StoredAsset>,
}

/// Content store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<StoreDocument>,
    failing_reads: RwLock<HashSet<String>>,
    failing_writes: RwLock<HashSet<String>>,
}

fn parent_of(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a store document
    pub fn from_json(json: &str) -> Result<Self> {
        let document: StoreDocument =
            serde_json::from_str(json).context("Failed to parse content store document")?;
        Ok(Self {
            data: RwLock::new(document),
            ..Self::default()
        })
    }

    /// Load a store document from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content store: {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Serialize the current state
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&*self.data.read())
            .context("Failed to serialize content store")
    }

    /// Write the current state to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write content store: {}", path.display()))
    }

    /// Add or replace a node
    pub fn add_node(&self, node: ContentNode) {
        let mut data = self.data.write();
        data.nodes.retain(|n| n.node.path != node.path);
        data.nodes.push(StoredNode {
            node,
            tags: Vec::new(),
        });
    }

    /// Register a tag definition
    pub fn add_tag(&self, tag: Tag) {
        self.data.write().tags.push(tag);
    }

    /// Attach an existing tag to a node
    pub fn attach_tag(&self, node_path: &str, tag_id: &str) {
        let mut data = self.data.write();
        if let Some(stored) = data.nodes.iter_mut().find(|n| n.node.path == node_path) {
            stored.tags.push(tag_id.to_string());
        }
    }

    /// Add or replace an asset
    pub fn add_asset(&self, asset: Asset) {
        let mut data = self.data.write();
        data.assets.retain(|a| a.path != asset.path);
        data.assets.push(StoredAsset {
            path: asset.path,
            mime_type: asset.mime_type,
            metadata: asset.metadata,
        });
    }

    /// Make every read of `path` fail
    pub fn fail_reads_at(&self, path: &str) {
        self.failing_reads.write().insert(path.to_string());
    }

    /// Make every write to `path` fail
    pub fn fail_writes_at(&self, path: &str) {
        self.failing_writes.write().insert(path.to_string());
    }

    /// Current copy of a node
    pub fn snapshot(&self, path: &str) -> Option<ContentNode> {
        self.data
            .read()
            .nodes
            .iter()
            .find(|n| n.node.path == path)
            .map(|n| n.node.clone())
    }

    /// Tag ids currently attached to a node
    pub fn tag_ids(&self, path: &str) -> Vec<String> {
        self.data
            .read()
            .nodes
            .iter()
            .find(|n| n.node.path == path)
            .map(|n| n.tags.clone())
            .unwrap_or_default()
    }

    /// All tag definitions
    pub fn all_tags(&self) -> Vec<Tag> {
        self.data.read().tags.clone()
    }

    /// Current copy of an asset
    pub fn asset_snapshot(&self, path: &str) -> Option<Asset> {
        self.data
            .read()
            .assets
            .iter()
            .find(|a| a.path == path)
            .map(|a| Asset {
                path: a.path.clone(),
                mime_type: a.mime_type.clone(),
                metadata: a.metadata.clone(),
            })
    }

    fn check_read(&self, path: &str) -> Result<(), StoreError> {
        if self.failing_reads.read().contains(path) {
            return Err(StoreError::Unreadable {
                path: path.to_string(),
                reason: "read access denied".to_string(),
            });
        }
        Ok(())
    }

    fn check_write(&self, path: &str) -> Result<(), StoreError> {
        if self.failing_writes.read().contains(path) {
            return Err(StoreError::WriteFailed {
                path: path.to_string(),
                reason: "write access denied".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn page(&self, path: &str) -> Result<Page, StoreError> {
        let mut page = Page {
            path: path.trim_end_matches('/').to_string(),
            language: None,
        };
        let content_path = page.content_path();
        self.check_read(&content_path)?;

        let data = self.data.read();
        let root = data
            .nodes
            .iter()
            .find(|n| n.node.path == content_path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        page.language = root.node.get_str(LANGUAGE_PROPERTY).map(str::to_string);
        Ok(page)
    }

    async fn node(&self, path: &str) -> Result<ContentNode, StoreError> {
        self.check_read(path)?;
        self.snapshot(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn children(&self, path: &str) -> Result<Vec<String>, StoreError> {
        self.check_read(path)?;
        let data = self.data.read();
        if !data.nodes.iter().any(|n| n.node.path == path) {
            return Err(StoreError::NotFound(path.to_string()));
        }
        Ok(data
            .nodes
            .iter()
            .filter(|n| parent_of(&n.node.path) == Some(path))
            .map(|n| n.node.path.clone())
            .collect())
    }

    async fn set_properties(
        &self,
        path: &str,
        properties: &BTreeMap<String, String>,
    ) -> Result<(), StoreError> {
        self.check_write(path)?;
        let mut data = self.data.write();
        let stored = data
            .nodes
            .iter_mut()
            .find(|n| n.node.path == path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        for (name, value) in properties {
            stored
                .node
                .properties
                .insert(name.clone(), Value::String(value.clone()));
        }
        debug!("Wrote {} properties to {}", properties.len(), path);
        Ok(())
    }

    async fn tags(&self, path: &str) -> Result<Vec<Tag>, StoreError> {
        self.check_read(path)?;
        let data = self.data.read();
        let stored = data
            .nodes
            .iter()
            .find(|n| n.node.path == path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;

        Ok(stored
            .tags
            .iter()
            .filter_map(|id| {
                let tag = data.tags.iter().find(|t| &t.id == id).cloned();
                if tag.is_none() {
                    debug!("Skipping undefined tag {} on {}", id, path);
                }
                tag
            })
            .collect())
    }

    async fn resolve_tag_by_title(
        &self,
        title: &str,
        language: &str,
    ) -> Result<Option<Tag>, StoreError> {
        Ok(self
            .data
            .read()
            .tags
            .iter()
            .find(|t| t.title == title && t.language.as_deref() == Some(language))
            .cloned())
    }

    async fn create_tag(&self, id: &str, title: &str, language: &str) -> Result<Tag, StoreError> {
        self.check_write(id)?;
        let mut data = self.data.write();
        if data.tags.iter().any(|t| t.id == id) {
            return Err(StoreError::TagFailed(format!("Tag already exists: {}", id)));
        }
        let tag = Tag::new(id, title, Some(language));
        data.tags.push(tag.clone());
        Ok(tag)
    }

    async fn set_tags(&self, path: &str, tags: &[Tag]) -> Result<(), StoreError> {
        self.check_write(path)?;
        let mut data = self.data.write();
        let stored = data
            .nodes
            .iter_mut()
            .find(|n| n.node.path == path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        stored.tags = tags.iter().map(|t| t.id.clone()).collect();
        Ok(())
    }

    async fn asset(&self, path: &str) -> Result<Asset, StoreError> {
        self.check_read(path)?;
        self.asset_snapshot(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn set_asset_metadata(
        &self,
        path: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<(), StoreError> {
        self.check_write(path)?;
        let mut data = self.data.write();
        let stored = data
            .assets
            .iter_mut()
            .find(|a| a.path == path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        for (name, value) in metadata {
            stored
                .metadata
                .insert(name.clone(), Value::String(value.clone()));
        }
        Ok(())
    }
}
