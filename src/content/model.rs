/*!
 * Data shapes exchanged with a content store.
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property map of a node, in the order the store returned it
pub type PropertyMap = Map<String, Value>;

/// Suffix of a page's content root below the page path
pub const CONTENT_ROOT: &str = "jcr:content";

/// Property holding a page's language setting on its content root
pub const LANGUAGE_PROPERTY: &str = "jcr:language";

/// A path-addressed unit of the content tree: a page content root or a
/// component instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Unique path within the tree
    pub path: String,
    /// Component or resource type
    #[serde(default)]
    pub kind: String,
    /// Ordered properties; values are not necessarily strings
    #[serde(default)]
    pub properties: PropertyMap,
}

impl ContentNode {
    /// Create a node without properties
    pub fn new(path: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Builder-style string property setter
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), Value::String(value.into()));
        self
    }

    /// String value of a property, `None` if absent or not a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }
}

/// A page as seen by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page path, e.g. `/content/site/en/home`
    pub path: String,
    /// The page's own language setting, e.g. `en_US`
    pub language: Option<String>,
}

impl Page {
    /// Path of the page's content root node
    pub fn content_path(&self) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), CONTENT_ROOT)
    }
}

/// A digital asset with its metadata record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset path
    pub path: String,
    /// MIME type of the binary
    #[serde(default)]
    pub mime_type: String,
    /// Metadata fields such as `dc:title`
    #[serde(default)]
    pub metadata: PropertyMap,
}

/// A classification label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag identifier, path-like (`/content/cq:tags/site/topics/news`)
    pub id: String,
    /// Display title
    pub title: String,
    /// Language scope of the title, `None` for the default scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Tag {
    /// Create a tag
    pub fn new(id: impl Into<String>, title: impl Into<String>, language: Option<&str>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            language: language.map(str::to_string),
        }
    }
}
