/*!
 * Decides which properties of a node are sent for translation.
 *
 * Pure functions over a node and the content settings: no I/O and no
 * failure mode. Absent, non-string and blank values are skipped.
 */

use serde_json::Value;

use super::results::ContentKind;
use crate::app_config::ContentConfig;
use crate::content::{Asset, ContentNode};

/// Name of the property that carries rich text on text components
const RICH_TEXT_PROPERTY: &str = "text";

/// A property picked for translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedProperty {
    pub name: String,
    pub value: String,
    pub content_kind: ContentKind,
}

/// Allow-lists for component properties and asset metadata
#[derive(Debug, Clone)]
pub struct PropertySelector {
    properties: Vec<String>,
    component_types: Vec<String>,
    asset_fields: Vec<String>,
    custom_prefix: String,
}

impl From<&ContentConfig> for PropertySelector {
    fn from(config: &ContentConfig) -> Self {
        Self {
            properties: config.translatable_properties.clone(),
            component_types: config.translatable_component_types.clone(),
            asset_fields: config.asset_metadata_fields.clone(),
            custom_prefix: config.custom_metadata_prefix.clone(),
        }
    }
}

impl Default for PropertySelector {
    fn default() -> Self {
        Self::from(&ContentConfig::default())
    }
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

impl PropertySelector {
    /// Allow-listed property names, in dispatch order
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Whether components of `kind` have translatable properties
    pub fn is_translatable_kind(&self, kind: &str) -> bool {
        self.component_types
            .iter()
            .any(|t| kind.contains(t.as_str()))
    }

    /// HTML for the rich text property of a text-rendering kind, else plain
    pub fn content_kind(property_name: &str, kind: &str) -> ContentKind {
        if property_name == RICH_TEXT_PROPERTY && kind.contains("text") {
            ContentKind::Html
        } else {
            ContentKind::Plain
        }
    }

    /// Allow-listed, non-blank string properties of a component node
    pub fn select(&self, node: &ContentNode) -> Vec<SelectedProperty> {
        self.properties
            .iter()
            .filter_map(|name| {
                non_blank(node.properties.get(name)).map(|value| SelectedProperty {
                    name: name.clone(),
                    value: value.to_string(),
                    content_kind: Self::content_kind(name, &node.kind),
                })
            })
            .collect()
    }

    /// Page-level properties of a content root.
    ///
    /// `jcr:title` and `jcr:description` come first, then the rest of the
    /// allow-list without repeating a key. Always plain text.
    pub fn select_page(&self, root: &ContentNode) -> Vec<SelectedProperty> {
        let mut names: Vec<&str> = vec!["jcr:title", "jcr:description"];
        for name in &self.properties {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }

        names
            .into_iter()
            .filter_map(|name| {
                non_blank(root.properties.get(name)).map(|value| SelectedProperty {
                    name: name.to_string(),
                    value: value.to_string(),
                    content_kind: ContentKind::Plain,
                })
            })
            .collect()
    }

    /// Fixed metadata fields, then string fields under the custom prefix
    pub fn select_asset_fields(&self, asset: &Asset) -> Vec<SelectedProperty> {
        let fixed = self.asset_fields.iter().map(String::as_str);
        let custom = asset
            .metadata
            .keys()
            .map(String::as_str)
            .filter(|key| key.starts_with(self.custom_prefix.as_str()))
            .filter(|key| !self.asset_fields.iter().any(|f| f == key));

        fixed
            .chain(custom)
            .filter_map(|name| {
                non_blank(asset.metadata.get(name)).map(|value| SelectedProperty {
                    name: name.to_string(),
                    value: value.to_string(),
                    content_kind: ContentKind::Plain,
                })
            })
            .collect()
    }
}
