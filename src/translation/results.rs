/*!
 * Requests sent to a backend and the reports handed back to callers.
 *
 * Every report is built once from its parts and exposed through getters
 * only; nothing mutates a result after construction.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::app_config::ApplyPolicy;
use crate::content::Tag;

/// Category used when a request does not name one
pub const DEFAULT_CATEGORY: &str = "general";

/// Shape of the text handed to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentKind {
    /// Unstructured text
    #[default]
    Plain,
    /// Markup that must survive translation
    Html,
}

impl ContentKind {
    /// Wording used inside prompts
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Plain => "plain text",
            Self::Html => "HTML content",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "PLAIN"),
            Self::Html => write!(f, "HTML"),
        }
    }
}

impl FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLAIN" => Ok(Self::Plain),
            "HTML" => Ok(Self::Html),
            _ => Err(anyhow::anyhow!("Invalid content kind: {}", s)),
        }
    }
}

/// One text fragment to translate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    source_lang: String,
    target_lang: String,
    content_kind: ContentKind,
    category: String,
}

impl TranslationRequest {
    /// Build a request; a missing or blank category becomes `general`
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        content_kind: ContentKind,
        category: Option<&str>,
    ) -> Self {
        let category = category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CATEGORY);
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            content_kind,
            category: category.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn content_kind(&self) -> ContentKind {
        self.content_kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Result of translating a single fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TranslationOutcome {
    /// The backend returned a translation
    Translated { text: String },
    /// The backend failed for this fragment
    #[serde(rename_all = "camelCase")]
    Failed { error_message: String },
}

impl TranslationOutcome {
    pub fn is_translated(&self) -> bool {
        matches!(self, Self::Translated { .. })
    }

    /// Translated text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Translated { text } => Some(text),
            Self::Failed { .. } => None,
        }
    }

    /// Failure message, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Translated { .. } => None,
            Self::Failed { error_message } => Some(error_message),
        }
    }
}

/// Outcome for one named property or metadata field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResult {
    property_name: String,
    outcome: TranslationOutcome,
}

impl PropertyResult {
    pub fn new(property_name: impl Into<String>, outcome: TranslationOutcome) -> Self {
        Self {
            property_name: property_name.into(),
            outcome,
        }
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn outcome(&self) -> &TranslationOutcome {
        &self.outcome
    }
}

/// Success flag, first failure and the values to report, in that order
fn summarize(outcomes: &[PropertyResult]) -> (bool, Option<String>, BTreeMap<String, String>) {
    let first_failure = outcomes
        .iter()
        .find_map(|r| r.outcome.error_message())
        .map(str::to_string);

    if first_failure.is_some() {
        return (false, first_failure, BTreeMap::new());
    }

    let translated = outcomes
        .iter()
        .filter_map(|r| {
            r.outcome
                .text()
                .map(|text| (r.property_name.clone(), text.to_string()))
        })
        .collect();
    (true, None, translated)
}

fn applicable(
    success: bool,
    reported: &BTreeMap<String, String>,
    outcomes: &[PropertyResult],
    policy: ApplyPolicy,
) -> BTreeMap<String, String> {
    match policy {
        ApplyPolicy::AtomicPerNode if success => reported.clone(),
        ApplyPolicy::AtomicPerNode => BTreeMap::new(),
        ApplyPolicy::BestEffort => outcomes
            .iter()
            .filter_map(|r| {
                r.outcome
                    .text()
                    .map(|text| (r.property_name.clone(), text.to_string()))
            })
            .collect(),
    }
}

/// Report for one component node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentResult {
    path: String,
    kind: String,
    translated_properties: BTreeMap<String, String>,
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip)]
    property_results: Vec<PropertyResult>,
}

impl ComponentResult {
    /// Build from per-property outcomes.
    ///
    /// `success` is true iff no property failed. On failure the reported map
    /// is empty and the message of the first failure is kept.
    pub fn from_outcomes(
        path: impl Into<String>,
        kind: impl Into<String>,
        property_results: Vec<PropertyResult>,
    ) -> Self {
        let (success, error_message, translated_properties) = summarize(&property_results);
        Self {
            path: path.into(),
            kind: kind.into(),
            translated_properties,
            success,
            error_message,
            property_results,
        }
    }

    /// A component that was visited but holds nothing to translate
    pub fn skipped(path: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::from_outcomes(path, kind, Vec::new())
    }

    /// A component that could not be processed at all
    pub fn failed(
        path: impl Into<String>,
        kind: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
            translated_properties: BTreeMap::new(),
            success: false,
            error_message: Some(error_message.into()),
            property_results: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn translated_properties(&self) -> &BTreeMap<String, String> {
        &self.translated_properties
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Every per-property outcome, failed ones included
    pub fn property_results(&self) -> &[PropertyResult] {
        &self.property_results
    }

    /// Properties to write back under `policy`
    pub fn applicable_properties(&self, policy: ApplyPolicy) -> BTreeMap<String, String> {
        applicable(
            self.success,
            &self.translated_properties,
            &self.property_results,
            policy,
        )
    }
}

/// Report for one page walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    path: String,
    source_lang: String,
    target_lang: String,
    translated_properties: BTreeMap<String, String>,
    component_results: BTreeMap<String, ComponentResult>,
    translated_tags: Vec<Tag>,
    elapsed_time_ms: u64,
}

impl PageResult {
    pub fn new(
        path: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        translated_properties: BTreeMap<String, String>,
        component_results: BTreeMap<String, ComponentResult>,
        translated_tags: Vec<Tag>,
        elapsed_time_ms: u64,
    ) -> Self {
        Self {
            path: path.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            translated_properties,
            component_results,
            translated_tags,
            elapsed_time_ms,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn translated_properties(&self) -> &BTreeMap<String, String> {
        &self.translated_properties
    }

    /// Component reports keyed by component path
    pub fn component_results(&self) -> &BTreeMap<String, ComponentResult> {
        &self.component_results
    }

    pub fn translated_tags(&self) -> &[Tag] {
        &self.translated_tags
    }

    pub fn elapsed_time_ms(&self) -> u64 {
        self.elapsed_time_ms
    }

    /// Number of components that reported a failure
    pub fn failed_components(&self) -> usize {
        self.component_results.values().filter(|r| !r.success).count()
    }
}

/// Report for one asset's metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetResult {
    path: String,
    mime_type: String,
    translated_metadata: BTreeMap<String, String>,
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip)]
    property_results: Vec<PropertyResult>,
}

impl AssetResult {
    /// Build from per-field outcomes, with the same rules as components
    pub fn from_outcomes(
        path: impl Into<String>,
        mime_type: impl Into<String>,
        property_results: Vec<PropertyResult>,
    ) -> Self {
        let (success, error_message, translated_metadata) = summarize(&property_results);
        Self {
            path: path.into(),
            mime_type: mime_type.into(),
            translated_metadata,
            success,
            error_message,
            property_results,
        }
    }

    /// An asset that could not be processed at all
    pub fn failed(
        path: impl Into<String>,
        mime_type: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            mime_type: mime_type.into(),
            translated_metadata: BTreeMap::new(),
            success: false,
            error_message: Some(error_message.into()),
            property_results: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn translated_metadata(&self) -> &BTreeMap<String, String> {
        &self.translated_metadata
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn property_results(&self) -> &[PropertyResult] {
        &self.property_results
    }

    /// Fields to write back under `policy`
    pub fn applicable_metadata(&self, policy: ApplyPolicy) -> BTreeMap<String, String> {
        applicable(
            self.success,
            &self.translated_metadata,
            &self.property_results,
            policy,
        )
    }
}
