use anyhow::{Result, anyhow};
use isolang::Language;
use std::collections::BTreeMap;

/// Language utilities for ISO language code handling
///
/// Pages carry locale-style language settings (`en_US`, `pt-BR`) while the
/// backend speaks bare ISO 639-1 codes. These helpers bridge the two.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

// ISO 639-2/B codes that differ from their 639-2/T spelling
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
];

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if PART2B_TO_PART2T.iter().any(|(b, _)| *b == normalized_code) => {
            Ok(LanguageCodeType::Part2B)
        }
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Reduce a locale-style language setting to its lowercase primary subtag.
///
/// `en_US`, `en-us` and `EN` all become `en`. A blank setting stays blank so
/// callers can tell "unset" apart from a real code.
pub fn primary_language(setting: &str) -> String {
    setting
        .trim()
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Human-readable name for a code.
///
/// The backend's own language table wins; isolang is the fallback, and the
/// code itself is returned when neither knows it.
pub fn get_language_name(code: &str, supported: &BTreeMap<String, String>) -> String {
    let normalized = code.trim().to_lowercase();
    if let Some(name) = supported.get(&normalized) {
        return name.clone();
    }

    let lang = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(b, _)| *b == normalized)
                .map(|(_, t)| *t)
                .unwrap_or(normalized.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    };

    lang.map(|l| l.to_name().to_string())
        .unwrap_or_else(|| code.to_string())
}
