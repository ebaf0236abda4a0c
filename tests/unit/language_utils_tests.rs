/*!
 * Tests for language utility functions
 */

use std::collections::BTreeMap;

use sitelingo::app_config::default_supported_languages;
use sitelingo::language_utils::{
    LanguageCodeType, get_language_name, primary_language, validate_language_code,
};

/// Test validation of language codes
#[test]
fn test_validateLanguageCode_withValidCodes_shouldReturnCorrectType() {
    assert!(matches!(validate_language_code("en").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code(" ES ").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("fra").unwrap(), LanguageCodeType::Part2T));
    assert!(matches!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B));

    assert!(validate_language_code("xyz").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_primaryLanguage_withVariousSettings_shouldReturnPrimarySubtag() {
    assert_eq!(primary_language("en_US"), "en");
    assert_eq!(primary_language("pt-BR"), "pt");
    assert_eq!(primary_language("DE"), "de");
    assert_eq!(primary_language("zh_Hant_TW"), "zh");
    assert_eq!(primary_language("   "), "");
}

#[test]
fn test_getLanguageName_withSupportedTable_shouldPreferTable() {
    let supported = default_supported_languages();
    assert_eq!(get_language_name("es", &supported), "Spanish");
    assert_eq!(get_language_name("NO", &supported), "Norwegian");
}

#[test]
fn test_getLanguageName_outsideTable_shouldFallBackToIsolang() {
    let supported = BTreeMap::new();
    assert_eq!(get_language_name("cs", &supported), "Czech");
    assert_eq!(get_language_name("qq", &supported), "qq");
}
