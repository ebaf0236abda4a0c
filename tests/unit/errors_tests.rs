/*!
 * Tests for error types and conversions
 */

use sitelingo::errors::{AppError, ProviderError, StoreError, TranslationError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_intoTranslationError_shouldBeTranslationFailed() {
    let error: TranslationError = ProviderError::Timeout("60s elapsed".to_string()).into();
    match error {
        TranslationError::TranslationFailed(message) => {
            assert!(message.contains("Request timed out"));
            assert!(message.contains("60s elapsed"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_storeError_intoTranslationError_shouldBeStoreAccessFailed() {
    let error: TranslationError = StoreError::Unreadable {
        path: "/content/a".to_string(),
        reason: "locked".to_string(),
    }
    .into();

    assert!(matches!(error, TranslationError::StoreAccessFailed(_)));
    let display = error.to_string();
    assert!(display.contains("/content/a"));
    assert!(display.contains("locked"));
}

#[test]
fn test_translationError_unsupportedDirection_shouldNameBothLanguages() {
    let error = TranslationError::UnsupportedLanguageDirection {
        source_lang: "en".to_string(),
        target_lang: "xx".to_string(),
    };
    assert_eq!(error.to_string(), "Translation direction not supported: en -> xx");
}

#[test]
fn test_translationError_textTooLong_shouldDisplayLimits() {
    let error = TranslationError::TextTooLong { length: 6000, max: 5000 };
    let display = error.to_string();
    assert!(display.contains("6000"));
    assert!(display.contains("5000"));
}

#[test]
fn test_appError_conversions_shouldWrapSources() {
    let from_translation: AppError = TranslationError::BackendUnavailable.into();
    assert!(from_translation.to_string().starts_with("Translation error:"));

    let from_store: AppError = StoreError::NotFound("/x".to_string()).into();
    assert!(from_store.to_string().contains("/x"));

    let from_io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(from_io, AppError::File(_)));

    let from_anyhow: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(from_anyhow, AppError::Unknown(_)));
}
