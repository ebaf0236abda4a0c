/*!
 * Error types for the sitelingo crate.
 *
 * Each layer gets its own enum: model clients raise `ProviderError`, content
 * stores raise `StoreError`, and everything the orchestrator surfaces to a
 * caller is a `TranslationError`. `AppError` only exists at the binary edge.
 */

use thiserror::Error;

/// Errors that can occur when talking to a model provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The provider did not answer within the configured read timeout
    #[error("Request timed out: {0}")]
    Timeout(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors raised by a content store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No node exists at the path
    #[error("No content at path: {0}")]
    NotFound(String),

    /// The node exists but cannot be read
    #[error("Cannot read {path}: {reason}")]
    Unreadable {
        /// Path of the node
        path: String,
        /// Why the read failed
        reason: String,
    },

    /// A write was rejected
    #[error("Cannot write {path}: {reason}")]
    WriteFailed {
        /// Path of the node
        path: String,
        /// Why the write failed
        reason: String,
    },

    /// Resolving or creating a tag failed
    #[error("Tag operation failed: {0}")]
    TagFailed(String),
}

/// Errors surfaced by translation operations
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The backend is disabled or its client is not initialized
    #[error("Translation backend is not available")]
    BackendUnavailable,

    /// Either language of the pair is not supported by the backend
    #[error("Translation direction not supported: {source_lang} -> {target_lang}")]
    UnsupportedLanguageDirection {
        /// Source language code
        source_lang: String,
        /// Target language code
        target_lang: String,
    },

    /// Language detection could not produce an answer
    #[error("Failed to detect language: {0}")]
    DetectionFailed(String),

    /// Generic backend failure, also used to wrap page-level aborts
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    /// Text exceeds the configured maximum request length
    #[error("Text of {length} characters exceeds the maximum of {max}")]
    TextTooLong {
        /// Length of the rejected text in characters
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// The content store could not be read or written
    #[error("Content store access failed: {0}")]
    StoreAccessFailed(#[from] StoreError),
}

impl From<ProviderError> for TranslationError {
    fn from(error: ProviderError) -> Self {
        Self::TranslationFailed(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the content store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
