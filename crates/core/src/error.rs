//! Error types for the BPE tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Invalid configuration (target size too small, missing dataset, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The vocabulary already holds its configured number of tokens
    #[error("Vocabulary is full: maximum size of {max} tokens reached")]
    VocabularyFull { max: usize },

    /// A merge rule that would reference a token that does not exist yet
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),

    /// A token id or persisted record that does not fit the vocabulary
    #[error("Corrupt vocabulary: {0}")]
    CorruptVocabulary(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Decoded bytes requested as text are not valid UTF-8
    #[error("Decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl TokenizerError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
