// File: src/error.rs
use std::io;

/// Failures while loading reference data, config or snapshots.
///
/// Tokenization itself never fails: unresolved syllables are reported as
/// tokens without a character.
#[derive(Debug, thiserror::Error)]
pub enum KulitanError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(String),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("invalid syllable pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("duplicate character id: {0}")]
    DuplicateId(String),

    #[error("unknown translation direction: {0}")]
    UnknownDirection(String),

    #[error("no character named {0:?}")]
    UnknownCharacter(String),
}

impl From<toml::de::Error> for KulitanError {
    fn from(e: toml::de::Error) -> Self {
        KulitanError::Toml(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KulitanError>;
