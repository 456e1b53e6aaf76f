// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Empty or mismatched caller input
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("An entry with key '{0}' already exists")]
    DuplicateKey(String),

    #[error("No entry with key '{0}'")]
    NotFound(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Ciphertext unreadable under the current key material
    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}

impl CoreError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    pub(crate) fn decryption(msg: impl Into<String>) -> Self {
        CoreError::Decryption(msg.into())
    }
}
