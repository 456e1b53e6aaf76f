// src/lib.rs
//! keyvalue-vault: a password-gated key-value store with field-level encryption
//!
//! Features:
//! - Three AES-256-GCM sealed value slots per entry, plaintext description
//! - Pluggable key material (per-user key file or passphrase)
//! - SQLite persistence, one short-lived connection per operation
//! - Startup gate: first-run setup, login, password reset via reset secret

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod entry;
pub mod error;
pub mod gate;
pub mod util;

pub type Result<T> = std::result::Result<T, CoreError>;

// Re-export everything users need at the crate root
pub use aliases::{FieldKey32, ResetSecret};
pub use config::{load as load_config, Config};
pub use crypto::{FieldCipher, KeyProvider, PassphraseKey, UserKeyFile};
pub use db::EntryStore;
pub use entry::Entry;
pub use error::CoreError;
pub use gate::{AuthGate, FirstRun, GateStatus, Session};
