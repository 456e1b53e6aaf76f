// src/config/mod.rs
//! Configuration system for keyvalue-vault
//!
//! TOML file + environment overrides, loaded explicitly by the host process.

pub use app::{load, Config, Features, KeySource, Keys, Paths};
pub use defaults::{ENV_CONFIG, ENV_DB, ENV_KEY_FILE, ENV_PASSPHRASE};

mod app;
mod defaults;
