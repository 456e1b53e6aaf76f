// src/crypto/mod.rs
//! Field-level cryptography, no I/O apart from the user key file
//!
//! `FieldCipher` seals and opens single string values. `KeyProvider`
//! implementations decide where its key comes from.
mod field;
mod provider;

pub use field::FieldCipher;
pub use provider::{KeyProvider, PassphraseKey, UserKeyFile};
