// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret types used throughout keyvalue-vault.

pub use secure_gate::{dynamic_alias, fixed_alias, random_alias, SecureRandomExt};

// Fixed-size secrets
fixed_alias!(FieldKey32, 32); // 256-bit AES-GCM field key

// Dynamic secrets
dynamic_alias!(Passphrase, String); // Input to the passphrase key provider
dynamic_alias!(ResetSecret, String); // Plaintext reset secret, surfaced once at first run

// Random secrets
random_alias!(RandomResetBytes, 16); // Entropy behind a freshly minted reset secret
