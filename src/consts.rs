// src/consts.rs
//! Shared constants: security parameters and defaults

/// Fixed, non-secret application salt bound into every field ciphertext
pub const APP_SALT: &[u8] = b"KeyValueManagerSalt";

/// Setting holding base64(SHA-256(password))
pub const SETTING_PASSWORD: &str = "Password";

/// Setting holding the field-encrypted reset secret
pub const SETTING_RESET_KEY: &str = "ResetKey";

/// AES-GCM nonce length (96 bits)
pub const NONCE_LEN: usize = 12;

/// Leading byte of every field ciphertext
pub const FIELD_FORMAT_V1: u8 = 1;

/// PBKDF2-HMAC-SHA256 rounds for the passphrase key provider
// ~0.5s on typical hardware; the provider runs once per process
pub const PASSPHRASE_KDF_ITERATIONS: u32 = 600_000;

/// Rounds used when `skip_kdf_slowdown` is enabled (dev and tests only)
pub const FAST_KDF_ITERATIONS: u32 = 1_000;

/// How long a connection waits on a locked database before failing
pub const DB_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Default database file name, relative to the working directory
pub const DEFAULT_DB_PATH: &str = "KeyValueManager.db";

/// Directory under the user's local data dir holding the user key file
pub const APP_DIR_NAME: &str = "keyvalue-vault";

/// File name of the per-user field key
pub const USER_KEY_FILE: &str = "user.key";
