// src/crypto/provider.rs
//! Key material for the field cipher
//!
//! The cipher never decides where its key comes from. A [`KeyProvider`] is
//! handed in at construction so the same code runs against the per-user key
//! file in production and against an explicit passphrase in tests or on hosts
//! without a usable home directory.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use sha2::Sha256;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::aliases::{FieldKey32, Passphrase, SecureRandomExt};
use crate::consts::{APP_DIR_NAME, APP_SALT, PASSPHRASE_KDF_ITERATIONS, USER_KEY_FILE};
use crate::error::CoreError;
use crate::Result;

/// Source of the 256-bit key used to seal entry fields
pub trait KeyProvider: Send + Sync {
    fn derive_key(&self) -> Result<FieldKey32>;
}

/// Per-user random key kept in a file only the owning OS account can read
///
/// Created on first use. Ciphertext written under one account (or on another
/// machine) cannot be opened with a different account's key file.
pub struct UserKeyFile {
    path: PathBuf,
}

impl UserKeyFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<local data dir>/keyvalue-vault/user.key`
    pub fn default_location() -> Result<Self> {
        let base = dirs::data_local_dir().ok_or_else(|| {
            CoreError::KeyDerivation("no local data directory for the current user".into())
        })?;
        Ok(Self::new(base.join(APP_DIR_NAME).join(USER_KEY_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing(&self) -> Result<FieldKey32> {
        let bytes = Zeroizing::new(fs::read(&self.path)?);
        if bytes.len() != 32 {
            return Err(CoreError::KeyDerivation(format!(
                "{} holds {} bytes, expected 32",
                self.path.display(),
                bytes.len()
            )));
        }
        let mut raw = Zeroizing::new([0u8; 32]);
        raw.copy_from_slice(&bytes);
        Ok(FieldKey32::new(*raw))
    }

    /// Stage the key in a sibling temp file, then link it into place
    ///
    /// Readers only ever see a missing file or a complete one. If another
    /// process wins the race, its key is used.
    fn create(&self) -> Result<FieldKey32> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let key = FieldKey32::random();

        // NamedTempFile is created 0600 on unix
        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(key.expose_secret())?;
        staged.as_file().sync_all()?;

        match staged.persist_noclobber(&self.path) {
            Ok(_) => {
                info!(path = %self.path.display(), "created new user key file");
                Ok(key)
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %self.path.display(), "user key file appeared concurrently");
                self.read_existing()
            }
            Err(e) => Err(e.error.into()),
        }
    }
}

impl KeyProvider for UserKeyFile {
    fn derive_key(&self) -> Result<FieldKey32> {
        match self.read_existing() {
            Ok(key) => {
                debug!(path = %self.path.display(), "loaded user key file");
                Ok(key)
            }
            Err(CoreError::Io(e)) if e.kind() == ErrorKind::NotFound => self.create(),
            Err(e) => Err(e),
        }
    }
}

/// Key stretched from an explicit passphrase with PBKDF2-HMAC-SHA256
pub struct PassphraseKey {
    passphrase: Passphrase,
    iterations: u32,
}

impl PassphraseKey {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self::with_iterations(passphrase, PASSPHRASE_KDF_ITERATIONS)
    }

    pub fn with_iterations(passphrase: impl Into<String>, iterations: u32) -> Self {
        Self {
            passphrase: Passphrase::new(passphrase.into()),
            iterations,
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl KeyProvider for PassphraseKey {
    fn derive_key(&self) -> Result<FieldKey32> {
        let passphrase = self.passphrase.expose_secret();
        if passphrase.is_empty() {
            return Err(CoreError::KeyDerivation("passphrase is empty".into()));
        }
        if self.iterations == 0 {
            return Err(CoreError::KeyDerivation(
                "PBKDF2 iteration count must be non-zero".into(),
            ));
        }

        let mut raw = Zeroizing::new([0u8; 32]);
        pbkdf2::pbkdf2_hmac::<Sha256>(
            passphrase.as_bytes(),
            APP_SALT,
            self.iterations,
            raw.as_mut_slice(),
        );
        Ok(FieldKey32::new(*raw))
    }
}
