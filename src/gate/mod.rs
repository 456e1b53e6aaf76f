// src/gate/mod.rs
//! Authentication Gate: the startup barrier in front of the Entry Store
//!
//! The gate keeps no state of its own. Everything it knows lives in two
//! settings: `Password` (base64 SHA-256 digest) and `ResetKey` (the reset
//! secret sealed with the field cipher). Resetting the password touches only
//! `Password`; entry ciphertext depends on the key provider, not on the
//! password, so nothing has to be re-encrypted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{info, warn};

use crate::aliases::{RandomResetBytes, ResetSecret, SecureRandomExt};
use crate::consts::{SETTING_PASSWORD, SETTING_RESET_KEY};
use crate::db::EntryStore;
use crate::error::CoreError;
use crate::util::password_digest;
use crate::Result;

mod session;

pub use session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// No password yet; first-run setup must run
    Uninitialized,
    /// A password exists; login (or reset) is next
    Initialized,
}

/// Result of a successful first-run setup
pub struct FirstRun {
    /// Shown to the user once and never stored in plaintext
    pub reset_secret: ResetSecret,
    pub session: Session,
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    store: EntryStore,
}

/// 16 fresh random bytes, base64 encoded
fn mint_reset_secret() -> ResetSecret {
    let bytes = RandomResetBytes::new();
    ResetSecret::new(STANDARD.encode(&**bytes))
}

fn validate_new_password(password: &str, confirm: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(CoreError::validation("password is required"));
    }
    if password != confirm {
        return Err(CoreError::validation("passwords do not match"));
    }
    Ok(())
}

impl AuthGate {
    pub fn new(store: EntryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn status(&self) -> Result<GateStatus> {
        let status = match self.store.get_setting(SETTING_PASSWORD)? {
            Some(digest) if !digest.is_empty() => GateStatus::Initialized,
            _ => GateStatus::Uninitialized,
        };
        Ok(status)
    }

    /// Set the first password and mint the reset secret
    pub fn run_first_run_setup(&self, password: &str, confirm: &str) -> Result<FirstRun> {
        validate_new_password(password, confirm)?;
        if self.status()? == GateStatus::Initialized {
            return Err(CoreError::validation("a password is already configured"));
        }

        let secret = mint_reset_secret();
        let sealed = self.store.cipher().encrypt(secret.expose_secret())?;

        // ResetKey before Password: an interrupted setup still reads as Uninitialized
        self.store.set_setting(SETTING_RESET_KEY, &sealed)?;
        self.store
            .set_setting(SETTING_PASSWORD, &password_digest(password))?;

        info!("first-run setup complete");
        Ok(FirstRun {
            reset_secret: secret,
            session: Session::new(self.store.clone()),
        })
    }

    /// Compare the attempt's digest with the stored one; retries are unlimited
    pub fn login(&self, attempt: &str) -> Result<bool> {
        if attempt.trim().is_empty() {
            return Err(CoreError::validation("password is required"));
        }

        let stored = self
            .store
            .get_setting(SETTING_PASSWORD)?
            .filter(|digest| !digest.is_empty())
            .ok_or_else(|| CoreError::validation("no password has been set up"))?;

        let ok = password_digest(attempt) == stored;
        if ok {
            info!("login succeeded");
        } else {
            warn!("login failed");
        }
        Ok(ok)
    }

    /// `login` that hands back a `Session` on success
    pub fn unlock(&self, attempt: &str) -> Result<Option<Session>> {
        Ok(self
            .login(attempt)?
            .then(|| Session::new(self.store.clone())))
    }

    /// Replace the password when `claimed_secret` matches the stored reset secret
    ///
    /// Returns `Ok(false)` when no reset key is stored, when it cannot be
    /// decrypted, or when it does not match. The reset secret itself stays
    /// valid for later resets.
    pub fn reset_password(
        &self,
        new_password: &str,
        confirm: &str,
        claimed_secret: &str,
    ) -> Result<bool> {
        validate_new_password(new_password, confirm)?;
        let claimed_secret = claimed_secret.trim();
        if claimed_secret.is_empty() {
            return Err(CoreError::validation("reset key is required"));
        }

        let Some(sealed) = self
            .store
            .get_setting(SETTING_RESET_KEY)?
            .filter(|v| !v.is_empty())
        else {
            warn!("password reset refused: no reset key stored");
            return Ok(false);
        };

        let stored_secret = match self.store.cipher().decrypt(&sealed) {
            Ok(plain) => ResetSecret::new(plain),
            Err(e) => {
                warn!(error = %e, "password reset refused: stored reset key unreadable");
                return Ok(false);
            }
        };

        if stored_secret.expose_secret() != claimed_secret {
            warn!("password reset refused: reset key mismatch");
            return Ok(false);
        }

        self.store
            .set_setting(SETTING_PASSWORD, &password_digest(new_password))?;
        info!("password reset");
        Ok(true)
    }
}
