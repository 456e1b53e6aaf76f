// src/crypto/field.rs
//! Reversible protection of individual string fields
//!
//! Wire format (base64, standard alphabet, padded):
//!
//! ```text
//! version (1) || nonce (12) || AES-256-GCM ciphertext + tag
//! ```
//!
//! The application salt is bound as associated data, so it must match on
//! decrypt but is never the secret itself. Empty input maps to empty output in
//! both directions.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;

use crate::consts::{APP_SALT, FIELD_FORMAT_V1, NONCE_LEN};
use crate::crypto::provider::KeyProvider;
use crate::error::CoreError;
use crate::Result;

pub struct FieldCipher {
    aead: Aes256Gcm,
}

impl FieldCipher {
    /// Derives the key once; the provider's key bytes are dropped (and zeroized) on return
    pub fn new(provider: &dyn KeyProvider) -> Result<Self> {
        let key = provider.derive_key()?;
        let aead = Aes256Gcm::new_from_slice(key.expose_secret().as_slice())
            .map_err(|e| CoreError::KeyDerivation(e.to_string()))?;
        Ok(Self { aead })
    }

    pub fn encrypt(&self, plain_text: &str) -> Result<String> {
        if plain_text.is_empty() {
            return Ok(String::new());
        }

        let mut nonce = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce);

        let sealed = self
            .aead
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: plain_text.as_bytes(),
                    aad: APP_SALT,
                },
            )
            .map_err(|_| CoreError::Encryption("field could not be sealed".into()))?;

        let mut framed = Vec::with_capacity(1 + NONCE_LEN + sealed.len());
        framed.push(FIELD_FORMAT_V1);
        framed.extend_from_slice(&nonce);
        framed.extend_from_slice(&sealed);

        Ok(STANDARD.encode(framed))
    }

    pub fn decrypt(&self, cipher_text: &str) -> Result<String> {
        if cipher_text.is_empty() {
            return Ok(String::new());
        }

        let framed = STANDARD
            .decode(cipher_text)
            .map_err(|e| CoreError::decryption(format!("not base64: {e}")))?;

        let (&version, rest) = framed
            .split_first()
            .ok_or_else(|| CoreError::decryption("empty payload"))?;
        if version != FIELD_FORMAT_V1 {
            return Err(CoreError::decryption(format!(
                "unknown field format version {version}"
            )));
        }
        if rest.len() < NONCE_LEN {
            return Err(CoreError::decryption("payload truncated"));
        }
        let (nonce, sealed) = rest.split_at(NONCE_LEN);

        let opened = self
            .aead
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: sealed,
                    aad: APP_SALT,
                },
            )
            .map_err(|_| {
                CoreError::decryption("authentication failed (wrong key or corrupted data)")
            })?;

        String::from_utf8(opened).map_err(|_| CoreError::decryption("plaintext is not UTF-8"))
    }
}

impl fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCipher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::provider::PassphraseKey;

    fn cipher(passphrase: &str) -> FieldCipher {
        FieldCipher::new(&PassphraseKey::with_iterations(passphrase, 10)).unwrap()
    }

    #[test]
    fn frame_starts_with_version_byte() {
        let c = cipher("unit");
        let raw = STANDARD.decode(c.encrypt("x").unwrap()).unwrap();
        assert_eq!(raw[0], FIELD_FORMAT_V1);
        // version + nonce + 1 byte body + 16 byte tag
        assert_eq!(raw.len(), 1 + NONCE_LEN + 1 + 16);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let c = cipher("unit");
        let mut raw = STANDARD.decode(c.encrypt("hello").unwrap()).unwrap();
        raw[0] = 9;
        let err = c.decrypt(&STANDARD.encode(raw)).unwrap_err();
        assert!(matches!(err, CoreError::Decryption(_)));
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let c = cipher("unit");
        let err = c.decrypt(&STANDARD.encode([FIELD_FORMAT_V1, 1, 2, 3])).unwrap_err();
        assert!(matches!(err, CoreError::Decryption(_)));
    }
}
