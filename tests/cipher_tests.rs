// tests/cipher_tests.rs
mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::test_cipher;
use keyvalue_vault::{CoreError, FieldCipher, KeyProvider, UserKeyFile};
use tempfile::tempdir;

#[test]
fn roundtrip_non_empty_strings() {
    common::setup();
    let cipher = test_cipher("roundtrip");

    for plain in [
        "a",
        "secret123",
        "  leading and trailing spaces  ",
        "ünïcödé 鍵 🔑",
        "line one\nline two\ttabbed",
        "x".repeat(10_000).as_str(),
    ] {
        let sealed = cipher.encrypt(plain).unwrap();
        assert_ne!(sealed, plain);
        assert_eq!(cipher.decrypt(&sealed).unwrap(), plain);
    }
}

#[test]
fn empty_input_is_identity() {
    let cipher = test_cipher("identity");
    assert_eq!(cipher.encrypt("").unwrap(), "");
    assert_eq!(cipher.decrypt("").unwrap(), "");
}

#[test]
fn ciphertext_is_base64_and_randomised() {
    let cipher = test_cipher("nonce");
    let a = cipher.encrypt("same input").unwrap();
    let b = cipher.encrypt("same input").unwrap();

    assert!(STANDARD.decode(&a).is_ok());
    assert_ne!(a, b, "fresh nonce per encryption");
    assert_eq!(cipher.decrypt(&a).unwrap(), cipher.decrypt(&b).unwrap());
}

#[test]
fn other_key_material_cannot_decrypt() {
    let mine = test_cipher("alice");
    let theirs = test_cipher("mallory");

    let sealed = mine.encrypt("only for alice").unwrap();
    let err = theirs.decrypt(&sealed).unwrap_err();
    assert!(matches!(err, CoreError::Decryption(_)), "got {err:?}");
}

#[test]
fn tampered_ciphertext_is_rejected() {
    let cipher = test_cipher("tamper");
    let mut raw = STANDARD.decode(cipher.encrypt("payload").unwrap()).unwrap();
    let last = raw.len() - 1;
    raw[last] ^= 0x01;

    let err = cipher.decrypt(&STANDARD.encode(raw)).unwrap_err();
    assert!(matches!(err, CoreError::Decryption(_)));
}

#[test]
fn non_base64_input_is_a_decryption_error() {
    let cipher = test_cipher("garbage");
    let err = cipher.decrypt("definitely not base64 !!!").unwrap_err();
    assert!(matches!(err, CoreError::Decryption(_)));
}

#[test]
fn user_key_file_survives_restart() {
    let dir = tempdir().unwrap();
    let key_path = dir.path().join("profile").join("user.key");

    let sealed = FieldCipher::new(&UserKeyFile::new(&key_path))
        .unwrap()
        .encrypt("persisted")
        .unwrap();

    // New provider and cipher over the same file, as after a process restart
    let reopened = FieldCipher::new(&UserKeyFile::new(&key_path)).unwrap();
    assert_eq!(reopened.decrypt(&sealed).unwrap(), "persisted");
}

#[test]
fn another_users_key_file_cannot_decrypt() {
    let dir = tempdir().unwrap();
    let alice = FieldCipher::new(&UserKeyFile::new(dir.path().join("alice.key"))).unwrap();
    let bob = FieldCipher::new(&UserKeyFile::new(dir.path().join("bob.key"))).unwrap();

    let sealed = alice.encrypt("alice's token").unwrap();
    assert!(matches!(
        bob.decrypt(&sealed),
        Err(CoreError::Decryption(_))
    ));
}

#[test]
fn custom_provider_can_be_injected() {
    struct Fixed;
    impl KeyProvider for Fixed {
        fn derive_key(&self) -> keyvalue_vault::Result<keyvalue_vault::FieldKey32> {
            Ok(keyvalue_vault::FieldKey32::new([0x42; 32]))
        }
    }

    let a = FieldCipher::new(&Fixed).unwrap();
    let b = FieldCipher::new(&Fixed).unwrap();
    assert_eq!(b.decrypt(&a.encrypt("shared").unwrap()).unwrap(), "shared");
}
