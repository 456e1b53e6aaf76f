// tests/common.rs
//! Shared test utilities: logging setup and throwaway stores

#![allow(dead_code)] // each test binary uses a different subset

use std::path::PathBuf;

use keyvalue_vault::{AuthGate, EntryStore, FieldCipher, PassphraseKey};
use rusqlite::{params, Connection};
use tempfile::TempDir;

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const TEST_PASSPHRASE: &str = "test-passphrase-2025";

/// Initialize test-friendly logging; idempotent
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

/// Cheap cipher for tests, a handful of PBKDF2 rounds
pub fn test_cipher(passphrase: &str) -> FieldCipher {
    FieldCipher::new(&PassphraseKey::with_iterations(passphrase, 10)).expect("test cipher")
}

/// A store in its own temp directory, deleted on drop
pub struct TestStore {
    pub store: EntryStore,
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        Self::with_passphrase(TEST_PASSPHRASE)
    }

    pub fn with_passphrase(passphrase: &str) -> Self {
        setup();
        let dir = tempfile::tempdir().expect("tempdir");
        let store = EntryStore::open(dir.path().join("kv.db"), test_cipher(passphrase))
            .expect("open store");
        Self { store, dir }
    }

    /// Second store over the same file, with different key material
    pub fn reopen_with(&self, passphrase: &str) -> EntryStore {
        EntryStore::open(self.db_path(), test_cipher(passphrase)).expect("reopen store")
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("kv.db")
    }

    pub fn gate(&self) -> AuthGate {
        AuthGate::new(self.store.clone())
    }

    /// Column exactly as stored, bypassing the cipher
    pub fn raw_column(&self, key: &str, column: &str) -> Option<String> {
        let conn = Connection::open(self.db_path()).expect("raw open");
        conn.query_row(
            &format!("SELECT {column} FROM KeyValueEntries WHERE Key = ?1"),
            [key],
            |r| r.get(0),
        )
        .expect("raw select")
    }

    pub fn raw_setting(&self, name: &str) -> Option<String> {
        let conn = Connection::open(self.db_path()).expect("raw open");
        conn.query_row(
            "SELECT Value FROM AppSettings WHERE Key = ?1",
            [name],
            |r| r.get(0),
        )
        .ok()
    }

    /// Overwrite one column of an existing row, bypassing the store
    pub fn set_raw_column(&self, key: &str, column: &str, value: &str) {
        let conn = Connection::open(self.db_path()).expect("raw open");
        conn.execute(
            &format!("UPDATE KeyValueEntries SET {column} = ?2 WHERE Key = ?1"),
            params![key, value],
        )
        .expect("raw update");
    }

    /// Write a row directly, as another tool or a damaged file might
    pub fn insert_raw(&self, key: &str, value1: &str) {
        let conn = Connection::open(self.db_path()).expect("raw open");
        conn.execute(
            "INSERT INTO KeyValueEntries (Key, Value1, Value2, Value3, Description, CreatedAt)
             VALUES (?1, ?2, '', '', 'raw', '2024-01-01T00:00:00Z')",
            params![key, value1],
        )
        .expect("raw insert");
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}
