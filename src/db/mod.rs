// src/db/mod.rs
//! Entry Store: the single point of contact with the SQLite file
//!
//! Every public operation opens its own connection, does one unit of work and
//! drops the connection before returning. Nothing holds a long-lived handle,
//! so a cloned `EntryStore` can be used from several threads at once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::Connection;
use tracing::info;

use crate::crypto::FieldCipher;
use crate::Result;

mod conn;
mod entry_ops;
mod settings_ops;

pub use conn::open_store_db;

#[derive(Debug, Clone)]
pub struct EntryStore {
    db_path: PathBuf,
    cipher: Arc<FieldCipher>,
}

impl EntryStore {
    /// Bind the store to `db_path` and make sure the schema exists
    pub fn open(db_path: impl Into<PathBuf>, cipher: FieldCipher) -> Result<Self> {
        let store = Self {
            db_path: db_path.into(),
            cipher: Arc::new(cipher),
        };
        drop(store.connect()?);
        info!(path = %store.db_path.display(), "entry store ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    pub fn cipher(&self) -> &FieldCipher {
        &self.cipher
    }

    fn connect(&self) -> Result<Connection> {
        Ok(open_store_db(&self.db_path)?)
    }
}
