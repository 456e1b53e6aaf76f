// src/db/settings_ops.rs
//! Raw `AppSettings` access; values are stored exactly as given

use rusqlite::{params, OptionalExtension};

use super::EntryStore;
use crate::Result;

impl EntryStore {
    pub fn get_setting(&self, name: &str) -> Result<Option<String>> {
        let conn = self.connect()?;
        let value = conn
            .query_row(
                "SELECT Value FROM AppSettings WHERE Key = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Upsert; the last write wins
    pub fn set_setting(&self, name: &str, value: &str) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT OR REPLACE INTO AppSettings (Key, Value) VALUES (?1, ?2)",
            params![name, value],
        )?;
        Ok(())
    }
}
