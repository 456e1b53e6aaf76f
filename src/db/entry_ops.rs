// src/db/entry_ops.rs
//! CRUD over `KeyValueEntries`
//!
//! Values are sealed with the store's `FieldCipher` before they reach SQL and
//! opened again after every read. Timestamps travel as RFC 3339 text.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{ffi, params, OptionalExtension, Row};
use tracing::{debug, warn};

use super::EntryStore;
use crate::entry::Entry;
use crate::error::CoreError;
use crate::util::{format_timestamp, now_utc, parse_timestamp};
use crate::Result;

const SELECT_ENTRY: &str = "SELECT Id, Key, Value1, Value2, Value3, Description, CreatedAt, UpdatedAt
     FROM KeyValueEntries";

/// A row exactly as stored, values still sealed
struct SealedRow {
    id: i64,
    key: String,
    value1: Option<String>,
    value2: Option<String>,
    value3: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

fn timestamp_column(idx: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    parse_timestamp(text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<SealedRow> {
    let created_at: String = row.get(6)?;
    let updated_at: Option<String> = row.get(7)?;

    Ok(SealedRow {
        id: row.get(0)?,
        key: row.get(1)?,
        value1: row.get(2)?,
        value2: row.get(3)?,
        value3: row.get(4)?,
        description: row.get(5)?,
        created_at: timestamp_column(6, &created_at)?,
        updated_at: updated_at
            .as_deref()
            .map(|text| timestamp_column(7, text))
            .transpose()?,
    })
}

fn require_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(CoreError::validation("entry key is required"));
    }
    Ok(())
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl EntryStore {
    fn open_row(&self, row: SealedRow) -> Result<Entry> {
        let open = |sealed: Option<String>| -> Result<String> {
            self.cipher.decrypt(sealed.as_deref().unwrap_or_default())
        };

        Ok(Entry {
            id: Some(row.id),
            value1: open(row.value1)?,
            value2: open(row.value2)?,
            value3: open(row.value3)?,
            key: row.key,
            description: row.description.unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn seal_values(&self, entry: &Entry) -> Result<[String; 3]> {
        Ok([
            self.cipher.encrypt(&entry.value1)?,
            self.cipher.encrypt(&entry.value2)?,
            self.cipher.encrypt(&entry.value3)?,
        ])
    }

    /// All entries ordered by key; one undecryptable row fails the whole listing
    pub fn list_entries(&self) -> Result<Vec<Entry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{SELECT_ENTRY} ORDER BY Key ASC"))?;
        let sealed = stmt
            .query_map([], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let entries = sealed
            .into_iter()
            .map(|row| {
                let key = row.key.clone();
                self.open_row(row).inspect_err(|e| {
                    warn!(key = %key, error = %e, "entry could not be decrypted; aborting listing")
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(count = entries.len(), "listed entries");
        Ok(entries)
    }

    pub fn get_entry(&self, key: &str) -> Result<Option<Entry>> {
        let conn = self.connect()?;
        let sealed = conn
            .query_row(&format!("{SELECT_ENTRY} WHERE Key = ?1"), [key], read_row)
            .optional()?;

        sealed.map(|row| self.open_row(row)).transpose()
    }

    /// Insert a new entry; `created_at` is stamped here and `updated_at` left empty
    pub fn add_entry(&self, entry: &Entry) -> Result<()> {
        require_key(&entry.key)?;
        let [value1, value2, value3] = self.seal_values(entry)?;
        let created_at = format_timestamp(&now_utc());

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO KeyValueEntries (Key, Value1, Value2, Value3, Description, CreatedAt)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &entry.key,
                value1,
                value2,
                value3,
                &entry.description,
                created_at
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                CoreError::DuplicateKey(entry.key.clone())
            } else {
                CoreError::Storage(e)
            }
        })?;

        debug!(key = %entry.key, "entry added");
        Ok(())
    }

    /// Replace values and description of an existing key; the key and `CreatedAt` never change
    pub fn update_entry(&self, entry: &Entry) -> Result<()> {
        require_key(&entry.key)?;
        let [value1, value2, value3] = self.seal_values(entry)?;
        let updated_at = format_timestamp(&now_utc());

        let conn = self.connect()?;
        // The wall clock may step backwards; UpdatedAt never precedes CreatedAt
        let affected = conn.execute(
            "UPDATE KeyValueEntries
             SET Value1 = ?2, Value2 = ?3, Value3 = ?4, Description = ?5,
                 UpdatedAt = MAX(?6, CreatedAt)
             WHERE Key = ?1",
            params![
                &entry.key,
                value1,
                value2,
                value3,
                &entry.description,
                updated_at
            ],
        )?;

        if affected == 0 {
            return Err(CoreError::NotFound(entry.key.clone()));
        }

        debug!(key = %entry.key, "entry updated");
        Ok(())
    }

    /// Remove by key; a missing key is not an error
    pub fn delete_entry(&self, key: &str) -> Result<()> {
        let conn = self.connect()?;
        let affected = conn.execute("DELETE FROM KeyValueEntries WHERE Key = ?1", [key])?;

        debug!(key = %key, removed = affected, "entry delete");
        Ok(())
    }
}
