// src/db/conn.rs
use std::time::Duration;
use std::{fs, path::Path};

use rusqlite::{Connection, Result};

use crate::consts::DB_BUSY_TIMEOUT_MS;

/// Tables are created on every open; existing data is never touched
const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS KeyValueEntries (
        Id          INTEGER PRIMARY KEY AUTOINCREMENT,
        Key         TEXT NOT NULL UNIQUE,
        Value1      TEXT,
        Value2      TEXT,
        Value3      TEXT,
        Description TEXT,
        CreatedAt   TEXT NOT NULL,
        UpdatedAt   TEXT
    );

    CREATE TABLE IF NOT EXISTS AppSettings (
        Key   TEXT PRIMARY KEY,
        Value TEXT NOT NULL
    );
"#;

/// Open a fresh connection to the store file, creating the schema if absent
pub fn open_store_db(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let conn = Connection::open(db_path)?;
    conn.busy_timeout(Duration::from_millis(DB_BUSY_TIMEOUT_MS))?;
    conn.execute_batch(SCHEMA)?;

    Ok(conn)
}
