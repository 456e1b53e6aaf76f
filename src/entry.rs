// src/entry.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named record with three encrypted value slots and a plaintext description
///
/// `value1..3` are always plaintext in memory; the store encrypts them on the
/// way in and decrypts them on the way out. `id`, `created_at` and
/// `updated_at` are owned by the store and ignored on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Option<i64>,
    pub key: String,
    pub value1: String,
    pub value2: String,
    pub value3: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entry {
    /// New, not-yet-persisted entry with empty values
    ///
    /// `created_at` holds the Unix epoch until the store stamps it on insert;
    /// use [`Entry::is_persisted`] rather than the timestamp to tell the two apart.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            id: None,
            key: key.into(),
            value1: String::new(),
            value2: String::new(),
            value3: String::new(),
            description: String::new(),
            created_at: DateTime::<Utc>::default(),
            updated_at: None,
        }
    }

    pub fn with_values(
        mut self,
        value1: impl Into<String>,
        value2: impl Into<String>,
        value3: impl Into<String>,
    ) -> Self {
        self.value1 = value1.into();
        self.value2 = value2.into();
        self.value3 = value3.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this value came back from the store
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Value slot by 1-based index, as the collaborator layer addresses them
    pub fn value(&self, slot: u8) -> Option<&str> {
        match slot {
            1 => Some(&self.value1),
            2 => Some(&self.value2),
            3 => Some(&self.value3),
            _ => None,
        }
    }
}
