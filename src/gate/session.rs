// src/gate/session.rs
use crate::db::EntryStore;
use crate::entry::Entry;
use crate::Result;

/// Proof that the gate was passed; the only handle the collaborator layer gets
///
/// There is no expiry and no token. Dropping the session is the logout.
#[derive(Debug, Clone)]
pub struct Session {
    store: EntryStore,
}

impl Session {
    pub(crate) fn new(store: EntryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn list_entries(&self) -> Result<Vec<Entry>> {
        self.store.list_entries()
    }

    pub fn get_entry(&self, key: &str) -> Result<Option<Entry>> {
        self.store.get_entry(key)
    }

    pub fn add_entry(&self, entry: &Entry) -> Result<()> {
        self.store.add_entry(entry)
    }

    pub fn update_entry(&self, entry: &Entry) -> Result<()> {
        self.store.update_entry(entry)
    }

    pub fn delete_entry(&self, key: &str) -> Result<()> {
        self.store.delete_entry(key)
    }
}
