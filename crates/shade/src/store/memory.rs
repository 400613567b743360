//! In-memory preference storage.

use std::sync::{Arc, Mutex, MutexGuard};

use super::PreferenceStore;
use crate::Preference;

/// A [`PreferenceStore`] holding the raw record in memory.
///
/// Clones share the same record, so handing clones of one `MemoryStore` to
/// two resolver instances models two execution contexts over one durable
/// key. Useful in tests and for hosts without durable storage.
///
/// The raw string is stored as-is; [`MemoryStore::with_raw`] can seed
/// arbitrary content to exercise the malformed-record path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    /// Creates an empty store (reads as absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given raw record, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The current raw record, if any.
    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.raw.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self) -> Option<Preference> {
        self.lock().as_deref()?.parse().ok()
    }

    fn write(&self, preference: Preference) {
        let mut raw = self.lock();
        *raw = match preference {
            Preference::System => None,
            pinned => Some(pinned.as_str().to_string()),
        };
    }
}
