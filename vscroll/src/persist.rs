//! Session persistence of the last known scroll position.
//!
//! The position is stored as two text entries, `documentOffset` and
//! `thumbOffset`, in a session-scoped key-value store. The store is an
//! optional convenience: when it is missing, full or returns garbage, reads
//! fall back to the top of the page and writes are dropped.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::StoreError;
use crate::state::ScrollState;

/// Store key for the document offset.
pub const DOCUMENT_OFFSET_KEY: &str = "documentOffset";
/// Store key for the thumb offset.
pub const THUMB_OFFSET_KEY: &str = "thumbOffset";

/// Session-scoped string key-value store.
pub trait SessionStore {
    /// Read the value for a key.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value for a key.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// An in-memory session store backed by a concurrent hash map.
///
/// Clones share the same entries, so a test can keep a handle while the
/// widget owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that accepts at most `limit` entries.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            quota: Some(limit),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw value for a key, bypassing the trait.
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let full = |limit: &usize| !self.entries.contains_key(key) && self.entries.len() >= *limit;
        if let Some(limit) = self.quota.filter(full) {
            return Err(StoreError::QuotaExceeded { limit });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store for environments without session storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

impl SessionStore for DisabledStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}

/// Snapshot of a scroll position as written to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PersistedPosition {
    pub document_offset: f64,
    pub thumb_offset: f64,
}

impl From<ScrollState> for PersistedPosition {
    fn from(state: ScrollState) -> Self {
        Self {
            document_offset: state.document_offset,
            thumb_offset: state.thumb_offset,
        }
    }
}

/// Reads and writes the persisted position, absorbing store failures.
pub struct Persistence {
    store: Box<dyn SessionStore>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Wrap a session store.
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// The stored position, or `None` if nothing usable was stored.
    pub fn read(&self) -> Option<PersistedPosition> {
        let document_offset = self.read_offset(DOCUMENT_OFFSET_KEY)?;
        let thumb_offset = self.read_offset(THUMB_OFFSET_KEY).unwrap_or(0.0);
        Some(PersistedPosition {
            document_offset,
            thumb_offset,
        })
    }

    /// The stored position, defaulting to the top of the page.
    pub fn read_or_default(&self) -> PersistedPosition {
        self.read().unwrap_or_default()
    }

    /// Write a position. Failures are logged and dropped.
    pub fn write(&self, position: PersistedPosition) {
        let result = self
            .store
            .set(DOCUMENT_OFFSET_KEY, &position.document_offset.to_string())
            .and_then(|_| {
                self.store
                    .set(THUMB_OFFSET_KEY, &position.thumb_offset.to_string())
            });
        if let Err(e) = result {
            log::debug!("[persist] write skipped: {}", e);
        }
    }

    /// Remove the stored position. Failures are logged and dropped.
    pub fn clear(&self) {
        for key in [DOCUMENT_OFFSET_KEY, THUMB_OFFSET_KEY] {
            if let Err(e) = self.store.remove(key) {
                log::debug!("[persist] clear of {} skipped: {}", key, e);
            }
        }
    }

    fn read_offset(&self, key: &str) -> Option<f64> {
        match self.store.get(key) {
            Ok(Some(text)) => parse_offset(&text),
            Ok(None) => None,
            Err(e) => {
                log::debug!("[persist] read of {} skipped: {}", key, e);
                None
            }
        }
    }
}

/// Parse a stored pixel value. Accepts a trailing `px` unit.
fn parse_offset(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    match number.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value.max(0.0)),
        _ => {
            log::warn!("[persist] ignoring unreadable offset {:?}", text);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("120"), Some(120.0));
        assert_eq!(parse_offset("12.5px"), Some(12.5));
        assert_eq!(parse_offset(" 7 "), Some(7.0));
        assert_eq!(parse_offset("-4"), Some(0.0));
        assert_eq!(parse_offset("NaN"), None);
        assert_eq!(parse_offset("auto"), None);
    }
}
