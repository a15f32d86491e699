use vscroll::persist::{DOCUMENT_OFFSET_KEY, Persistence, THUMB_OFFSET_KEY};
use vscroll::{DisabledStore, MemoryStore, PersistedPosition, SessionStore, StoreError};

fn position(document_offset: f64, thumb_offset: f64) -> PersistedPosition {
    PersistedPosition {
        document_offset,
        thumb_offset,
    }
}

// =============================================================================
// Store Tests
// =============================================================================

#[test]
fn test_memory_store_clones_share_entries() {
    let store = MemoryStore::new();
    let handle = store.clone();
    store.set("a", "1").unwrap();
    assert_eq!(handle.get("a").unwrap(), Some("1".to_string()));
    handle.remove("a").unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_memory_store_quota() {
    let store = MemoryStore::with_quota(1);
    store.set("a", "1").unwrap();
    // Overwriting an existing key is always allowed
    store.set("a", "2").unwrap();
    assert_eq!(
        store.set("b", "1"),
        Err(StoreError::QuotaExceeded { limit: 1 })
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn test_disabled_store_errors() {
    assert_eq!(DisabledStore.get("a"), Err(StoreError::Unavailable));
    assert_eq!(DisabledStore.set("a", "1"), Err(StoreError::Unavailable));
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_write_then_read() {
    let store = MemoryStore::new();
    let persistence = Persistence::new(store.clone());
    persistence.write(position(812.5, 40.0));

    assert_eq!(store.value(DOCUMENT_OFFSET_KEY), Some("812.5".to_string()));
    assert_eq!(store.value(THUMB_OFFSET_KEY), Some("40".to_string()));
    assert_eq!(persistence.read(), Some(position(812.5, 40.0)));
}

#[test]
fn test_read_empty_store() {
    let persistence = Persistence::new(MemoryStore::new());
    assert_eq!(persistence.read(), None);
    assert_eq!(persistence.read_or_default(), position(0.0, 0.0));
}

#[test]
fn test_disabled_store_degrades() {
    let persistence = Persistence::new(DisabledStore);
    persistence.write(position(100.0, 10.0));
    persistence.clear();
    assert_eq!(persistence.read(), None);
    assert_eq!(persistence.read_or_default(), position(0.0, 0.0));
}

#[test]
fn test_full_store_keeps_partial_write() {
    let store = MemoryStore::with_quota(1);
    let persistence = Persistence::new(store.clone());
    persistence.write(position(300.0, 30.0));

    assert_eq!(store.len(), 1);
    // The thumb key did not fit; it reads back as zero
    assert_eq!(persistence.read(), Some(position(300.0, 0.0)));
}

#[test]
fn test_garbage_value_ignored() {
    let store = MemoryStore::new();
    store.set(DOCUMENT_OFFSET_KEY, "not a number").unwrap();
    store.set(THUMB_OFFSET_KEY, "12").unwrap();
    let persistence = Persistence::new(store);
    assert_eq!(persistence.read(), None);
}

#[test]
fn test_pixel_suffix_accepted() {
    let store = MemoryStore::new();
    store.set(DOCUMENT_OFFSET_KEY, "640px").unwrap();
    let persistence = Persistence::new(store);
    assert_eq!(persistence.read(), Some(position(640.0, 0.0)));
}

#[test]
fn test_clear_removes_only_position_keys() {
    let store = MemoryStore::new();
    store.set("theme", "dark").unwrap();
    let persistence = Persistence::new(store.clone());
    persistence.write(position(10.0, 1.0));
    persistence.clear();

    assert_eq!(store.len(), 1);
    assert_eq!(store.value("theme"), Some("dark".to_string()));
}
