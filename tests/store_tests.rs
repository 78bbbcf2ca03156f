//! Store Contract Tests
//!
//! Exercises the memory backend against the store contract: CAS
//! correctness, byte-order navigation, and forced-bypass semantics.

use keelkv::{Durability, Entry, KeelError, MemoryStore, Store};

// =============================================================================
// Helper Functions
// =============================================================================

fn entry(key: &[u8], value: &[u8], version: &[u8]) -> Entry {
    Entry {
        key: key.to_vec(),
        value: value.to_vec(),
        version: version.to_vec(),
        ..Entry::default()
    }
}

fn put_fresh(store: &MemoryStore, key: &[u8], value: &[u8], version: &[u8]) {
    store
        .put(key, b"", entry(key, value, version), Durability::Sync)
        .unwrap();
}

// =============================================================================
// CAS Correctness Tests
// =============================================================================

#[test]
fn test_put_fresh_key_with_empty_expected_version() {
    let store = MemoryStore::new();

    put_fresh(&store, b"a", b"v1", b"1");

    let got = store.get(b"a").unwrap();
    assert_eq!(got.value, b"v1");
    assert_eq!(got.version, b"1");
}

#[test]
fn test_put_fresh_key_with_nonempty_expected_version_fails() {
    let store = MemoryStore::new();

    let err = store
        .put(b"a", b"0", entry(b"a", b"v1", b"1"), Durability::Sync)
        .unwrap_err();
    assert!(matches!(err, KeelError::VersionMismatch));
    assert!(store.is_empty());
}

#[test]
fn test_put_succeeds_iff_version_matches() {
    let store = MemoryStore::new();
    put_fresh(&store, b"a", b"v1", b"1");

    // Wrong expected version: store unchanged.
    let err = store
        .put(b"a", b"0", entry(b"a", b"v2", b"2"), Durability::Sync)
        .unwrap_err();
    assert!(matches!(err, KeelError::VersionMismatch));
    assert_eq!(store.get(b"a").unwrap().value, b"v1");

    // Matching expected version: replaced.
    store
        .put(b"a", b"1", entry(b"a", b"v2", b"2"), Durability::Sync)
        .unwrap();
    let got = store.get(b"a").unwrap();
    assert_eq!(got.value, b"v2");
    assert_eq!(got.version, b"2");
}

#[test]
fn test_version_comparison_is_byte_exact() {
    let store = MemoryStore::new();
    put_fresh(&store, b"a", b"v", b"01");

    // "1" and "01" might compare equal numerically; they are different
    // byte sequences and must mismatch.
    let err = store
        .put(b"a", b"1", entry(b"a", b"v2", b"2"), Durability::Sync)
        .unwrap_err();
    assert!(matches!(err, KeelError::VersionMismatch));
}

#[test]
fn test_delete_with_matching_version() {
    let store = MemoryStore::new();
    put_fresh(&store, b"a", b"v", b"1");

    store.delete(b"a", b"1", Durability::Sync).unwrap();
    assert!(matches!(store.get(b"a"), Err(KeelError::NotFound)));
}

#[test]
fn test_delete_with_wrong_version_fails() {
    let store = MemoryStore::new();
    put_fresh(&store, b"a", b"v", b"1");

    let err = store.delete(b"a", b"2", Durability::Sync).unwrap_err();
    assert!(matches!(err, KeelError::VersionMismatch));
    assert!(store.get(b"a").is_ok());
}

#[test]
fn test_delete_absent_key_is_not_found() {
    let store = MemoryStore::new();

    let err = store.delete(b"ghost", b"", Durability::Sync).unwrap_err();
    assert!(matches!(err, KeelError::NotFound));
}

// =============================================================================
// Forced Operation Tests
// =============================================================================

#[test]
fn test_put_forced_bypasses_version_check() {
    let store = MemoryStore::new();
    put_fresh(&store, b"a", b"v1", b"1");

    store
        .put_forced(b"a", entry(b"a", b"repaired", b"9"), Durability::Sync)
        .unwrap();
    let got = store.get(b"a").unwrap();
    assert_eq!(got.value, b"repaired");
    assert_eq!(got.version, b"9");
}

#[test]
fn test_put_forced_is_idempotent() {
    let store = MemoryStore::new();

    store
        .put_forced(b"a", entry(b"a", b"v", b"1"), Durability::Sync)
        .unwrap();
    let first = store.get(b"a").unwrap();

    store
        .put_forced(b"a", entry(b"a", b"v", b"1"), Durability::Sync)
        .unwrap();
    let second = store.get(b"a").unwrap();

    assert_eq!(first, second);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_delete_forced_absent_key_is_ok() {
    let store = MemoryStore::new();

    store.delete_forced(b"ghost", Durability::Sync).unwrap();
    store.delete_forced(b"ghost", Durability::Async).unwrap();
}

// =============================================================================
// Ordering / Navigation Tests
// =============================================================================

#[test]
fn test_get_next_returns_smallest_strictly_greater() {
    let store = MemoryStore::new();
    for key in [&b"a"[..], b"c", b"e"] {
        put_fresh(&store, key, b"v", b"1");
    }

    assert_eq!(store.get_next(b"a").unwrap().key, b"c");
    // The probe key need not exist.
    assert_eq!(store.get_next(b"b").unwrap().key, b"c");
    assert_eq!(store.get_next(b"c").unwrap().key, b"e");
    assert!(matches!(store.get_next(b"e"), Err(KeelError::NotFound)));
}

#[test]
fn test_get_previous_returns_largest_strictly_less() {
    let store = MemoryStore::new();
    for key in [&b"a"[..], b"c", b"e"] {
        put_fresh(&store, key, b"v", b"1");
    }

    assert_eq!(store.get_previous(b"e").unwrap().key, b"c");
    assert_eq!(store.get_previous(b"d").unwrap().key, b"c");
    assert_eq!(store.get_previous(b"c").unwrap().key, b"a");
    assert!(matches!(store.get_previous(b"a"), Err(KeelError::NotFound)));
}

#[test]
fn test_ordering_is_unsigned_byte_lexicographic() {
    let store = MemoryStore::new();
    put_fresh(&store, &[0x00], b"v", b"1");
    put_fresh(&store, &[0x7f], b"v", b"1");
    put_fresh(&store, &[0x80], b"v", b"1");
    put_fresh(&store, &[0xff], b"v", b"1");

    // 0x80 sorts after 0x7f: unsigned comparison, not signed.
    assert_eq!(store.get_next(&[0x7f]).unwrap().key, vec![0x80]);
    assert_eq!(store.get_next(&[0x80]).unwrap().key, vec![0xff]);
    assert_eq!(store.get_previous(&[0x80]).unwrap().key, vec![0x7f]);
}

#[test]
fn test_navigation_with_prefix_keys() {
    let store = MemoryStore::new();
    put_fresh(&store, b"app", b"v", b"1");
    put_fresh(&store, b"apple", b"v", b"1");
    put_fresh(&store, b"apples", b"v", b"1");

    // A shorter key sorts before its extensions.
    assert_eq!(store.get_next(b"app").unwrap().key, b"apple");
    assert_eq!(store.get_next(b"apple").unwrap().key, b"apples");
    assert_eq!(store.get_previous(b"apple").unwrap().key, b"app");
}

#[test]
fn test_get_next_on_empty_store() {
    let store = MemoryStore::new();
    assert!(matches!(store.get_next(b""), Err(KeelError::NotFound)));
    assert!(matches!(store.get_previous(b"z"), Err(KeelError::NotFound)));
}
