//! Readiness signal tests.
//!
//! These verify the one-shot broadcast consumers use to defer their own
//! setup until ingestion finishes:
//! - Waiters registered before a load fire exactly once
//! - Waiters registered after readiness fire immediately
//! - Cancelled waiters never fire

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ccg_catalog::{CardId, LoadState, RecordStore};

fn counting_waiter(hits: &Arc<AtomicUsize>) -> impl FnOnce() + Send + 'static {
    let hits = Arc::clone(hits);
    move || {
        hits.fetch_add(1, Ordering::SeqCst);
    }
}

/// Waiters registered before the first load fire once, on load.
#[test]
fn test_waiters_fire_on_load() {
    let mut store = RecordStore::default();
    let hits = Arc::new(AtomicUsize::new(0));
    assert!(store.on_ready(counting_waiter(&hits)).is_some());
    assert!(store.on_ready(counting_waiter(&hits)).is_some());
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    store.load("monster,1,A,Fire,1,1\n");
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    store.load("");
    store.reload("monster,2,B,Fire,1,1\n");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

/// Subscribing to a ready store calls the waiter synchronously, once.
#[test]
fn test_subscribe_after_ready() {
    let mut store = RecordStore::default();
    store.load("");
    assert_eq!(store.state(), LoadState::Ready);

    let hits = Arc::new(AtomicUsize::new(0));
    assert!(store.on_ready(counting_waiter(&hits)).is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    store.load("");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

/// A cancelled waiter is never called.
#[test]
fn test_cancel_before_load() {
    let mut store = RecordStore::default();
    let hits = Arc::new(AtomicUsize::new(0));
    let id = store.on_ready(counting_waiter(&hits)).expect("store not ready yet");
    assert!(store.cancel_ready(id));

    store.load("");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(!store.cancel_ready(id));
}

/// Waiters observe the loaded contents, never a partial store.
#[test]
fn test_waiter_sees_loaded_contents() {
    let store = Arc::new(Mutex::new(RecordStore::default()));
    let seen = Arc::new(Mutex::new(None));

    {
        let guard = store.lock().expect("lock");
        let seen = Arc::clone(&seen);
        guard.on_ready(move || {
            *seen.lock().expect("lock") = Some(());
        });
    }

    let mut guard = store.lock().expect("lock");
    guard.load("monster,1,A,Fire,1,1\nmonster,2,B,Fire,1,1\n");
    assert!(seen.lock().expect("lock").is_some());
    assert_eq!(guard.len(), 2);
    assert!(guard.get_by_id(CardId::new(2)).is_some());
}

/// Queries from other threads agree once the store is ready.
#[test]
fn test_concurrent_reads() {
    let mut store = RecordStore::default();
    store.load("monster,1,A,Fire,1,1\ncard,1,3\n");
    let store = Arc::new(store);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || (store.len(), store.inventory().get(CardId::new(1))))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("reader thread"), (1, 3));
    }
}
