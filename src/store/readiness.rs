//! One-shot readiness signal.
//!
//! `ReadySignal` starts unfired. [`fire`](ReadySignal::fire) flips it for
//! good and calls every pending waiter exactly once; a waiter registered
//! after that is called immediately, on the subscribing thread. There is
//! no way back to unfired.
//!
//! Waiters are taken out of the lock before being called, so a callback
//! may subscribe again or query the store without deadlocking.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Handle for cancelling a pending waiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Raw numeric value.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

type Waiter = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct Inner {
    fired: bool,
    next_id: u64,
    waiters: Vec<(SubscriptionId, Waiter)>,
}

/// A delivered-once flag plus its waiter list.
#[derive(Default)]
pub struct ReadySignal {
    inner: Mutex<Inner>,
}

impl ReadySignal {
    /// Create an unfired signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True once [`fire`](Self::fire) has run.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.lock().fired
    }

    /// Number of waiters still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().waiters.len()
    }

    /// Register `waiter`.
    ///
    /// Returns `None` when the signal has already fired, in which case
    /// `waiter` has been called before this returns.
    pub fn subscribe<F>(&self, waiter: F) -> Option<SubscriptionId>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut inner = self.lock();
        if inner.fired {
            drop(inner);
            waiter();
            return None;
        }
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.waiters.push((id, Box::new(waiter)));
        Some(id)
    }

    /// Remove a pending waiter. Returns false if it already ran or never existed.
    pub fn cancel(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.waiters.len();
        inner.waiters.retain(|(sid, _)| *sid != id);
        inner.waiters.len() != before
    }

    /// Mark the signal fired and run every pending waiter.
    ///
    /// Returns how many waiters were called. Firing again only drains
    /// waiters that raced in since the last call.
    pub fn fire(&self) -> usize {
        let waiters = {
            let mut inner = self.lock();
            inner.fired = true;
            std::mem::take(&mut inner.waiters)
        };
        let called = waiters.len();
        for (_, waiter) in waiters {
            waiter();
        }
        called
    }
}

impl std::fmt::Debug for ReadySignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ReadySignal")
            .field("fired", &inner.fired)
            .field("pending", &inner.waiters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let make = move || {
            let h = Arc::clone(&h);
            Box::new(move || {
                h.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send>
        };
        (hits, make)
    }

    #[test]
    fn test_waiters_called_once_on_fire() {
        let signal = ReadySignal::new();
        let (hits, make) = counter();
        assert!(signal.subscribe(make()).is_some());
        assert!(signal.subscribe(make()).is_some());
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        assert_eq!(signal.fire(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        assert_eq!(signal.fire(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(signal.pending(), 0);
    }

    #[test]
    fn test_subscribe_after_fire_is_immediate() {
        let signal = ReadySignal::new();
        signal.fire();
        let (hits, make) = counter();
        assert!(signal.subscribe(make()).is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel() {
        let signal = ReadySignal::new();
        let (hits, make) = counter();
        let id = signal.subscribe(make()).unwrap();
        signal.subscribe(make());
        assert!(signal.cancel(id));
        assert!(!signal.cancel(id));

        signal.fire();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_waiter_may_resubscribe() {
        let signal = Arc::new(ReadySignal::new());
        let (hits, make) = counter();
        let inner_signal = Arc::clone(&signal);
        let inner_waiter = make();
        signal.subscribe(move || {
            inner_signal.subscribe(inner_waiter);
        });

        signal.fire();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
