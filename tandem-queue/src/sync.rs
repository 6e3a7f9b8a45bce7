//! Synchronization primitives, swappable for loom's instrumented versions.
//!
//! Everything in the queue that participates in cross-thread coordination
//! (the two mutexes, the node link pointers, the length counter) is imported
//! through this module so that `--cfg loom` builds run the same code under
//! loom's exhaustive scheduler.

#[cfg(not(loom))]
pub(crate) use parking_lot::Mutex;
#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

/// Adapter giving loom's mutex the non-poisoning `lock()` shape of
/// `parking_lot::Mutex`.
///
/// Loom's guard carries a poison `Result` like `std`'s; the queue never
/// leaks a panic while holding a lock, so unwrapping here cannot fire in
/// any interleaving loom explores.
#[cfg(loom)]
pub(crate) struct Mutex<T>(loom::sync::Mutex<T>);

#[cfg(loom)]
impl<T> Mutex<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(loom::sync::Mutex::new(value))
    }

    pub(crate) fn lock(&self) -> loom::sync::MutexGuard<'_, T> {
        self.0.lock().unwrap()
    }
}
