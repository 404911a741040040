//! Scoped temporary storage for double-width intermediates.
//!
//! A `ScratchPool` bounds the number of temporary double-width buffers
//! that may be live at the same time. `ScratchPool::acquire()` either
//! returns a `Scratch` guard holding the buffer, or fails with
//! `Error::ScratchExhausted`; the guard gives the slot back to the pool
//! when it is dropped, on every exit path of the caller (normal return,
//! early return through `?`, or unwinding).
//!
//! The live count is atomic, so a pool can be shared between threads
//! (e.g. as a `static`). Buffers are never shared or retained across
//! acquisitions.

use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::Error;

/// A bounded source of temporary buffers.
#[derive(Debug)]
pub struct ScratchPool {
    capacity: usize,
    live: AtomicUsize,
}

impl ScratchPool {

    /// Create a pool allowing at most `capacity` live buffers.
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            live: AtomicUsize::new(0),
        }
    }

    /// Create a pool that never refuses an acquisition.
    pub const fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// Maximum number of simultaneously live buffers.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of currently live buffers.
    pub fn in_use(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Acquire a buffer, initialized to `init`. The buffer is released
    /// when the returned guard is dropped.
    pub fn acquire<T>(&self, init: T) -> Result<Scratch<'_, T>, Error> {
        let cap = self.capacity;
        let r = self.live.fetch_update(Ordering::AcqRel, Ordering::Acquire,
            |n| if n < cap { Some(n + 1) } else { None });
        if r.is_err() {
            tracing::warn!(capacity = cap, "scratch pool exhausted");
            return Err(Error::ScratchExhausted { capacity: cap });
        }
        Ok(Scratch { pool: self, value: init })
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// A temporary buffer acquired from a `ScratchPool`.
#[derive(Debug)]
pub struct Scratch<'a, T> {
    pool: &'a ScratchPool,
    value: T,
}

impl<'a, T> Deref for Scratch<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<'a, T> DerefMut for Scratch<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<'a, T> Drop for Scratch<'a, T> {
    fn drop(&mut self) {
        self.pool.live.fetch_sub(1, Ordering::AcqRel);
    }
}
