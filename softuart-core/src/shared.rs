//! Ring buffer shared between interrupt and main-loop contexts
//!
//! Each direction has exactly one producer and one consumer, but they live
//! in different execution contexts. Every access runs inside a scoped
//! critical section so the `(index, count)` pair is never observed half
//! updated by the other context.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::ring_buffer::RingBuffer;

/// Critical-section guarded [`RingBuffer`]
pub struct SharedRingBuffer<T, const N: usize> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<RingBuffer<T, N>>>,
}

impl<T: Copy + Default, const N: usize> Default for SharedRingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> SharedRingBuffer<T, N> {
    /// Create an empty shared ring buffer
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(RingBuffer::new())),
        }
    }

    /// Run `f` with exclusive access to the ring
    ///
    /// Interrupts are masked for the duration of `f` and restored on every
    /// exit path. Keep `f` short.
    pub fn with<R>(&self, f: impl FnOnce(&mut RingBuffer<T, N>) -> R) -> R {
        self.inner.lock(|ring| f(&mut ring.borrow_mut()))
    }

    /// Append a value, dropping it if the ring is full
    pub fn put(&self, value: T) {
        self.with(|ring| ring.put(value))
    }

    /// Remove the oldest value, or `T::default()` when empty
    pub fn get(&self) -> T {
        self.with(|ring| ring.get())
    }

    /// Remove the oldest value
    pub fn pop(&self) -> Option<T> {
        self.with(|ring| ring.pop())
    }

    /// Check if no values are queued
    pub fn is_empty(&self) -> bool {
        self.with(|ring| ring.is_empty())
    }

    /// Check if every slot is occupied
    pub fn is_full(&self) -> bool {
        self.with(|ring| ring.is_full())
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        self.with(|ring| ring.len())
    }

    /// Number of free slots
    pub fn free(&self) -> usize {
        self.with(|ring| ring.capacity() - ring.len())
    }

    /// Total number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of values dropped on overflow
    pub fn dropped(&self) -> u32 {
        self.with(|ring| ring.dropped())
    }

    /// Discard all queued values
    pub fn clear(&self) {
        self.with(|ring| ring.clear())
    }
}
