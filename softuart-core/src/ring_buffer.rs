//! Fixed-capacity FIFO
//!
//! Backing store for both directions of the transceiver. When the buffer
//! is full the newest value is dropped; the oldest queued values are never
//! evicted. Drops are counted but not reported to either side.

/// Fixed-capacity ring buffer
///
/// `head` is the next slot to write, `tail` the next slot to read, and
/// `count` the number of occupied slots. Both indices stay in `[0, N)`.
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    slots: [T; N],
    head: usize,
    tail: usize,
    count: usize,
    dropped: u32,
}

impl<T: Copy + Default, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> RingBuffer<T, N> {
    /// Create an empty ring buffer
    pub fn new() -> Self {
        Self {
            slots: [T::default(); N],
            head: 0,
            tail: 0,
            count: 0,
            dropped: 0,
        }
    }

    /// Append a value
    ///
    /// If the buffer is full the value is discarded and only the drop
    /// counter changes.
    pub fn put(&mut self, value: T) {
        if self.count < N {
            self.slots[self.head] = value;
            self.head = Self::advance(self.head);
            self.count += 1;
        } else {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// Remove and return the oldest value
    ///
    /// Returns `None` when the buffer is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let value = self.slots[self.tail];
        self.tail = Self::advance(self.tail);
        self.count -= 1;
        Some(value)
    }

    /// Remove and return the oldest value, or `T::default()` when empty
    ///
    /// Callers that need to tell "empty" apart from a real default value
    /// must check [`is_empty`](Self::is_empty) first or use
    /// [`pop`](Self::pop).
    pub fn get(&mut self) -> T {
        self.pop().unwrap_or_default()
    }

    /// Check if no values are queued
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if every slot is occupied
    pub fn is_full(&self) -> bool {
        self.count == N
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        self.count
    }

    /// Total number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of values discarded because the buffer was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Discard all queued values and reset the drop counter
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        self.dropped = 0;
    }

    fn advance(index: usize) -> usize {
        let next = index + 1;
        if next == N {
            0
        } else {
            next
        }
    }
}
