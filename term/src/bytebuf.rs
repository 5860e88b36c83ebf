// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Growable byte queue with consume-prefix semantics.
//!
//! Both the incoming stream (child → terminal) and the outgoing stream
//! (terminal → child) are staged in a [`ByteBuffer`]. The consumer side only
//! ever drops a prefix, so `consume` is a head-offset bump; the storage is
//! reclaimed once the dead prefix outgrows half the capacity.

/// FIFO byte staging area for the child I/O streams.
///
/// No random-access writes: producers [`append`](ByteBuffer::append) at the
/// tail, consumers inspect [`as_slice`](ByteBuffer::as_slice) and drop a
/// prefix with [`consume`](ByteBuffer::consume).
#[derive(Debug, Default)]
pub struct ByteBuffer {
    storage: Vec<u8>,
    /// Index of the first live byte in `storage`.
    head: usize,
}

impl ByteBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Number of live bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.storage.len() - self.head }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// The live bytes, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] { &self.storage[self.head..] }

    /// Append `bytes` at the tail.
    pub fn append(&mut self, bytes: &[u8]) { self.storage.extend_from_slice(bytes); }

    /// Drop the first `n` live bytes.
    ///
    /// Amortised O(1): the head offset advances, and the dead prefix is only
    /// compacted away once it exceeds half of the allocated capacity.
    ///
    /// # Panics
    ///
    /// Panics if `n > self.len()`.
    pub fn consume(&mut self, n: usize) {
        assert!(n <= self.len(), "consume({n}) past end of buffer ({})", self.len());
        self.head += n;
        if self.head > self.storage.capacity() / 2 {
            self.reclaim();
        }
    }

    /// Drop all live bytes.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.head = 0;
    }

    /// Ensure at least `min` bytes of tail capacity are available without
    /// reallocating mid-append.
    pub fn reserve(&mut self, min: usize) { self.storage.reserve(min); }

    fn reclaim(&mut self) {
        self.storage.copy_within(self.head.., 0);
        self.storage.truncate(self.len());
        self.head = 0;
    }
}
