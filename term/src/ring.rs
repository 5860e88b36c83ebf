// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Bounded ring of rows with a monotone logical base.
//!
//! Rows are addressed by *absolute* row number across the whole scrollback
//! history: the ring holds positions `[delta, delta + length)` and `delta`
//! only ever grows. Appending to a full ring evicts the oldest row and hands
//! it back to the caller so the row allocation can be recycled.
//!
//! The alternate screen uses a ring whose capacity equals the visible row
//! count, which is what makes it history-free.

use std::collections::VecDeque;

/// Fixed-capacity circular buffer of rows addressed by absolute position.
///
/// Invariants: `length <= max`, and `delta` never decreases.
#[derive(Debug)]
pub struct Ring<T> {
    items: VecDeque<T>,
    delta: i64,
    max: usize,
}

impl<T> Ring<T> {
    /// Create an empty ring holding at most `max` rows, with logical base
    /// `delta`.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero.
    #[must_use]
    pub fn new(max: usize, delta: i64) -> Self {
        assert!(max > 0, "ring capacity must be non-zero");
        Self {
            // The backing store is sized once, here. Ring operations never
            // push the element count past `max`, so no later reallocation.
            items: VecDeque::with_capacity(max),
            delta,
            max,
        }
    }

    #[must_use]
    pub fn max(&self) -> usize { self.max }

    /// Logical position of the oldest retained row.
    #[must_use]
    pub fn delta(&self) -> i64 { self.delta }

    #[must_use]
    pub fn length(&self) -> usize { self.items.len() }

    /// One past the newest retained row, i.e. `delta + length`.
    #[must_use]
    pub fn next(&self) -> i64 { self.delta + self.items.len() as i64 }

    #[must_use]
    pub fn contains(&self, position: i64) -> bool {
        position >= self.delta && position < self.next()
    }

    /// Row at absolute `position`. Precondition: `contains(position)`.
    #[must_use]
    pub fn get(&self, position: i64) -> Option<&T> {
        if !self.contains(position) {
            return None;
        }
        self.items.get(usize::try_from(position - self.delta).ok()?)
    }

    pub fn get_mut(&mut self, position: i64) -> Option<&mut T> {
        if !self.contains(position) {
            return None;
        }
        self.items.get_mut(usize::try_from(position - self.delta).ok()?)
    }

    /// Append at `next()`. When full, the row at `delta` is evicted and
    /// returned for reuse, and `delta` advances by one.
    pub fn append(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.max {
            self.delta += 1;
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Insert at `position`, shifting rows at `[position, next())` forward by
    /// one. When full, the oldest row is evicted first (and returned).
    pub fn insert(&mut self, position: i64, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.max {
            tracing::trace!(position, delta = self.delta, "ring full, evicting oldest row");
            self.delta += 1;
            self.items.pop_front()
        } else {
            None
        };
        // Eviction may have advanced `delta` past the requested position;
        // the insertion then lands on the (new) oldest slot.
        let index = usize::try_from((position - self.delta).max(0))
            .unwrap_or(0)
            .min(self.items.len());
        self.items.insert(index, item);
        evicted
    }

    /// Remove and return the row at `position`, compacting the rest. `delta`
    /// is unchanged.
    pub fn remove(&mut self, position: i64) -> Option<T> {
        if !self.contains(position) {
            return None;
        }
        let index = usize::try_from(position - self.delta).ok()?;
        self.items.remove(index)
    }

    /// Drop every row, re-basing the ring at `delta`.
    pub fn reset(&mut self, delta: i64) {
        self.items.clear();
        self.delta = delta.max(self.delta);
    }
}
