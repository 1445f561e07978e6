// Copyright 2026 the Shelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// Opaque handle for a cell view.
///
/// Handles are recycled: once a cell is discarded its handle returns to the
/// [`ReusePool`] and may back a different item later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellHandle(pub u32);

/// Free list of cell handles.
#[derive(Clone, Debug, Default)]
pub struct ReusePool {
    free: Vec<CellHandle>,
    next: u32,
}

impl ReusePool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle and whether it was recycled.
    ///
    /// Recycled handles are handed out most recently released first.
    ///
    /// # Panics
    ///
    /// Panics if the handle space is exhausted.
    pub fn acquire(&mut self) -> (CellHandle, bool) {
        if let Some(handle) = self.free.pop() {
            return (handle, true);
        }
        let handle = CellHandle(self.next);
        let Some(next) = self.next.checked_add(1) else {
            panic!("CellHandle space exhausted");
        };
        self.next = next;
        (handle, false)
    }

    /// Returns a handle to the pool.
    pub fn release(&mut self, handle: CellHandle) {
        debug_assert!(!self.free.contains(&handle), "handle released twice");
        self.free.push(handle);
    }

    /// Number of handles waiting for reuse.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Number of handles ever created.
    #[must_use]
    pub fn created(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn released_handles_are_reused_lifo() {
        let mut pool = ReusePool::new();
        let (a, reused_a) = pool.acquire();
        let (b, _) = pool.acquire();
        assert!(!reused_a);
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.idle(), 2);
        assert_eq!(pool.acquire(), (b, true));
        assert_eq!(pool.acquire(), (a, true));
        assert_eq!(pool.acquire(), (CellHandle(2), false));
        assert_eq!(pool.created(), 3);
    }

    #[test]
    #[should_panic(expected = "CellHandle space exhausted")]
    fn exhausted_handle_space_panics() {
        let mut pool = ReusePool {
            free: Vec::new(),
            next: u32::MAX,
        };
        let _ = pool.acquire();
    }

    #[test]
    fn recycled_handle_survives_exhaustion() {
        let mut pool = ReusePool {
            free: vec![CellHandle(4)],
            next: u32::MAX,
        };
        assert_eq!(pool.acquire(), (CellHandle(4), true));
    }
}
