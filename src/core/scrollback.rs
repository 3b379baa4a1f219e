//! Scrollback buffer implementation
//!
//! The scrollback buffer stores rows that have scrolled off the top of the
//! live grid. It's implemented as a ring buffer with a fixed maximum size;
//! once full, each push overwrites the oldest row.

use super::cell::Cell;

/// One scrolled-off row. Rows keep the width they had when they left the grid.
pub type Row = Box<[Cell]>;

/// Ring buffer for scrollback rows
#[derive(Debug, Clone)]
pub struct Scrollback {
    /// Backing storage, grows up to `capacity` then wraps
    rows: Vec<Row>,
    /// Index of the oldest row (head of ring buffer)
    head: usize,
    /// Maximum number of rows to store
    capacity: usize,
}

impl Scrollback {
    /// Create a new scrollback buffer with the given capacity.
    ///
    /// Panics if `capacity` is zero; configuration is validated long before
    /// a buffer is built, so a zero here is a bug.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "scrollback capacity must be positive");
        Self {
            rows: Vec::with_capacity(capacity.min(1024)),
            head: 0,
            capacity,
        }
    }

    /// Get the number of rows in the scrollback
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the scrollback is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the maximum capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push a row, dropping the oldest one if the buffer is full
    pub fn push(&mut self, row: Row) {
        if self.rows.len() < self.capacity {
            self.rows.push(row);
        } else {
            self.rows[self.head] = row;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Push a copy of `cells`, reusing the evicted row's allocation when the
    /// widths match. This is the path taken by every scroll.
    pub fn push_slice(&mut self, cells: &[Cell]) {
        if self.rows.len() < self.capacity {
            self.rows.push(cells.into());
            return;
        }
        let slot = &mut self.rows[self.head];
        if slot.len() == cells.len() {
            slot.copy_from_slice(cells);
        } else {
            *slot = cells.into();
        }
        self.head = (self.head + 1) % self.capacity;
    }

    /// Get a row by index (0 = oldest row in scrollback)
    pub fn get(&self, index: usize) -> Option<&[Cell]> {
        if index >= self.rows.len() {
            return None;
        }
        let actual = (self.head + index) % self.rows.len();
        Some(&self.rows[actual])
    }

    /// Clear all rows from the scrollback
    pub fn clear(&mut self) {
        self.rows.clear();
        self.head = 0;
    }

    /// Iterate over all rows from oldest to newest
    pub fn iter(&self) -> ScrollbackIter<'_> {
        ScrollbackIter {
            scrollback: self,
            index: 0,
        }
    }
}

/// Iterator over scrollback rows, oldest first
pub struct ScrollbackIter<'a> {
    scrollback: &'a Scrollback,
    index: usize,
}

impl<'a> Iterator for ScrollbackIter<'a> {
    type Item = &'a [Cell];

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.scrollback.get(self.index)?;
        self.index += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.scrollback.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScrollbackIter<'_> {}
