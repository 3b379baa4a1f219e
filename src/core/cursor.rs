//! Cursor position
//!
//! Every move clamps into the grid; out-of-range requests from the byte
//! stream are never errors.

use serde::{Deserialize, Serialize};

/// Cursor position plus the deferred-wrap flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Column position (0-indexed)
    pub x: usize,
    /// Row position (0-indexed)
    pub y: usize,
    /// The last write filled the final column; the next printable wraps first
    pub wrap_pending: bool,
}

impl Cursor {
    /// Move cursor to absolute position, clamping to bounds
    pub fn move_to(&mut self, x: usize, y: usize, width: usize, height: usize) {
        self.x = x.min(width.saturating_sub(1));
        self.y = y.min(height.saturating_sub(1));
        self.wrap_pending = false;
    }

    /// Move cursor up by n rows, stopping at the top
    pub fn move_up(&mut self, n: usize) {
        self.y = self.y.saturating_sub(n);
        self.wrap_pending = false;
    }

    /// Move cursor down by n rows, stopping at the bottom
    pub fn move_down(&mut self, n: usize, height: usize) {
        self.y = self.y.saturating_add(n).min(height.saturating_sub(1));
        self.wrap_pending = false;
    }

    /// Move cursor left by n columns, stopping at column 0
    pub fn move_left(&mut self, n: usize) {
        self.x = self.x.saturating_sub(n);
        self.wrap_pending = false;
    }

    /// Move cursor right by n columns, stopping at the last column
    pub fn move_right(&mut self, n: usize, width: usize) {
        self.x = self.x.saturating_add(n).min(width.saturating_sub(1));
        self.wrap_pending = false;
    }

    /// Set column, clamping to bounds
    pub fn set_col(&mut self, x: usize, width: usize) {
        self.x = x.min(width.saturating_sub(1));
        self.wrap_pending = false;
    }

    /// Carriage return - move to column 0
    pub fn carriage_return(&mut self) {
        self.x = 0;
        self.wrap_pending = false;
    }

    /// Pull the position back inside a `width × height` grid
    pub fn clamp(&mut self, width: usize, height: usize) {
        self.x = self.x.min(width.saturating_sub(1));
        self.y = self.y.min(height.saturating_sub(1));
    }
}
