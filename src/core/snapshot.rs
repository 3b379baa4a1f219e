//! Screen snapshots
//!
//! Two kinds of snapshot live here:
//!
//! - [`SnapshotView`] is the borrowed, scroll-offset-aware projection the
//!   renderer reads each frame. It references rows in place and is only valid
//!   until the next mutation of the screen.
//! - [`ScreenState`] is an owned, serializable copy of the whole buffer used
//!   to save and restore a session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cell::Cell;

/// Read-only projection of scrollback + live grid into exactly `height` rows
#[derive(Debug, Clone)]
pub struct SnapshotView<'a> {
    pub(crate) rows: Vec<&'a [Cell]>,
    pub(crate) cursor: Option<(usize, usize)>,
}

impl<'a> SnapshotView<'a> {
    /// Number of rows in the view (always the screen height)
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Get a row of the view. Rows taken from scrollback keep the width they
    /// had when they scrolled off.
    pub fn row(&self, index: usize) -> Option<&'a [Cell]> {
        self.rows.get(index).copied()
    }

    /// Iterate over rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &'a [Cell]> + '_ {
        self.rows.iter().copied()
    }

    /// Cursor position `(col, row)` within the view, if its row is on screen
    pub fn cursor(&self) -> Option<(usize, usize)> {
        self.cursor
    }

    /// Plain text of the view with trailing spaces trimmed per row
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let line: String = row.iter().map(|c| c.ch).collect();
                line.trim_end().to_string()
            })
            .collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }
}

/// Errors raised when restoring a [`ScreenState`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("invalid screen dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("grid holds {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },
}

/// Complete, owned copy of a screen buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenState {
    pub width: usize,
    pub height: usize,
    pub cursor_x: usize,
    pub cursor_y: usize,
    /// Live grid, row-major
    pub grid: Vec<Cell>,
    /// Scrollback rows, oldest first
    pub scrollback: Vec<Vec<Cell>>,
}

impl ScreenState {
    /// Check the state is internally consistent and return the grid's cell count
    pub fn validate(&self) -> Result<usize, StateError> {
        let invalid = StateError::InvalidDimensions {
            width: self.width,
            height: self.height,
        };
        if self.width == 0 || self.height == 0 {
            return Err(invalid);
        }
        let expected = self.width.checked_mul(self.height).ok_or(invalid)?;
        if self.grid.len() != expected {
            return Err(StateError::CellCountMismatch {
                expected,
                actual: self.grid.len(),
            });
        }
        Ok(expected)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
