//! Terminal Core Module
//!
//! Platform-independent screen state. This module contains:
//! - Cell representation with colors and attributes
//! - Cursor position
//! - The contiguous grid and the scrollback ring buffer
//! - The screen buffer tying them together
//! - Mode flags
//! - Snapshot views and serializable screen state
//!
//! The core is deterministic: the same sequence of operations always
//! produces the same state.

mod cell;
mod cursor;
mod grid;
mod modes;
mod screen;
mod scrollback;
mod snapshot;

pub use cell::{Attributes, Cell, Color, Pen};
pub use cursor::Cursor;
pub use grid::Grid;
pub use modes::Modes;
pub use screen::{EraseRegion, Screen};
pub use scrollback::{Row, Scrollback, ScrollbackIter};
pub use snapshot::{ScreenState, SnapshotView, StateError};
