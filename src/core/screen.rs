//! Screen buffer
//!
//! The live grid, its scrollback history and the cursor, kept mutually
//! consistent. All mutation primitives the dispatcher needs live here:
//! printing, line feed/scroll, erase, cursor motion and resize.
//!
//! The cursor is clamped into the grid after every public operation.

use tracing::warn;

use super::cell::Cell;
use super::cursor::Cursor;
use super::grid::Grid;
use super::scrollback::Scrollback;
use super::snapshot::{ScreenState, SnapshotView, StateError};

/// Region selector for [`Screen::erase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseRegion {
    /// Cursor column to end of line (EL 0)
    ToEndOfLine,
    /// Start of line through the cursor column (EL 1)
    ToStartOfLine,
    /// Whole cursor line (EL 2)
    Line,
    /// Cursor to end of screen (ED 0)
    ToEndOfScreen,
    /// Start of screen up to, but not including, the cursor (ED 1)
    ToStartOfScreen,
    /// Whole screen; also homes the cursor (ED 2)
    Screen,
    /// Scrollback history only (ED 3)
    Scrollback,
    /// `n` cells starting at the cursor, clipped to the line (ECH)
    Chars(usize),
}

/// The main screen structure
#[derive(Debug, Clone)]
pub struct Screen {
    grid: Grid,
    scrollback: Scrollback,
    cursor: Cursor,
    /// Default cells at the current width, lent out for padding rows in views
    blank_row: Vec<Cell>,
}

fn sanitize_size(width: usize, height: usize) -> (usize, usize) {
    if width == 0 || height == 0 {
        warn!(width, height, "screen dimension of zero clamped to one");
    }
    (width.max(1), height.max(1))
}

impl Screen {
    /// Create a new screen. Panics if `scrollback_capacity` is zero.
    pub fn new(width: usize, height: usize, scrollback_capacity: usize) -> Self {
        let (width, height) = sanitize_size(width, height);
        Self {
            grid: Grid::new(width, height),
            scrollback: Scrollback::new(scrollback_capacity),
            cursor: Cursor::default(),
            blank_row: vec![Cell::default(); width],
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn scrollback_len(&self) -> usize {
        self.scrollback.len()
    }

    /// Get a cell of the live grid
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.grid.cell(x, y)
    }

    /// Get a row of the live grid
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        (y < self.height()).then(|| self.grid.row(y))
    }

    /// Resize the live grid, keeping the overlapping top-left region.
    /// Scrollback is left as is.
    pub fn resize(&mut self, width: usize, height: usize) {
        let (width, height) = sanitize_size(width, height);
        if width == self.width() && height == self.height() {
            return;
        }
        self.grid.resize(width, height);
        self.blank_row = vec![Cell::default(); width];
        self.cursor.clamp(width, height);
        self.cursor.wrap_pending = false;
    }

    /// Write `cell` at the cursor without advancing
    pub fn write_at_cursor(&mut self, cell: Cell) {
        let (width, height) = (self.width(), self.height());
        self.cursor.clamp(width, height);
        if let Some(slot) = self.grid.cell_mut(self.cursor.x, self.cursor.y) {
            *slot = cell;
        }
    }

    /// Write `cell` and advance one column.
    ///
    /// Reaching the last column arms a deferred wrap: with `autowrap` the next
    /// print moves to the start of the following line first, without it the
    /// last column is overwritten.
    pub fn print(&mut self, cell: Cell, autowrap: bool) {
        if self.cursor.wrap_pending {
            self.cursor.wrap_pending = false;
            if autowrap {
                self.cursor.x = 0;
                self.new_line();
            }
        }

        self.write_at_cursor(cell);

        if self.cursor.x + 1 < self.width() {
            self.cursor.x += 1;
        } else if autowrap {
            self.cursor.wrap_pending = true;
        }
    }

    /// Move down one row, scrolling the top row into scrollback when the
    /// cursor is already on the last row. Leaves the column alone.
    pub fn new_line(&mut self) {
        self.cursor.wrap_pending = false;
        let last = self.height() - 1;
        if self.cursor.y < last {
            self.cursor.y += 1;
            return;
        }

        self.cursor.y = last;
        self.scrollback.push_slice(self.grid.row(0));
        self.grid.rotate_up().fill(Cell::default());
    }

    /// Carriage return - move to column 0
    pub fn carriage_return(&mut self) {
        self.cursor.carriage_return();
    }

    /// Move one column left unless already at column 0
    pub fn backspace(&mut self) {
        self.cursor.move_left(1);
    }

    pub fn move_up(&mut self, n: usize) {
        self.cursor.move_up(n);
    }

    pub fn move_down(&mut self, n: usize) {
        let height = self.height();
        self.cursor.move_down(n, height);
    }

    pub fn move_left(&mut self, n: usize) {
        self.cursor.move_left(n);
    }

    pub fn move_right(&mut self, n: usize) {
        let width = self.width();
        self.cursor.move_right(n, width);
    }

    /// Move to an absolute column (0-based)
    pub fn set_column(&mut self, x: usize) {
        let width = self.width();
        self.cursor.set_col(x, width);
    }

    /// Move to an absolute position (0-based), clamped
    pub fn move_to(&mut self, x: usize, y: usize) {
        let (width, height) = (self.width(), self.height());
        self.cursor.move_to(x, y, width, height);
    }

    /// Fill `region` with `blank`, normally a space in the current pen
    pub fn erase(&mut self, region: EraseRegion, blank: Cell) {
        let Cursor { x, y, .. } = self.cursor;
        let width = self.width();
        let height = self.height();

        match region {
            EraseRegion::ToEndOfLine => self.grid.fill_row(y, x..width, blank),
            EraseRegion::ToStartOfLine => self.grid.fill_row(y, 0..x + 1, blank),
            EraseRegion::Line => self.grid.fill_row(y, 0..width, blank),
            EraseRegion::ToEndOfScreen => {
                self.grid.fill_row(y, x..width, blank);
                self.grid.fill_rows(y + 1..height, blank);
            }
            EraseRegion::ToStartOfScreen => {
                self.grid.fill_rows(0..y, blank);
                self.grid.fill_row(y, 0..x, blank);
            }
            EraseRegion::Screen => {
                self.grid.fill(blank);
                self.cursor.move_to(0, 0, width, height);
            }
            EraseRegion::Scrollback => self.scrollback.clear(),
            EraseRegion::Chars(n) => self.grid.fill_row(y, x..x.saturating_add(n), blank),
        }
    }

    /// Project scrollback + grid into exactly `height` rows.
    ///
    /// `offset` counts rows scrolled back from the live view and is clamped
    /// to the scrollback length. No cells are copied.
    pub fn snapshot_view(&self, offset: usize) -> SnapshotView<'_> {
        let sb_len = self.scrollback.len();
        let height = self.height();
        let offset = offset.min(sb_len);
        let first = sb_len - offset;

        let rows = (first..first + height)
            .map(|index| {
                if index < sb_len {
                    self.scrollback.get(index).unwrap_or(&self.blank_row[..])
                } else if index - sb_len < height {
                    self.grid.row(index - sb_len)
                } else {
                    &self.blank_row[..]
                }
            })
            .collect();

        let view_row = self.cursor.y + offset;
        SnapshotView {
            rows,
            cursor: (view_row < height).then_some((self.cursor.x, view_row)),
        }
    }

    /// Owned copy of dimensions, grid, scrollback and cursor
    pub fn state(&self) -> ScreenState {
        ScreenState {
            width: self.width(),
            height: self.height(),
            cursor_x: self.cursor.x,
            cursor_y: self.cursor.y,
            grid: self.grid.to_vec(),
            scrollback: self.scrollback.iter().map(<[Cell]>::to_vec).collect(),
        }
    }

    /// Replace the whole buffer with `state`.
    ///
    /// The state is validated first; on error the screen is untouched.
    /// Scrollback beyond this screen's capacity keeps only the newest rows.
    pub fn restore(&mut self, state: ScreenState) -> Result<(), StateError> {
        let expected = state.validate()?;
        let ScreenState {
            width,
            height,
            cursor_x,
            cursor_y,
            grid,
            scrollback,
        } = state;

        let actual = grid.len();
        let grid = Grid::from_cells(width, height, grid).ok_or(StateError::CellCountMismatch {
            expected,
            actual,
        })?;
        let blank_row = vec![Cell::default(); width];

        let mut history = Scrollback::new(self.scrollback.capacity());
        let skip = scrollback.len().saturating_sub(history.capacity());
        for row in scrollback.into_iter().skip(skip) {
            history.push(row.into_boxed_slice());
        }

        self.grid = grid;
        self.scrollback = history;
        self.blank_row = blank_row;
        self.cursor = Cursor::default();
        self.cursor.move_to(cursor_x, cursor_y, width, height);
        Ok(())
    }

    /// Clear grid, scrollback and cursor
    pub fn reset(&mut self) {
        self.grid.fill(Cell::default());
        self.scrollback.clear();
        self.cursor = Cursor::default();
    }

    /// Text of a grid row with trailing spaces trimmed
    pub fn row_text(&self, y: usize) -> String {
        self.row(y)
            .map(|row| row.iter().map(|c| c.ch).collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Text of the live grid, one line per row
    pub fn to_text(&self) -> String {
        self.snapshot_view(0).to_text()
    }
}
