//! Terminal Grid
//!
//! The live `width × height` area, stored as one contiguous `Vec<Cell>`.
//! Rows are addressed through a rotating `top` offset so that scrolling by
//! one line touches a single row instead of moving the whole buffer.

use std::ops::Range;

use super::cell::Cell;

/// Contiguous cell storage for the visible screen
#[derive(Debug, Clone)]
pub struct Grid {
    /// Physical storage, `height` rows of `width` cells
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    /// Physical row holding logical row 0
    top: usize,
}

impl Grid {
    /// Create a grid filled with default cells. Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
            top: 0,
        }
    }

    /// Build a grid from row-major cells in logical order.
    /// Returns `None` if the cell count does not match the dimensions.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Option<Self> {
        if width == 0 || height == 0 || cells.len() != width * height {
            return None;
        }
        Some(Self {
            cells,
            width,
            height,
            top: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, row: usize) -> usize {
        ((self.top + row) % self.height) * self.width
    }

    /// Get a logical row
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = self.offset(row);
        &self.cells[start..start + self.width]
    }

    /// Get a mutable logical row
    pub fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        let start = self.offset(row);
        let width = self.width;
        &mut self.cells[start..start + width]
    }

    /// Get a reference to a cell
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(&self.cells[self.offset(row) + col])
    }

    /// Get a mutable reference to a cell
    pub fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let idx = self.offset(row) + col;
        Some(&mut self.cells[idx])
    }

    /// Rotate every row up by one. The old first row becomes the last row
    /// and is returned for the caller to clear; nothing else is copied.
    pub fn rotate_up(&mut self) -> &mut [Cell] {
        self.top = (self.top + 1) % self.height;
        self.row_mut(self.height - 1)
    }

    /// Fill columns `cols` of a row, clipped to the grid width
    pub fn fill_row(&mut self, row: usize, cols: Range<usize>, cell: Cell) {
        if row >= self.height {
            return;
        }
        let end = cols.end.min(self.width);
        let start = cols.start.min(end);
        self.row_mut(row)[start..end].fill(cell);
    }

    /// Fill a range of whole rows
    pub fn fill_rows(&mut self, rows: Range<usize>, cell: Cell) {
        let end = rows.end.min(self.height);
        for row in rows.start.min(end)..end {
            self.row_mut(row).fill(cell);
        }
    }

    /// Fill every cell
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Allocate a new grid, copy the overlapping top-left region and swap it
    /// in. Newly exposed cells are default cells.
    pub fn resize(&mut self, width: usize, height: usize) {
        debug_assert!(width > 0 && height > 0);
        if width == self.width && height == self.height {
            return;
        }

        let mut cells = vec![Cell::default(); width * height];
        let copy_cols = width.min(self.width);
        for row in 0..height.min(self.height) {
            let dst = row * width;
            cells[dst..dst + copy_cols].copy_from_slice(&self.row(row)[..copy_cols]);
        }

        self.cells = cells;
        self.width = width;
        self.height = height;
        self.top = 0;
    }

    /// Row-major copy of the cells in logical order
    pub fn to_vec(&self) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.cells.len());
        for row in 0..self.height {
            out.extend_from_slice(self.row(row));
        }
        out
    }
}
