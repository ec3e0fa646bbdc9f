//! Board module - manages the gem grid
//!
//! The board is a square grid where each cell holds a gem kind, plus the
//! (at most one) currently selected cell of an in-progress swap gesture.
//! Uses a flat vector for storage, row-major order.
//! Coordinates: (x, y) where x is the column (left to right) and y is the
//! row (top to bottom).
//!
//! Empty cells exist only between a clear and its refill; every public
//! session operation starts and ends with a fully populated grid.

use crate::core::rng::SimpleRng;
use crate::types::{Cell, GameError, GemKind, SelectOutcome, SwapOutcome};

/// The gem grid plus the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Flat vector of cells, row-major order (y * size + x)
    cells: Vec<Cell>,
    selected: Option<(usize, usize)>,
}

impl Board {
    /// Create a board with every cell drawn uniformly at random from `kinds`
    ///
    /// Cells are drawn row-major: row 0 first, column 0 first within a row.
    /// The initial grid is not guaranteed to be match-free; pre-existing runs
    /// resolve as part of the first committed swap.
    pub fn filled(size: usize, kinds: &[GemKind], rng: &mut SimpleRng) -> Self {
        let cells = (0..size * size).map(|_| Some(rng.draw_gem(kinds))).collect();
        Self {
            size,
            cells,
            selected: None,
        }
    }

    /// Build a board from explicit rows
    ///
    /// Every row must have length `rows.len()`. Mainly useful for tests and
    /// hosts that want a scripted layout.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let size = rows.len();
        assert!(rows.iter().all(|row| row.len() == size), "rows must be square");
        Self {
            size,
            cells: rows.into_iter().flatten().collect(),
            selected: None,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.size as i16 || y < 0 || y >= self.size as i16 {
            return None;
        }
        Some((y as usize) * self.size + (x as usize))
    }

    /// Edge length of the (square) grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// The cell currently marked as the first half of a swap gesture
    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    /// Mark or unmark a cell as selected
    ///
    /// Fails on out-of-bounds coordinates. Selecting the already selected
    /// cell toggles the selection off; selecting while another cell is
    /// marked moves the mark (at most one cell is ever selected).
    pub fn select(&mut self, x: i16, y: i16) -> Result<SelectOutcome, GameError> {
        if self.index(x, y).is_none() {
            return Err(GameError::OutOfBounds { x, y });
        }
        let pos = (x as usize, y as usize);
        if self.selected == Some(pos) {
            self.selected = None;
            Ok(SelectOutcome::Cleared)
        } else {
            self.selected = Some(pos);
            Ok(SelectOutcome::Selected)
        }
    }

    /// Try to swap the gem at (x, y) with the selected cell
    ///
    /// A swap is legal only when the two cells are 4-adjacent (Manhattan
    /// distance exactly 1; diagonals are illegal). A legal swap exchanges
    /// the gems unconditionally, match or not. Either way the selection is
    /// cleared. With no selection active this is a `Rejected` no-op.
    pub fn attempt_swap(&mut self, x: i16, y: i16) -> Result<SwapOutcome, GameError> {
        let Some(idx) = self.index(x, y) else {
            return Err(GameError::OutOfBounds { x, y });
        };
        let Some((sx, sy)) = self.selected.take() else {
            return Ok(SwapOutcome::Rejected);
        };

        let dx = (sx as i16 - x).abs();
        let dy = (sy as i16 - y).abs();
        if dx + dy != 1 {
            return Ok(SwapOutcome::Rejected);
        }

        let sel_idx = sy * self.size + sx;
        self.cells.swap(idx, sel_idx);
        Ok(SwapOutcome::Committed)
    }

    /// Drop the selection without touching the grid
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Mark every listed coordinate empty (simultaneously, duplicates are fine)
    pub fn clear_cells<I: IntoIterator<Item = (usize, usize)>>(&mut self, coords: I) {
        for (x, y) in coords {
            if x < self.size && y < self.size {
                self.cells[y * self.size + x] = None;
            }
        }
    }

    /// True when no cell is empty
    pub fn is_fully_populated(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Get a reference to the internal cells vector
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
