//! Match detection - pure scanning of a grid snapshot
//!
//! Scans every row and every column for maximal runs of three or more cells
//! holding the same gem kind. Both passes read the same unmutated snapshot,
//! so a cell sitting at the crossing of a horizontal and a vertical run
//! shows up in both runs (and is scored for both), while clearing the union
//! of coordinates empties it once.

use crate::core::board::Board;
use crate::types::{GemKind, MIN_RUN_LEN};

/// One maximal run of identical gems in a single row or column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub kind: GemKind,
    /// Cells of the run, in scan order
    pub cells: Vec<(usize, usize)>,
}

/// Find every maximal run of length >= 3 on the board
///
/// Runs are reported maximally: a row of four equal gems yields one run of
/// four cells, never two overlapping triples. Horizontal runs come first
/// (top to bottom), then vertical runs (left to right). Empty cells never
/// participate in a run.
pub fn find_runs(board: &Board) -> Vec<Run> {
    let size = board.size();
    let mut runs = Vec::new();

    // Horizontal scan, one row at a time.
    for y in 0..size {
        scan_line(size, |i| board.get(i as i16, y as i16).flatten(), |i| (i, y), &mut runs);
    }

    // Vertical scan against the same snapshot.
    for x in 0..size {
        scan_line(size, |i| board.get(x as i16, i as i16).flatten(), |i| (x, i), &mut runs);
    }

    runs
}

/// Scan a single line, pushing each maximal run of length >= 3
fn scan_line(
    len: usize,
    cell_at: impl Fn(usize) -> Option<GemKind>,
    coord_at: impl Fn(usize) -> (usize, usize),
    runs: &mut Vec<Run>,
) {
    let mut start = 0;
    while start < len {
        let Some(kind) = cell_at(start) else {
            start += 1;
            continue;
        };

        let mut end = start + 1;
        while end < len && cell_at(end) == Some(kind) {
            end += 1;
        }

        if end - start >= MIN_RUN_LEN {
            runs.push(Run {
                kind,
                cells: (start..end).map(&coord_at).collect(),
            });
        }
        start = end;
    }
}
