//! Gravity and refill - compaction of cleared columns
//!
//! Each column is handled independently: surviving gems fall to the bottom
//! of the column keeping their relative order, then the vacated cells at
//! the top are filled from `draw`, top row first. The operation never
//! leaves an empty cell behind.

use crate::core::board::Board;
use crate::types::GemKind;

/// Compact every column downward and refill the holes at the top
pub fn apply_gravity(board: &mut Board, mut draw: impl FnMut() -> GemKind) {
    let size = board.size() as i16;

    for x in 0..size {
        // Walk the column bottom-up, sliding gems down onto `write_y`.
        let mut write_y = size - 1;
        for y in (0..size).rev() {
            if let Some(Some(kind)) = board.get(x, y) {
                if write_y != y {
                    board.set(x, write_y, Some(kind));
                }
                write_y -= 1;
            }
        }

        // Whatever is left above `write_y` is vacated; fill it top-down.
        for y in 0..=write_y {
            board.set(x, y, Some(draw()));
        }
    }
}
