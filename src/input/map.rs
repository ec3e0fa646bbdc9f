//! Event mapping from terminal input to game inputs.
//!
//! The pointer mapping mirrors the board geometry the view draws with:
//! a fixed origin and fixed per-cell width/height. Positions outside the
//! grid map to nothing; the board never sees a clamped coordinate.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Inputs the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Pointer click resolved to a grid cell
    Click { x: i16, y: i16 },
    /// Start a fresh session
    Reset,
}

/// Fixed mapping from terminal pointer positions to grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMap {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    pub board_size: u16,
}

impl PointerMap {
    /// Resolve a raw pointer position to a cell, or `None` outside the grid
    pub fn cell_at(&self, column: u16, row: u16) -> Option<(i16, i16)> {
        let dx = column.checked_sub(self.origin_x)?;
        let dy = row.checked_sub(self.origin_y)?;
        let x = dx / self.cell_w;
        let y = dy / self.cell_h;
        if x >= self.board_size || y >= self.board_size {
            return None;
        }
        Some((x as i16, y as i16))
    }
}

/// Map a mouse event to a game input (left button press on a cell)
pub fn handle_mouse_event(mouse: MouseEvent, map: &PointerMap) -> Option<GameInput> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => map
            .cell_at(mouse.column, mouse.row)
            .map(|(x, y)| GameInput::Click { x, y }),
        _ => None,
    }
}

/// Map keyboard input to a game input
pub fn handle_key_event(key: KeyEvent) -> Option<GameInput> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameInput::Reset),
        _ => None,
    }
}

/// Check if key should leave the game and return to the host shell
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
