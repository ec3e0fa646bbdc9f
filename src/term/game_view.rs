//! GameView: maps a `GameSession` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested. The pointer map it
//! hands out is derived from the same geometry it draws with, so clicks and
//! glyphs can never disagree about where a cell is.

use crate::core::GameSession;
use crate::input::PointerMap;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GemKind, SessionState};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the jewel board.
pub struct GameView {
    /// Top-left of the first cell, in terminal coordinates.
    origin_x: u16,
    origin_y: u16,
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 cells read as roughly square on typical terminal glyphs.
        Self {
            origin_x: 3,
            origin_y: 2,
            cell_w: 4,
            cell_h: 2,
        }
    }
}

impl GameView {
    pub fn new(origin_x: u16, origin_y: u16, cell_w: u16, cell_h: u16) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_w,
            cell_h,
        }
    }

    /// Pointer mapping matching this view's geometry.
    pub fn pointer_map(&self, board_size: usize) -> PointerMap {
        PointerMap {
            origin_x: self.origin_x,
            origin_y: self.origin_y,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            board_size: board_size as u16,
        }
    }

    /// Render the current session into a framebuffer.
    pub fn render(&self, session: &GameSession, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let size = session.board().size() as u16;
        let grid_w = size * self.cell_w;
        let grid_h = size * self.cell_h;

        let title = CellStyle {
            fg: Rgb::new(160, 210, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        fb.put_str(
            self.origin_x.saturating_sub(1),
            self.origin_y.saturating_sub(2),
            "ICE JEWEL MATCH",
            title,
        );

        self.draw_border(&mut fb, grid_w, grid_h);

        for y in 0..size {
            for x in 0..size {
                self.draw_cell(&mut fb, session, x, y);
            }
        }

        let info = CellStyle::default();
        let info_y = self.origin_y + grid_h + 1;
        fb.put_str(
            self.origin_x.saturating_sub(1),
            info_y,
            &format!("Score: {}", session.score()),
            info,
        );

        let help = CellStyle {
            fg: Rgb::new(130, 130, 130),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };
        fb.put_str(
            self.origin_x.saturating_sub(1),
            info_y + 1,
            "click: select / swap   r: reset   q: quit",
            help,
        );

        if session.state() == SessionState::Won {
            self.draw_overlay(&mut fb, grid_w, grid_h, " YOU WON! press r ");
        }

        fb
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, session: &GameSession, x: u16, y: u16) {
        let selected = session.selected() == Some((x as usize, y as usize));
        let bg = if selected {
            Rgb::new(70, 90, 140)
        } else {
            Rgb::new(20, 20, 30)
        };

        let left = self.origin_x + x * self.cell_w;
        let top = self.origin_y + y * self.cell_h;
        fb.fill_rect(
            left,
            top,
            self.cell_w,
            self.cell_h,
            ' ',
            CellStyle {
                fg: bg,
                bg,
                bold: false,
            },
        );

        // Cleared cells awaiting refill render as gaps.
        let Some(Some(kind)) = session.board().get(x as i16, y as i16) else {
            return;
        };

        let (glyph, color) = gem_glyph(kind);
        let style = CellStyle {
            fg: color,
            bg,
            bold: selected,
        };
        let gx = (left + self.cell_w / 2).saturating_sub(1);
        fb.put_char(gx, top + self.cell_h / 2, glyph, style);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, grid_w: u16, grid_h: u16) {
        let style = CellStyle {
            fg: Rgb::new(90, 140, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };
        let x0 = self.origin_x.saturating_sub(1);
        let y0 = self.origin_y.saturating_sub(1);
        let x1 = self.origin_x + grid_w;
        let y1 = self.origin_y + grid_h;

        for x in x0..=x1 {
            fb.put_char(x, y0, '─', style);
            fb.put_char(x, y1, '─', style);
        }
        for y in y0..=y1 {
            fb.put_char(x0, y, '│', style);
            fb.put_char(x1, y, '│', style);
        }
        fb.put_char(x0, y0, '┌', style);
        fb.put_char(x1, y0, '┐', style);
        fb.put_char(x0, y1, '└', style);
        fb.put_char(x1, y1, '┘', style);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, grid_w: u16, grid_h: u16, text: &str) {
        let style = CellStyle {
            fg: Rgb::new(255, 240, 150),
            bg: Rgb::new(40, 60, 40),
            bold: true,
        };
        let y = self.origin_y + grid_h / 2;
        let x = self.origin_x + grid_w.saturating_sub(text.len() as u16) / 2;
        fb.put_str(x, y, text, style);
    }
}

/// Glyph and color per gem kind.
fn gem_glyph(kind: GemKind) -> (char, Rgb) {
    match kind {
        GemKind::Diamond => ('◆', Rgb::new(120, 230, 255)),
        GemKind::Snowflake => ('❄', Rgb::new(200, 220, 255)),
        GemKind::Sapphire => ('●', Rgb::new(80, 120, 255)),
        GemKind::Amber => ('▲', Rgb::new(255, 170, 60)),
        GemKind::Spark => ('✦', Rgb::new(255, 250, 160)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameConfig;

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width())
            .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect()
    }

    #[test]
    fn test_render_shows_score_and_title() {
        let session = GameSession::new(GameConfig::default(), 1).unwrap();
        let view = GameView::default();
        let fb = view.render(&session, Viewport::new(60, 24));

        assert!(row_text(&fb, 0).contains("ICE JEWEL MATCH"));
        assert!(row_text(&fb, 19).contains("Score: 0"));
    }

    #[test]
    fn test_render_draws_one_glyph_per_cell() {
        let session = GameSession::new(GameConfig::default(), 7).unwrap();
        let view = GameView::default();
        let fb = view.render(&session, Viewport::new(60, 24));

        let glyphs: Vec<char> = GemKind::ALL.iter().map(|&k| gem_glyph(k).0).collect();
        let drawn = (0..fb.height())
            .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| glyphs.contains(&fb.get(x, y).unwrap().ch))
            .count();
        assert_eq!(drawn, 64);
    }

    #[test]
    fn test_selected_cell_is_highlighted() {
        let mut session = GameSession::new(GameConfig::default(), 1).unwrap();
        session.handle_click(0, 0).unwrap();

        let view = GameView::default();
        let fb = view.render(&session, Viewport::new(60, 24));

        // Top-left cell carries the selection background, its neighbor does not.
        let sel = fb.get(3, 2).unwrap().style.bg;
        let other = fb.get(3 + 4, 2).unwrap().style.bg;
        assert_eq!(sel, Rgb::new(70, 90, 140));
        assert_eq!(other, Rgb::new(20, 20, 30));
    }

    #[test]
    fn test_pointer_map_matches_view_geometry() {
        let view = GameView::default();
        let map = view.pointer_map(8);
        assert_eq!(map.cell_at(3, 2), Some((0, 0)));
        assert_eq!(map.cell_at(3 + 4, 2), Some((1, 0)));
        assert_eq!(map.cell_at(2, 2), None);
    }
}
