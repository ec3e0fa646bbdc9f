//! Terminal jewel-match runner (default binary).
//!
//! Owns the event loop: poll for mouse/key input, advance the session
//! timers at a fixed tick, redraw every frame. The session itself never
//! blocks; the refill pause is just a countdown it keeps internally.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::warn;

use tui_jewels::core::GameSession;
use tui_jewels::input::{handle_key_event, handle_mouse_event, should_quit, GameInput};
use tui_jewels::term::{GameView, TerminalRenderer, Viewport};
use tui_jewels::types::{GameConfig, TICK_MS};

fn main() -> Result<()> {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u32>().ok())
        .unwrap_or(1);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, seed: u32) -> Result<()> {
    let mut session = GameSession::new(GameConfig::default(), seed)?;
    let view = GameView::default();
    let pointer_map = view.pointer_map(session.board().size());

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&session, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(GameInput::Reset) = handle_key_event(key) {
                        session.reset();
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(GameInput::Click { x, y }) = handle_mouse_event(mouse, &pointer_map)
                    {
                        // The pointer map already rejected off-grid clicks,
                        // so an error here means the geometry is wrong.
                        if let Err(err) = session.handle_click(x, y) {
                            warn!("click rejected: {err}");
                        }
                    }
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }
    }
}
