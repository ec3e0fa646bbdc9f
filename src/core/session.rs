//! Game session - the state machine tying the core together
//!
//! A `GameSession` owns one playthrough: the board, the score, the rng, and
//! the clear-and-cascade cycle. A committed swap starts a resolution cycle:
//! detect runs, award per run, clear the matched cells, then wait out a
//! short presentation pause before gravity refills the holes and the next
//! detect pass runs (the cascade). The pause is a plain millisecond
//! countdown advanced by [`GameSession::tick`]; it is skipped by
//! [`GameSession::flush_pending`] and cancelled outright by
//! [`GameSession::reset`], so no stale refill can land on a fresh board.
//!
//! Outside an in-flight clear-to-refill window the grid never shows an
//! empty cell, and input is only accepted with that invariant restored.

use log::{debug, info};

use crate::core::board::Board;
use crate::core::gravity::apply_gravity;
use crate::core::matches::find_runs;
use crate::core::rng::SimpleRng;
use crate::core::scoring::ScoreTracker;
use crate::types::{ClickOutcome, GameConfig, GameError, SessionState, SwapOutcome};

/// One playthrough: board, score, and turn-resolution state machine
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    score: ScoreTracker,
    rng: SimpleRng,
    state: SessionState,
    /// Remaining presentation pause before the pending refill lands.
    /// `Some` exactly while matched cells sit cleared on the board.
    refill_timer_ms: Option<u32>,
}

impl GameSession {
    /// Create a session with a randomly filled board and zero score
    ///
    /// Fails fast on a degenerate configuration (empty board, fewer than
    /// three gem kinds).
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = SimpleRng::new(seed);
        let board = Board::filled(config.board_size, &config.gem_kinds, &mut rng);
        Ok(Self {
            config,
            board,
            score: ScoreTracker::new(),
            rng,
            state: SessionState::InProgress,
            refill_timer_ms: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected(&self) -> Option<(usize, usize)> {
        self.board.selected()
    }

    /// True while cleared cells are waiting for their refill
    pub fn pending_refill(&self) -> bool {
        self.refill_timer_ms.is_some()
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Process one pointer click on a grid cell
    ///
    /// The first click selects a cell, a second click on the same cell
    /// deselects it, and a click elsewhere attempts a swap with the
    /// selection. A committed swap runs the full clear-and-cascade cycle.
    /// Clicks are ignored while the session is won. Any pending refill is
    /// flushed before the click is interpreted, so input never observes a
    /// partially cleared grid.
    pub fn handle_click(&mut self, x: i16, y: i16) -> Result<ClickOutcome, GameError> {
        if self.state == SessionState::Won {
            return Ok(ClickOutcome::Ignored);
        }
        self.flush_pending();

        match self.board.selected() {
            None => {
                self.board.select(x, y)?;
                Ok(ClickOutcome::Selected)
            }
            Some((sx, sy)) if (sx as i16, sy as i16) == (x, y) => {
                self.board.select(x, y)?;
                Ok(ClickOutcome::Deselected)
            }
            Some((sx, sy)) => match self.board.attempt_swap(x, y)? {
                SwapOutcome::Rejected => Ok(ClickOutcome::SwapRejected),
                SwapOutcome::Committed => {
                    debug!("swap committed: ({sx}, {sy}) <-> ({x}, {y})");
                    self.resolve_pass();
                    Ok(ClickOutcome::SwapCommitted)
                }
            },
        }
    }

    /// Advance the presentation pause; applies the refill when it elapses
    ///
    /// Call once per frame with the elapsed milliseconds. A no-op unless a
    /// refill is pending.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let Some(timer) = self.refill_timer_ms else {
            return;
        };
        let remaining = timer.saturating_sub(elapsed_ms);
        if remaining > 0 {
            self.refill_timer_ms = Some(remaining);
            return;
        }
        self.refill_timer_ms = None;
        self.apply_refill();
        self.resolve_pass();
    }

    /// Skip the presentation pause and resolve the cascade to completion
    ///
    /// After this returns the grid is fully populated and no runs remain.
    pub fn flush_pending(&mut self) {
        while self.refill_timer_ms.take().is_some() {
            self.apply_refill();
            self.resolve_pass();
        }
    }

    /// Throw away the board and score and start a fresh playthrough
    ///
    /// Always legal, from any state. Cancels a pending refill, so a reset
    /// mid-cascade cannot be mutated by the stale continuation afterwards.
    pub fn reset(&mut self) {
        self.refill_timer_ms = None;
        self.board = Board::filled(self.config.board_size, &self.config.gem_kinds, &mut self.rng);
        self.score = ScoreTracker::new();
        self.state = SessionState::InProgress;
        info!("session reset");
    }

    /// One detect pass of the clear-and-cascade cycle
    ///
    /// Finding no runs completes the cycle and checks the win threshold.
    /// Otherwise every run is awarded, all matched cells clear together,
    /// and the refill countdown is armed.
    fn resolve_pass(&mut self) {
        let runs = find_runs(&self.board);
        if runs.is_empty() {
            if self.score.has_won(self.config.win_threshold) {
                info!("session won with score {}", self.score.score());
                self.state = SessionState::Won;
            }
            return;
        }

        for run in &runs {
            debug!("run of {} {} cleared", run.cells.len(), run.kind.as_str());
            self.score.award(self.config.run_score);
        }
        self.board
            .clear_cells(runs.iter().flat_map(|run| run.cells.iter().copied()));
        self.refill_timer_ms = Some(self.config.clear_pause_ms);
    }

    fn apply_refill(&mut self) {
        let rng = &mut self.rng;
        let kinds = &self.config.gem_kinds;
        apply_gravity(&mut self.board, || rng.draw_gem(kinds));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;
    use crate::types::GemKind::{self, *};
    use crate::types::{CLEAR_PAUSE_MS, RUN_SCORE};

    fn session(seed: u32) -> GameSession {
        GameSession::new(GameConfig::default(), seed).unwrap()
    }

    /// An 8x8 run-free layout: kind index (x + 2 * y) % 5 steps by 1 along
    /// rows and by 2 along columns, so no three consecutive cells match.
    fn quiet_rows() -> Vec<Vec<Cell>> {
        (0..8)
            .map(|y| (0..8).map(|x| Some(GemKind::ALL[(x + 2 * y) % 5])).collect())
            .collect()
    }

    /// Quiet layout plus a vertical triple primed at column 0: swapping
    /// (0, 0) with (1, 0) lines up Diamond at rows 0..=2.
    fn primed_rows() -> Vec<Vec<Cell>> {
        let mut rows = quiet_rows();
        rows[0][0] = Some(Spark);
        rows[0][1] = Some(Diamond);
        rows[1][0] = Some(Diamond);
        rows[2][0] = Some(Diamond);
        rows[3][0] = Some(Sapphire);
        rows
    }

    #[test]
    fn test_new_session_is_fresh() {
        let s = session(1);
        assert_eq!(s.state(), SessionState::InProgress);
        assert_eq!(s.score(), 0);
        assert!(s.board().is_fully_populated());
        assert!(s.selected().is_none());
        assert!(!s.pending_refill());
    }

    #[test]
    fn test_degenerate_config_rejected() {
        let bad_size = GameConfig {
            board_size: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            GameSession::new(bad_size, 1),
            Err(GameError::InvalidConfig(_))
        ));

        let bad_kinds = GameConfig {
            gem_kinds: vec![Diamond, Spark],
            ..GameConfig::default()
        };
        assert!(matches!(
            GameSession::new(bad_kinds, 1),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_click_out_of_bounds_fails() {
        let mut s = session(1);
        assert_eq!(
            s.handle_click(8, 0),
            Err(GameError::OutOfBounds { x: 8, y: 0 })
        );
        assert_eq!(
            s.handle_click(0, -1),
            Err(GameError::OutOfBounds { x: 0, y: -1 })
        );
    }

    #[test]
    fn test_select_toggle_via_clicks() {
        let mut s = session(1);
        assert_eq!(s.handle_click(2, 3), Ok(ClickOutcome::Selected));
        assert_eq!(s.selected(), Some((2, 3)));
        assert_eq!(s.handle_click(2, 3), Ok(ClickOutcome::Deselected));
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_non_adjacent_swap_rejected() {
        let mut s = session(1);
        *s.board_mut() = Board::from_rows(quiet_rows());
        let before = s.board().clone();

        s.handle_click(1, 1).unwrap();
        assert_eq!(s.handle_click(3, 3), Ok(ClickOutcome::SwapRejected));
        assert_eq!(s.board().cells(), before.cells());
        assert!(s.selected().is_none());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_matchless_swap_commits_without_scoring() {
        let mut s = session(1);
        *s.board_mut() = Board::from_rows(quiet_rows());

        s.handle_click(4, 4).unwrap();
        assert_eq!(s.handle_click(4, 5), Ok(ClickOutcome::SwapCommitted));
        assert_eq!(s.score(), 0);
        assert!(!s.pending_refill());
        assert!(s.board().is_fully_populated());
        // The exchange itself stuck: quiet layout has (4,4) != (4,5).
        assert_eq!(s.board().get(4, 4), Some(Some(GemKind::ALL[(4 + 10) % 5])));
    }

    #[test]
    fn test_swap_into_vertical_triple_scores_one_run() {
        let mut s = session(1);
        *s.board_mut() = Board::from_rows(primed_rows());

        s.handle_click(0, 0).unwrap();
        assert_eq!(s.handle_click(1, 0), Ok(ClickOutcome::SwapCommitted));

        // The run cleared and now waits on the refill pause.
        assert_eq!(s.score(), RUN_SCORE);
        assert!(s.pending_refill());
        assert!(!s.board().is_fully_populated());

        s.flush_pending();
        assert_eq!(s.score(), RUN_SCORE);
        assert!(s.board().is_fully_populated());
        assert_eq!(s.state(), SessionState::InProgress);
    }

    #[test]
    fn test_tick_applies_refill_after_pause() {
        let mut s = session(1);
        *s.board_mut() = Board::from_rows(primed_rows());
        s.handle_click(0, 0).unwrap();
        s.handle_click(1, 0).unwrap();
        assert!(s.pending_refill());

        // One tick short of the pause: still pending.
        s.tick(CLEAR_PAUSE_MS - 1);
        assert!(s.pending_refill());
        assert!(!s.board().is_fully_populated());

        s.tick(1);
        assert!(!s.pending_refill());
        assert!(s.board().is_fully_populated());
        assert_eq!(s.score(), RUN_SCORE);
    }

    #[test]
    fn test_tick_without_pending_refill_is_noop() {
        let mut s = session(1);
        let before = s.board().clone();
        s.tick(10_000);
        assert_eq!(s.board(), &before);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_win_after_four_runs_then_input_ignored() {
        let mut s = session(1);

        for swap in 1..=4u32 {
            *s.board_mut() = Board::from_rows(primed_rows());
            s.handle_click(0, 0).unwrap();
            assert_eq!(s.handle_click(1, 0), Ok(ClickOutcome::SwapCommitted));
            s.flush_pending();
            assert_eq!(s.score(), RUN_SCORE * swap);
            if swap < 4 {
                assert_eq!(s.state(), SessionState::InProgress);
            }
        }

        // 120 >= 100: the cycle completion flipped the state.
        assert_eq!(s.state(), SessionState::Won);

        // Terminal until reset: clicks are ignored, not errors.
        assert_eq!(s.handle_click(0, 0), Ok(ClickOutcome::Ignored));
        assert!(s.selected().is_none());
        assert_eq!(s.score(), RUN_SCORE * 4);

        s.reset();
        assert_eq!(s.state(), SessionState::InProgress);
        assert_eq!(s.score(), 0);
        assert!(s.board().is_fully_populated());
        assert_eq!(s.handle_click(0, 0), Ok(ClickOutcome::Selected));
    }

    #[test]
    fn test_reset_mid_cascade_cancels_pending_refill() {
        let mut s = session(1);
        *s.board_mut() = Board::from_rows(primed_rows());
        s.handle_click(0, 0).unwrap();
        s.handle_click(1, 0).unwrap();
        assert!(s.pending_refill());
        assert!(!s.board().is_fully_populated());

        s.reset();
        assert!(!s.pending_refill());
        assert!(s.board().is_fully_populated());
        assert_eq!(s.score(), 0);
        assert_eq!(s.state(), SessionState::InProgress);

        // The cancelled continuation must not land later.
        let after_reset = s.board().clone();
        s.tick(10 * CLEAR_PAUSE_MS);
        assert_eq!(s.board(), &after_reset);
    }

    #[test]
    fn test_pending_refill_flushed_before_next_click() {
        let mut s = session(1);
        *s.board_mut() = Board::from_rows(primed_rows());
        s.handle_click(0, 0).unwrap();
        s.handle_click(1, 0).unwrap();
        assert!(s.pending_refill());

        // The next click sees a fully populated grid again.
        assert_eq!(s.handle_click(5, 5), Ok(ClickOutcome::Selected));
        assert!(!s.pending_refill());
        assert!(s.board().is_fully_populated());
    }

    #[test]
    fn test_initial_runs_are_accepted_not_prescored() {
        // The fill does not re-roll matches: this seed starts with at least
        // one run on the board, and it is worth nothing until a swap
        // commits and the cycle picks it up.
        let s = session(1);
        assert!(!find_runs(s.board()).is_empty());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_cascade_terminates_from_seeded_fills() {
        for seed in 0..25 {
            let mut s = session(seed);
            // Commit some swap; legality only needs adjacency.
            s.handle_click(3, 3).unwrap();
            s.handle_click(3, 4).unwrap();
            s.flush_pending();
            assert!(s.board().is_fully_populated(), "seed {seed}");
            assert!(find_runs(s.board()).is_empty(), "seed {seed}");
        }
    }
}
