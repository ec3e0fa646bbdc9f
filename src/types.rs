//! Core types shared across the application
//! This module contains pure data types with no external dependencies

use std::fmt;

/// Default board edge length (the board is always square)
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Minimum run length that counts as a match
pub const MIN_RUN_LEN: usize = 3;

/// A gem-kind set smaller than this can never form a run
pub const MIN_GEM_KINDS: usize = 3;

/// Points awarded per matched run
pub const RUN_SCORE: u32 = 30;

/// Score at which the session is won
pub const WIN_THRESHOLD: u32 = 100;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const CLEAR_PAUSE_MS: u32 = 500;

/// Gem kinds placeable on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GemKind {
    Diamond,
    Snowflake,
    Sapphire,
    Amber,
    Spark,
}

impl GemKind {
    /// All gem kinds, in drawing order
    pub const ALL: [GemKind; 5] = [
        GemKind::Diamond,
        GemKind::Snowflake,
        GemKind::Sapphire,
        GemKind::Amber,
        GemKind::Spark,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GemKind::Diamond => "diamond",
            GemKind::Snowflake => "snowflake",
            GemKind::Sapphire => "sapphire",
            GemKind::Amber => "amber",
            GemKind::Spark => "spark",
        }
    }
}

/// Cell on the board (None = empty, Some = holds a gem)
///
/// Empty cells are only observable while a clear-and-refill step is in
/// flight; every public operation starts and ends with a fully gem-populated
/// grid.
pub type Cell = Option<GemKind>;

/// Result of a selection update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The cell is now the selection
    Selected,
    /// The cell was already selected and the selection was toggled off
    Cleared,
}

/// Result of a swap attempt against the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The cells were adjacent; their gems were exchanged
    Committed,
    /// The cells were not 4-adjacent; the grid is untouched
    Rejected,
}

/// Session lifecycle state
///
/// There is no losing state: the session either runs or has crossed the
/// win threshold. `Won` is terminal until an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Won,
}

/// What a pointer click did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected,
    Deselected,
    SwapRejected,
    SwapCommitted,
    /// Input is ignored while the session is won
    Ignored,
}

/// Errors surfaced by the puzzle core
///
/// Illegal (non-adjacent) swaps are not errors; they come back as
/// [`SwapOutcome::Rejected`]. These variants cover malformed host input and
/// degenerate configuration only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate outside the grid; never silently clamped
    OutOfBounds { x: i16, y: i16 },
    /// Rejected at construction time (size zero, too few gem kinds)
    InvalidConfig(&'static str),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfBounds { x, y } => {
                write!(f, "cell ({x}, {y}) is outside the grid")
            }
            GameError::InvalidConfig(reason) => write!(f, "invalid game config: {reason}"),
        }
    }
}

impl std::error::Error for GameError {}

/// Session configuration
///
/// The defaults reproduce the reference game: an 8x8 board, five gem kinds,
/// 30 points per run, win at 100, and a 500ms clear-to-refill pause.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub board_size: usize,
    pub gem_kinds: Vec<GemKind>,
    pub run_score: u32,
    pub win_threshold: u32,
    pub clear_pause_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            gem_kinds: GemKind::ALL.to_vec(),
            run_score: RUN_SCORE,
            win_threshold: WIN_THRESHOLD,
            clear_pause_ms: CLEAR_PAUSE_MS,
        }
    }
}

impl GameConfig {
    /// Fail fast on configurations that can never host a playable game
    pub fn validate(&self) -> Result<(), GameError> {
        if self.board_size == 0 {
            return Err(GameError::InvalidConfig("board size must be positive"));
        }
        if self.gem_kinds.len() < MIN_GEM_KINDS {
            return Err(GameError::InvalidConfig(
                "need at least 3 gem kinds to ever form a run",
            ));
        }
        Ok(())
    }
}
