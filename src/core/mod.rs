//! Core module - pure game logic with no I/O
//!
//! Everything in here is deterministic and testable without a terminal:
//! the board, match detection, gravity, scoring, and the session state
//! machine. Rendering and input live in their own modules.

pub mod board;
pub mod gravity;
pub mod matches;
pub mod rng;
pub mod scoring;
pub mod session;

// Re-export commonly used types
pub use board::Board;
pub use gravity::apply_gravity;
pub use matches::{find_runs, Run};
pub use rng::SimpleRng;
pub use scoring::ScoreTracker;
pub use session::GameSession;
