//! Terminal match-3 jewel game.
//!
//! The `core` module is the pure puzzle engine (board, match detection,
//! gravity refill, scoring, session state machine); `input` maps terminal
//! events onto it and `term` draws it. Hosts that embed the engine only
//! need `core` and `types`.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
