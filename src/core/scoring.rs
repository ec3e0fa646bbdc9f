//! Scoring module - per-run scoring with a win threshold
//!
//! Every confirmed run awards a fixed increment regardless of its length;
//! a run of four or five is still one run (maximal-run detection upstream
//! keeps it from being double counted). The score only moves forward within
//! a session and only a session reset zeroes it.

/// Accumulates points from confirmed matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    score: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self { score: 0 }
    }

    /// Add points from a confirmed match
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Current running total
    pub fn score(&self) -> u32 {
        self.score
    }

    /// True once the running total has reached `threshold`
    pub fn has_won(&self, threshold: u32) -> bool {
        self.score >= threshold
    }
}
