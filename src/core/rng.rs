//! RNG module - deterministic gem drawing
//!
//! A simple LCG keeps every session reproducible from its seed: the same
//! seed fills the same board and refills the same gems, which the tests
//! rely on.

use crate::types::GemKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw one gem kind uniformly from `kinds`
    pub fn draw_gem(&mut self, kinds: &[GemKind]) -> GemKind {
        kinds[self.next_range(kinds.len() as u32) as usize]
    }
}
