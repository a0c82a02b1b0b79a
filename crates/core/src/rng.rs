//! RNG module - cell value generation
//!
//! Every fresh cell on the board comes from a [`CellSource`]. The session takes
//! the source by value, so tests can inject a scripted sequence and games can be
//! replayed from a seed.
//!
//! - [`SimpleRng`]: LCG, deterministic per seed, uniform over `1..=9`
//! - [`ScriptedCells`]: fixed sequence, repeating or finite

use crate::error::{CoreError, CoreResult};
use crate::types::{is_live_cell, Cell, CELL_MAX, CELL_MIN};

/// Produces live cell values.
pub trait CellSource {
    /// Next value in `1..=9`.
    ///
    /// Failures are surfaced unchanged by the engine; it never retries.
    fn next_cell(&mut self) -> CoreResult<Cell>;
}

impl<S: CellSource + ?Sized> CellSource for &mut S {
    fn next_cell(&mut self) -> CoreResult<Cell> {
        (**self).next_cell()
    }
}

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
    ///
    /// Uses the high 16 bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current state, usable as a seed to replay from this point
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl CellSource for SimpleRng {
    fn next_cell(&mut self) -> CoreResult<Cell> {
        let span = (CELL_MAX - CELL_MIN + 1) as u32;
        Ok(CELL_MIN + self.next_range(span) as Cell)
    }
}

/// Deterministic cell sequence for tests and replays.
#[derive(Debug, Clone)]
pub struct ScriptedCells {
    values: Vec<Cell>,
    next: usize,
    repeat: bool,
}

impl ScriptedCells {
    /// Yield `values` in order, then fail with [`CoreError::SourceExhausted`].
    pub fn once(values: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            values: values.into_iter().collect(),
            next: 0,
            repeat: false,
        }
    }

    /// Yield `values` in order forever.
    pub fn cycle(values: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            values: values.into_iter().collect(),
            next: 0,
            repeat: true,
        }
    }

    /// Always yield `value`.
    pub fn constant(value: Cell) -> Self {
        Self::cycle([value])
    }

    /// Number of values handed out so far
    pub fn drawn(&self) -> usize {
        self.next
    }

    /// Values left before a finite script runs out (`None` when repeating).
    pub fn remaining(&self) -> Option<usize> {
        if self.repeat {
            None
        } else {
            Some(self.values.len().saturating_sub(self.next))
        }
    }
}

impl CellSource for ScriptedCells {
    fn next_cell(&mut self) -> CoreResult<Cell> {
        if self.values.is_empty() || (!self.repeat && self.next >= self.values.len()) {
            return Err(CoreError::SourceExhausted);
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        if !is_live_cell(value) {
            return Err(CoreError::InvalidCell(value));
        }
        Ok(value)
    }
}
