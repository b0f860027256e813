//! Random number sources.
//!
//! Two kinds of randomness are used by this crate:
//!
//! 1. **Structural randomness** — picking crossover points, mutation genes,
//!    shuffle orders. Algorithms take a `rand` generator (`R: Rng` or
//!    `&mut dyn RngCore`) supplied by the caller, so every run is
//!    reproducible with [`create_rng`].
//! 2. **Value randomness** — drawing gene values and mutation deltas from a
//!    configured distribution. This is the [`RandomGenerator`] capability:
//!    a seedable stream with a known mean and variance, injected into
//!    [`DoubleArrayChromosome`](crate::genetic::DoubleArrayChromosome) and
//!    evolutionary learning. [`SharedGenerator`] clones share one stream,
//!    so independently created chromosomes keep drawing distinct values.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::Range;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws a fresh process-level seed.
pub fn random_seed() -> u64 {
    rand::random()
}

/// A seedable stream of single-precision random values with a known
/// distribution.
///
/// Implementations are injected wherever gene values or mutation deltas
/// are drawn, keeping the distribution pluggable and tests reproducible.
pub trait RandomGenerator: Send {
    /// Mean of the generated distribution.
    fn mean(&self) -> f32;

    /// Variance of the generated distribution.
    fn variance(&self) -> f32;

    /// Draws the next value from the stream.
    fn next(&mut self) -> f32;

    /// Reseeds the stream.
    fn set_seed(&mut self, seed: u64);
}

/// A [`RandomGenerator`] shared between several owners.
///
/// Cloning shares the underlying stream: chromosomes created from the same
/// ancestor draw interleaved (distinct) values rather than replaying one
/// another's sequences.
pub type SharedGenerator = Arc<Mutex<dyn RandomGenerator + Send>>;

/// Wraps a generator for shared ownership.
pub fn shared<G: RandomGenerator + 'static>(generator: G) -> SharedGenerator {
    Arc::new(Mutex::new(generator))
}

/// Uniform generator over `[0, 1)`.
#[derive(Debug, Clone)]
pub struct StandardGenerator {
    rng: StdRng,
}

impl StandardGenerator {
    /// Creates a process-seeded generator.
    pub fn new() -> Self {
        Self::with_seed(random_seed())
    }

    /// Creates a generator with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: create_rng(seed),
        }
    }
}

impl Default for StandardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomGenerator for StandardGenerator {
    fn mean(&self) -> f32 {
        0.5
    }

    fn variance(&self) -> f32 {
        1.0 / 12.0
    }

    fn next(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = create_rng(seed);
    }
}

/// Uniform generator over an arbitrary [`Range`].
#[derive(Debug, Clone)]
pub struct UniformGenerator {
    rng: StdRng,
    min: f32,
    length: f32,
}

impl UniformGenerator {
    /// Creates a process-seeded generator over `range`.
    pub fn new(range: Range) -> Self {
        Self::with_seed(range, random_seed())
    }

    /// Creates a generator over `range` with the given seed.
    pub fn with_seed(range: Range, seed: u64) -> Self {
        Self {
            rng: create_rng(seed),
            min: range.min(),
            length: range.length(),
        }
    }
}

impl RandomGenerator for UniformGenerator {
    fn mean(&self) -> f32 {
        self.min + self.length / 2.0
    }

    fn variance(&self) -> f32 {
        self.length * self.length / 12.0
    }

    fn next(&mut self) -> f32 {
        self.rng.random::<f32>() * self.length + self.min
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = create_rng(seed);
    }
}

/// Exponential generator with rate λ.
///
/// Values are drawn by inverse transform sampling: `-ln(1 - u) / λ`.
#[derive(Debug, Clone)]
pub struct ExponentialGenerator {
    rng: StdRng,
    rate: f32,
}

impl ExponentialGenerator {
    /// Creates a process-seeded generator with the given rate.
    ///
    /// # Panics
    /// Panics if `rate` is not greater than zero.
    pub fn new(rate: f32) -> Self {
        Self::with_seed(rate, random_seed())
    }

    /// Creates a generator with the given rate and seed.
    ///
    /// # Panics
    /// Panics if `rate` is not greater than zero.
    pub fn with_seed(rate: f32, seed: u64) -> Self {
        assert!(rate > 0.0, "rate value should be greater than zero");
        Self {
            rng: create_rng(seed),
            rate,
        }
    }

    /// Rate λ of the distribution.
    pub fn rate(&self) -> f32 {
        self.rate
    }
}

impl RandomGenerator for ExponentialGenerator {
    fn mean(&self) -> f32 {
        1.0 / self.rate
    }

    fn variance(&self) -> f32 {
        1.0 / (self.rate * self.rate)
    }

    fn next(&mut self) -> f32 {
        let u = self.rng.random::<f32>();
        -(1.0 - u).ln() / self.rate
    }

    fn set_seed(&mut self, seed: u64) {
        self.rng = create_rng(seed);
    }
}

// ============================================================================
// Tests
// ============================================================================
