//! Genetic algorithm engine.
//!
//! The engine is built from three pluggable capabilities wired into a
//! [`Population`]:
//!
//! - [`Chromosome`]: a candidate solution that knows how to randomize,
//!   mutate, cross over, and clone itself. Four representations are
//!   provided: [`BinaryChromosome`] (bits packed into a `u64`),
//!   [`ShortArrayChromosome`] (bounded integer array),
//!   [`PermutationChromosome`] (bijection onto `0..length`), and
//!   [`DoubleArrayChromosome`] (real-valued genes drawn from injected
//!   [generators](crate::random::RandomGenerator)).
//! - [`FitnessFunction`]: maps a chromosome to a positive quality value,
//!   higher is better.
//! - [`SelectionMethod`]: reduces a grown population back to its target
//!   size ([`EliteSelection`], [`RouletteWheelSelection`],
//!   [`RankSelection`]).
//!
//! One [`Population::run_epoch`] performs crossover, mutation, selection,
//! and optional shuffling.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

mod binary;
mod chromosome;
mod double_array;
mod fitness;
mod permutation;
mod population;
mod selection;
mod short_array;

pub use binary::BinaryChromosome;
pub use chromosome::Chromosome;
pub use double_array::DoubleArrayChromosome;
pub use fitness::{
    FitnessFunction, OptimizationFunction1D, OptimizationFunction2D, OptimizationMode,
    SymbolicRegressionFitness, TimeSeriesPredictionFitness,
};
pub use permutation::PermutationChromosome;
pub use population::Population;
pub use selection::{EliteSelection, RankSelection, RouletteWheelSelection, SelectionMethod};
pub use short_array::ShortArrayChromosome;
