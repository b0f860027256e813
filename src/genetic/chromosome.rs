//! The chromosome capability.

use std::any::Any;
use std::fmt;

use rand::RngCore;

/// A candidate solution in a genetic population.
///
/// Chromosomes carry their own cached fitness value, set by the
/// [`Population`](crate::genetic::Population) after each evaluation.
/// Greater fitness is better; populations sort by fitness descending.
///
/// All stochastic operations take the caller's generator, so runs are
/// reproducible end to end from a single seed.
///
/// The `Display` form is the chromosome's textual gene representation
/// (bit string or space-joined genes); expression-based fitness functions
/// evaluate it directly.
pub trait Chromosome: fmt::Display + Send {
    /// Cached fitness value of the chromosome.
    fn fitness(&self) -> f64;

    /// Stores a freshly computed fitness value.
    fn set_fitness(&mut self, fitness: f64);

    /// Regenerates the chromosome's value randomly.
    fn generate(&mut self, rng: &mut dyn RngCore);

    /// Factory method: creates a new randomly initialized chromosome with
    /// the same parameters as this one.
    fn create_new(&self, rng: &mut dyn RngCore) -> Box<dyn Chromosome>;

    /// Creates an exact copy of the chromosome, fitness included.
    fn clone_box(&self) -> Box<dyn Chromosome>;

    /// Randomly perturbs part of the chromosome in place.
    fn mutate(&mut self, rng: &mut dyn RngCore);

    /// Exchanges parts of this chromosome and `pair` in place, mutating
    /// both.
    ///
    /// When `pair` has a different concrete type or length, the operation
    /// is a silent no-op: genetic operators run unattended over many
    /// generations, and skipping a mismatched pair is preferable to
    /// failing the whole epoch.
    fn crossover(&mut self, pair: &mut dyn Chromosome, rng: &mut dyn RngCore);

    /// Downcast support for crossover partners and fitness functions.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
