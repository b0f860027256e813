//! Learning algorithms.
//!
//! Supervised algorithms adjust a network against desired outputs:
//!
//! - [`PerceptronLearning`]: single-layer threshold networks
//! - [`DeltaRuleLearning`]: single-layer continuous-activation networks
//! - [`BackPropagation`]: multi-layer networks, online updates with
//!   momentum
//! - [`ResilientBackPropagation`]: multi-layer networks, full-batch
//!   per-weight adaptive steps (RProp)
//! - [`EvolutionaryLearning`]: multi-layer networks, weights evolved by
//!   a genetic [`Population`](crate::genetic::Population)
//!
//! Unsupervised algorithms organize a
//! [`DistanceNetwork`](crate::neuro::DistanceNetwork) around input
//! similarity:
//!
//! - [`SomLearning`]: self-organizing map on a rectangular grid
//! - [`ElasticLearning`]: elastic net on a ring
//!
//! Every trainer borrows its network mutably for the training session;
//! drop the trainer to use the network. None of the algorithms are safe
//! for concurrent mutation — partition at a higher level (one network
//! and trainer per thread) for parallel training.

mod backprop;
mod delta_rule;
mod elastic;
mod evolutionary;
mod perceptron;
mod rprop;
mod som;

pub use backprop::BackPropagation;
pub use delta_rule::DeltaRuleLearning;
pub use elastic::ElasticLearning;
pub use evolutionary::{EvolutionaryFitness, EvolutionaryLearning};
pub use perceptron::PerceptronLearning;
pub use rprop::ResilientBackPropagation;
pub use som::SomLearning;

/// A learning algorithm driven by sample inputs and desired outputs.
pub trait SupervisedLearning {
    /// Runs one learning iteration on a single sample and returns the
    /// learning error.
    fn run(&mut self, input: &[f64], output: &[f64]) -> f64;

    /// Runs one learning epoch over all samples, in the given order, and
    /// returns the summed learning error.
    fn run_epoch(&mut self, inputs: &[Vec<f64>], outputs: &[Vec<f64>]) -> f64;
}

/// A learning algorithm driven by sample inputs only; the network
/// organizes itself around similarities between samples.
pub trait UnsupervisedLearning {
    /// Runs one learning iteration on a single sample and returns the
    /// learning error.
    fn run(&mut self, input: &[f64]) -> f64;

    /// Runs one learning epoch over all samples, in the given order, and
    /// returns the summed learning error.
    fn run_epoch(&mut self, inputs: &[Vec<f64>]) -> f64;
}
