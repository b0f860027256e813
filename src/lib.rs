//! Feed-forward neural networks with gradient and evolutionary training.
//!
//! The crate has two cooperating halves:
//!
//! - **[`neuro`]**: the computation graph (neurons, layers, networks with
//!   activation-based or distance-based outputs) and its learning
//!   algorithms — perceptron, delta rule, back-propagation, resilient
//!   back-propagation (RProp), self-organizing maps, elastic nets, and
//!   evolutionary training.
//! - **[`genetic`]**: a genetic-algorithm engine with pluggable
//!   chromosomes (binary, bounded integer array, permutation, real
//!   array), fitness functions, and selection strategies. Evolutionary
//!   learning bridges the two halves by encoding a network's weight
//!   vector as a real-array chromosome.
//!
//! Supporting modules: [`core`] (ranges, polish-notation evaluation) and
//! [`random`] (seedable generator capabilities).
//!
//! # Example: training XOR with back-propagation
//!
//! ```
//! use evonet::core::Range;
//! use evonet::neuro::learning::{BackPropagation, SupervisedLearning};
//! use evonet::neuro::{Activation, ActivationNetwork};
//! use evonet::random::create_rng;
//!
//! let inputs = vec![
//!     vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0],
//! ];
//! let outputs = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
//!
//! let mut network = ActivationNetwork::new(Activation::sigmoid(), 2, &[2, 1]);
//! let mut rng = create_rng(42);
//! network.randomize(&mut rng, Range::new(-1.0, 1.0));
//!
//! let mut teacher = BackPropagation::new(&mut network);
//! teacher.set_learning_rate(1.0);
//! for _ in 0..10_000 {
//!     if teacher.run_epoch(&inputs, &outputs) < 0.1 {
//!         break;
//!     }
//! }
//! ```
//!
//! # Concurrency
//!
//! The engine is single-threaded by design: no internal locking, threads,
//! or async machinery. `compute` and the learning algorithms take
//! exclusive references, so the borrow checker rules out concurrent
//! mutation; parallel training partitions at a higher level — one
//! network, trainer, or population per thread.

pub mod core;
pub mod genetic;
pub mod neuro;
pub mod random;
