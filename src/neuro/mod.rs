//! Feed-forward neural networks.
//!
//! The computation graph is built from three levels:
//!
//! - **Neurons** ([`ActivationNeuron`], [`DistanceNeuron`]): a weight
//!   vector plus a scalar output. Activation neurons apply an
//!   [`Activation`] function to the weighted input sum plus a threshold;
//!   distance neurons compute the L1 distance between weights and inputs.
//! - **Layers** ([`ActivationLayer`], [`DistanceLayer`]): fixed-size
//!   neuron sequences sharing one inputs count.
//! - **Networks** ([`ActivationNetwork`], [`DistanceNetwork`]): layer
//!   chains where each layer consumes the previous layer's output.
//!
//! `compute` takes `&mut self` because every level caches its most recent
//! output (read back by the learning algorithms in [`learning`]). Callers
//! that want concurrent evaluation should clone the network per thread
//! and use the returned vectors.

mod activation;
mod layer;
pub mod learning;
mod network;
mod neuron;

pub use activation::Activation;
pub use layer::{ActivationLayer, DistanceLayer};
pub use network::{ActivationNetwork, DistanceNetwork};
pub use neuron::{ActivationNeuron, DistanceNeuron};
