//! Networks: layer chains with a cached output vector.

use rand::Rng;

use crate::core::Range;
use crate::neuro::{Activation, ActivationLayer, DistanceLayer};
use crate::random::{create_rng, random_seed};

/// Multi-layer feed-forward network of [`ActivationLayer`]s.
///
/// Layer `i`'s inputs count equals layer `i - 1`'s neuron count; layer 0
/// accepts the network's declared inputs count.
///
/// # Examples
///
/// ```
/// use evonet::neuro::{Activation, ActivationNetwork};
///
/// // 3 inputs, two layers: 4 neurons, then 1 neuron
/// let mut network = ActivationNetwork::new(Activation::sigmoid(), 3, &[4, 1]);
/// let output = network.compute(&[0.1, 0.2, 0.3]);
/// assert_eq!(output.len(), 1);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivationNetwork {
    /// Layers from input to output.
    pub layers: Vec<ActivationLayer>,
    inputs_count: usize,
    output: Vec<f64>,
}

impl ActivationNetwork {
    /// Creates a network with the given activation function, inputs count,
    /// and per-layer neuron counts. Weights and thresholds are randomized
    /// over `[0, 1]` with a process-seeded generator; call
    /// [`randomize`](Self::randomize) for a custom range or seed.
    ///
    /// # Panics
    /// Panics if `neurons_count` is empty.
    pub fn new(function: Activation, inputs_count: usize, neurons_count: &[usize]) -> Self {
        assert!(
            !neurons_count.is_empty(),
            "network needs at least one layer"
        );

        let inputs_count = inputs_count.max(1);
        let mut layers = Vec::with_capacity(neurons_count.len());
        let mut layer_inputs = inputs_count;
        for &count in neurons_count {
            layers.push(ActivationLayer::new(count, layer_inputs, function));
            layer_inputs = count.max(1);
        }

        let mut network = Self {
            layers,
            inputs_count,
            output: Vec::new(),
        };
        let mut rng = create_rng(random_seed());
        network.randomize(&mut rng, Range::default());
        network
    }

    /// Network's inputs count.
    pub fn inputs_count(&self) -> usize {
        self.inputs_count
    }

    /// Most recent output vector; empty until [`compute`](Self::compute)
    /// has run.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Feeds `input` through the layers in sequence; the last layer's
    /// output becomes the network's output and is cached.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the network's inputs count.
    pub fn compute(&mut self, input: &[f64]) -> Vec<f64> {
        let mut output = input.to_vec();
        for layer in &mut self.layers {
            output = layer.compute(&output);
        }
        self.output = output.clone();
        output
    }

    /// Re-draws all weights and thresholds uniformly from `range`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, range: Range) {
        for layer in &mut self.layers {
            layer.randomize(rng, range);
        }
    }

    /// Sets a new activation function on every neuron of the network.
    pub fn set_activation(&mut self, function: Activation) {
        for layer in &mut self.layers {
            layer.set_activation(function);
        }
    }
}

/// Competitive network: a single [`DistanceLayer`] whose winner is the
/// neuron with the minimum distance to the current input. Base for SOM
/// and elastic-net training.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceNetwork {
    /// The network's only layer.
    pub layer: DistanceLayer,
    inputs_count: usize,
    output: Vec<f64>,
}

impl DistanceNetwork {
    /// Creates a network of `neurons_count` distance neurons, randomized
    /// over `[0, 1]` with a process-seeded generator.
    pub fn new(inputs_count: usize, neurons_count: usize) -> Self {
        let inputs_count = inputs_count.max(1);
        let mut network = Self {
            layer: DistanceLayer::new(neurons_count, inputs_count),
            inputs_count,
            output: Vec::new(),
        };
        let mut rng = create_rng(random_seed());
        network.randomize(&mut rng, Range::default());
        network
    }

    /// Network's inputs count.
    pub fn inputs_count(&self) -> usize {
        self.inputs_count
    }

    /// Most recent output vector; empty until [`compute`](Self::compute)
    /// has run.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Computes all neuron distances to `input` and caches them.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the network's inputs count.
    pub fn compute(&mut self, input: &[f64]) -> Vec<f64> {
        let output = self.layer.compute(input);
        self.output = output.clone();
        output
    }

    /// Index of the winner neuron: the minimum of the cached output
    /// vector, first minimum on ties.
    ///
    /// # Panics
    /// Panics if [`compute`](Self::compute) has not run yet.
    pub fn winner(&self) -> usize {
        assert!(!self.output.is_empty(), "compute must run before winner");

        let mut min = self.output[0];
        let mut min_index = 0;
        for (i, &value) in self.output.iter().enumerate().skip(1) {
            if value < min {
                min = value;
                min_index = i;
            }
        }
        min_index
    }

    /// Re-draws all weights uniformly from `range`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, range: Range) {
        self.layer.randomize(rng, range);
    }
}

// ============================================================================
// Tests
// ============================================================================
