//! Layers: ordered neuron sequences sharing one inputs count.

use rand::Rng;

use crate::core::Range;
use crate::neuro::{Activation, ActivationNeuron, DistanceNeuron};

/// Layer of [`ActivationNeuron`]s.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivationLayer {
    /// Neurons of the layer. All share the layer's inputs count.
    pub neurons: Vec<ActivationNeuron>,
    inputs_count: usize,
    output: Vec<f64>,
}

impl ActivationLayer {
    /// Creates a layer of `neurons_count` neurons, each accepting
    /// `inputs_count` inputs (both clamped to at least one).
    pub fn new(neurons_count: usize, inputs_count: usize, function: Activation) -> Self {
        let inputs_count = inputs_count.max(1);
        let neurons_count = neurons_count.max(1);
        Self {
            neurons: (0..neurons_count)
                .map(|_| ActivationNeuron::new(inputs_count, function))
                .collect(),
            inputs_count,
            output: Vec::new(),
        }
    }

    /// Layer's inputs count.
    pub fn inputs_count(&self) -> usize {
        self.inputs_count
    }

    /// Most recent output vector; empty until [`compute`](Self::compute)
    /// has run.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Computes each neuron's output, assembles the vector, and caches it.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the layer's inputs count.
    pub fn compute(&mut self, input: &[f64]) -> Vec<f64> {
        let output: Vec<f64> = self
            .neurons
            .iter_mut()
            .map(|neuron| neuron.compute(input))
            .collect();
        self.output = output.clone();
        output
    }

    /// Randomizes every neuron of the layer.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, range: Range) {
        for neuron in &mut self.neurons {
            neuron.randomize(rng, range);
        }
    }

    /// Sets a new activation function on every neuron of the layer.
    pub fn set_activation(&mut self, function: Activation) {
        for neuron in &mut self.neurons {
            neuron.function = function;
        }
    }
}

/// Layer of [`DistanceNeuron`]s — the single layer of competitive
/// networks such as SOM and elastic nets.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceLayer {
    /// Neurons of the layer.
    pub neurons: Vec<DistanceNeuron>,
    inputs_count: usize,
    output: Vec<f64>,
}

impl DistanceLayer {
    /// Creates a layer of `neurons_count` distance neurons.
    pub fn new(neurons_count: usize, inputs_count: usize) -> Self {
        let inputs_count = inputs_count.max(1);
        let neurons_count = neurons_count.max(1);
        Self {
            neurons: (0..neurons_count)
                .map(|_| DistanceNeuron::new(inputs_count))
                .collect(),
            inputs_count,
            output: Vec::new(),
        }
    }

    /// Layer's inputs count.
    pub fn inputs_count(&self) -> usize {
        self.inputs_count
    }

    /// Most recent output vector; empty until [`compute`](Self::compute)
    /// has run.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Computes each neuron's distance, assembles the vector, and caches it.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the layer's inputs count.
    pub fn compute(&mut self, input: &[f64]) -> Vec<f64> {
        let output: Vec<f64> = self
            .neurons
            .iter_mut()
            .map(|neuron| neuron.compute(input))
            .collect();
        self.output = output.clone();
        output
    }

    /// Randomizes every neuron of the layer.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, range: Range) {
        for neuron in &mut self.neurons {
            neuron.randomize(rng, range);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_output_length_equals_neuron_count() {
        let mut layer = ActivationLayer::new(5, 3, Activation::sigmoid());
        let output = layer.compute(&[0.1, 0.2, 0.3]);
        assert_eq!(output.len(), 5);
        assert_eq!(layer.output(), output.as_slice());
    }

    #[test]
    fn test_all_neurons_share_inputs_count() {
        let layer = ActivationLayer::new(4, 7, Activation::sigmoid());
        for neuron in &layer.neurons {
            assert_eq!(neuron.inputs_count(), layer.inputs_count());
        }
    }

    #[test]
    fn test_set_activation_rewrites_all_neurons() {
        let mut layer = ActivationLayer::new(3, 2, Activation::sigmoid());
        layer.set_activation(Activation::Threshold);
        for neuron in &layer.neurons {
            assert_eq!(neuron.function, Activation::Threshold);
        }
    }

    #[test]
    fn test_distance_layer_compute() {
        let mut rng = create_rng(42);
        let mut layer = DistanceLayer::new(4, 2);
        layer.randomize(&mut rng, Range::default());
        let output = layer.compute(&[0.5, 0.5]);
        assert_eq!(output.len(), 4);
        assert!(output.iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn test_output_empty_before_compute() {
        let layer = ActivationLayer::new(2, 2, Activation::sigmoid());
        assert!(layer.output().is_empty());
    }
}
