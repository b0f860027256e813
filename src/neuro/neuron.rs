//! Neurons: the leaves of the computation graph.

use rand::Rng;

use crate::core::Range;
use crate::neuro::Activation;

/// Neuron computing `f(threshold + Σ wᵢ·xᵢ)` for an activation function `f`.
///
/// The weight vector's length is fixed at construction and never resized.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivationNeuron {
    /// Input weights, one per input.
    pub weights: Vec<f64>,
    /// Bias added to the weighted sum before activation.
    pub threshold: f64,
    /// Activation function applied to the sum.
    pub function: Activation,
    output: f64,
}

impl ActivationNeuron {
    /// Creates a neuron with `inputs` zeroed weights (at least one).
    pub fn new(inputs: usize, function: Activation) -> Self {
        Self {
            weights: vec![0.0; inputs.max(1)],
            threshold: 0.0,
            function,
            output: 0.0,
        }
    }

    /// Number of inputs the neuron accepts.
    pub fn inputs_count(&self) -> usize {
        self.weights.len()
    }

    /// Most recent value returned by [`compute`](Self::compute).
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Re-draws all weights and the threshold uniformly from `range`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, range: Range) {
        let min = range.min() as f64;
        let length = range.length() as f64;
        for weight in &mut self.weights {
            *weight = rng.random::<f64>() * length + min;
        }
        self.threshold = rng.random::<f64>() * length + min;
    }

    /// Computes the neuron's output and caches it.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the neuron's inputs count.
    pub fn compute(&mut self, input: &[f64]) -> f64 {
        assert_eq!(
            input.len(),
            self.weights.len(),
            "wrong length of the input vector"
        );

        let mut sum = self.threshold;
        for (weight, x) in self.weights.iter().zip(input) {
            sum += weight * x;
        }

        let output = self.function.function(sum);
        self.output = output;
        output
    }
}

/// Neuron computing the L1 distance `Σ |wᵢ - xᵢ|` between its weights and
/// the input. Used by competitive-learning networks (SOM, elastic net),
/// where the smallest distance marks the winner.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceNeuron {
    /// Input weights, one per input.
    pub weights: Vec<f64>,
    output: f64,
}

impl DistanceNeuron {
    /// Creates a neuron with `inputs` zeroed weights (at least one).
    pub fn new(inputs: usize) -> Self {
        Self {
            weights: vec![0.0; inputs.max(1)],
            output: 0.0,
        }
    }

    /// Number of inputs the neuron accepts.
    pub fn inputs_count(&self) -> usize {
        self.weights.len()
    }

    /// Most recent value returned by [`compute`](Self::compute).
    pub fn output(&self) -> f64 {
        self.output
    }

    /// Re-draws all weights uniformly from `range`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, range: Range) {
        let min = range.min() as f64;
        let length = range.length() as f64;
        for weight in &mut self.weights {
            *weight = rng.random::<f64>() * length + min;
        }
    }

    /// Computes the neuron's output and caches it.
    ///
    /// # Panics
    /// Panics if `input.len()` differs from the neuron's inputs count.
    pub fn compute(&mut self, input: &[f64]) -> f64 {
        assert_eq!(
            input.len(),
            self.weights.len(),
            "wrong length of the input vector"
        );

        let mut dif = 0.0;
        for (weight, x) in self.weights.iter().zip(input) {
            dif += (weight - x).abs();
        }

        self.output = dif;
        dif
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
    fn test_activation_neuron_weighted_sum() {
        let mut neuron = ActivationNeuron::new(2, Activation::Threshold);
        neuron.weights = vec![1.0, 1.0];
        neuron.threshold = -1.5;

        assert_eq!(neuron.compute(&[1.0, 1.0]), 1.0);
        assert_eq!(neuron.compute(&[1.0, 0.0]), 0.0);
        assert_eq!(neuron.output(), 0.0);
    }

    #[test]
    #[should_panic(expected = "wrong length of the input vector")]
    fn test_activation_neuron_rejects_wrong_input_length() {
        let mut neuron = ActivationNeuron::new(3, Activation::sigmoid());
        neuron.compute(&[1.0, 2.0]);
    }

    #[test]
    fn test_distance_neuron_l1() {
        let mut neuron = DistanceNeuron::new(3);
        neuron.weights = vec![1.0, 2.0, 3.0];
        assert_eq!(neuron.compute(&[1.0, 1.0, 1.0]), 3.0);
        assert_eq!(neuron.compute(&[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_randomize_respects_range() {
        let mut rng = create_rng(42);
        let range = Range::new(-0.5, 0.5);
        let mut neuron = ActivationNeuron::new(10, Activation::sigmoid());
        neuron.randomize(&mut rng, range);

        for &weight in &neuron.weights {
            assert!((-0.5..=0.5).contains(&weight), "weight {weight} outside range");
        }
        assert!((-0.5..=0.5).contains(&neuron.threshold));
    }

    #[test]
    fn test_weight_length_fixed() {
        let mut rng = create_rng(42);
        let mut neuron = DistanceNeuron::new(4);
        neuron.randomize(&mut rng, Range::default());
        assert_eq!(neuron.inputs_count(), 4);
        assert_eq!(neuron.weights.len(), 4);
    }

    #[test]
    fn test_zero_inputs_clamped_to_one() {
        let neuron = ActivationNeuron::new(0, Activation::sigmoid());
        assert_eq!(neuron.inputs_count(), 1);
    }
}
