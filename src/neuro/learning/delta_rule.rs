//! Delta rule (Widrow-Hoff) learning.

use crate::neuro::learning::SupervisedLearning;
use crate::neuro::ActivationNetwork;

/// Delta rule learning for one-layer networks with a continuous
/// activation function.
///
/// Weight updates scale the error by the activation derivative:
/// `w += rate · e · f'(output) · input`, threshold analogously. The
/// returned error is `Σ e² / 2`.
pub struct DeltaRuleLearning<'a> {
    network: &'a mut ActivationNetwork,
    learning_rate: f64,
}

impl<'a> DeltaRuleLearning<'a> {
    /// Creates a trainer for the given network.
    ///
    /// # Panics
    /// Panics if the network has more than one layer.
    pub fn new(network: &'a mut ActivationNetwork) -> Self {
        assert_eq!(
            network.layers.len(),
            1,
            "invalid neural network: it should have one layer only"
        );
        Self {
            network,
            learning_rate: 0.1,
        }
    }

    /// Learning rate, `[0, 1]`. Default 0.1.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Sets the learning rate (clamped to `[0, 1]`).
    pub fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate.clamp(0.0, 1.0);
    }
}

impl SupervisedLearning for DeltaRuleLearning<'_> {
    fn run(&mut self, input: &[f64], output: &[f64]) -> f64 {
        let network_output = self.network.compute(input);
        let layer = &mut self.network.layers[0];
        // all neurons of the layer share one activation function
        let function = layer.neurons[0].function;

        let mut error = 0.0;

        for (j, neuron) in layer.neurons.iter_mut().enumerate() {
            let e = output[j] - network_output[j];
            let derivative = function.derivative2(network_output[j]);

            for (weight, x) in neuron.weights.iter_mut().zip(input) {
                *weight += self.learning_rate * e * derivative * x;
            }
            neuron.threshold += self.learning_rate * e * derivative;

            error += e * e;
        }

        error / 2.0
    }

    fn run_epoch(&mut self, inputs: &[Vec<f64>], outputs: &[Vec<f64>]) -> f64 {
        inputs
            .iter()
            .zip(outputs)
            .map(|(input, output)| self.run(input, output))
            .sum()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Range;
    use crate::neuro::Activation;
    use crate::random::create_rng;

    #[test]
    #[should_panic(expected = "one layer only")]
    fn test_rejects_multi_layer_network() {
        let mut network = ActivationNetwork::new(Activation::sigmoid(), 2, &[2, 1]);
        DeltaRuleLearning::new(&mut network);
    }

    #[test]
    fn test_error_is_half_squared() {
        let mut network = ActivationNetwork::new(Activation::sigmoid(), 1, &[1]);
        network.layers[0].neurons[0].weights = vec![0.0];
        network.layers[0].neurons[0].threshold = 0.0;

        let mut trainer = DeltaRuleLearning::new(&mut network);
        trainer.set_learning_rate(0.0); // measure only
        // sigmoid(0) = 0.5, desired 1.0 -> e = 0.5
        let error = trainer.run(&[0.0], &[1.0]);
        assert!((error - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_learns_linearly_separable_function() {
        let mut rng = create_rng(42);
        let mut network = ActivationNetwork::new(Activation::sigmoid(), 2, &[1]);
        network.randomize(&mut rng, Range::new(-0.5, 0.5));

        let inputs: Vec<Vec<f64>> =
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        // OR function
        let outputs: Vec<Vec<f64>> = vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]];

        let mut trainer = DeltaRuleLearning::new(&mut network);
        trainer.set_learning_rate(1.0);

        let first = trainer.run_epoch(&inputs, &outputs);
        let mut last = first;
        for _ in 0..500 {
            last = trainer.run_epoch(&inputs, &outputs);
        }
        assert!(
            last < first * 0.5,
            "error should shrink substantially: first {first}, last {last}"
        );
    }
}
