//! Perceptron learning rule.

use crate::neuro::learning::SupervisedLearning;
use crate::neuro::ActivationNetwork;

/// Classic perceptron learning for one-layer networks of threshold
/// neurons.
///
/// Whenever a neuron's output differs from the desired output, its
/// weights move by `rate · (desired - actual) · input` and its threshold
/// by `rate · (desired - actual)`. The error is the summed absolute
/// difference, so it reaches exactly zero once every sample is
/// classified correctly.
pub struct PerceptronLearning<'a> {
    network: &'a mut ActivationNetwork,
    learning_rate: f64,
}

impl<'a> PerceptronLearning<'a> {
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

impl SupervisedLearning for PerceptronLearning<'_> {
    fn run(&mut self, input: &[f64], output: &[f64]) -> f64 {
        let network_output = self.network.compute(input);
        let layer = &mut self.network.layers[0];

        let mut error = 0.0;

        for (j, neuron) in layer.neurons.iter_mut().enumerate() {
            let e = output[j] - network_output[j];
            if e != 0.0 {
                for (weight, x) in neuron.weights.iter_mut().zip(input) {
                    *weight += self.learning_rate * e * x;
                }
                neuron.threshold += self.learning_rate * e;
                error += e.abs();
            }
        }

        error
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
    use crate::neuro::Activation;

    #[test]
    #[should_panic(expected = "one layer only")]
    fn test_rejects_multi_layer_network() {
        let mut network = ActivationNetwork::new(Activation::Threshold, 2, &[2, 1]);
        PerceptronLearning::new(&mut network);
    }

    #[test]
    fn test_no_update_when_output_matches() {
        let mut network = ActivationNetwork::new(Activation::Threshold, 2, &[1]);
        network.layers[0].neurons[0].weights = vec![1.0, 1.0];
        network.layers[0].neurons[0].threshold = -0.5;

        let mut trainer = PerceptronLearning::new(&mut network);
        // (1, 0) -> 1 already holds, no error
        let error = trainer.run(&[1.0, 0.0], &[1.0]);
        assert_eq!(error, 0.0);
    }

    #[test]
    fn test_update_moves_toward_desired() {
        let mut network = ActivationNetwork::new(Activation::Threshold, 2, &[1]);
        network.layers[0].neurons[0].weights = vec![0.0, 0.0];
        network.layers[0].neurons[0].threshold = 0.0;

        let mut trainer = PerceptronLearning::new(&mut network);
        // output is 1 (threshold fires at 0), desired is 0
        let error = trainer.run(&[1.0, 1.0], &[0.0]);
        assert_eq!(error, 1.0);

        let neuron = &network.layers[0].neurons[0];
        assert_eq!(neuron.weights, vec![-0.1, -0.1]);
        assert_eq!(neuron.threshold, -0.1);
    }

    #[test]
    fn test_clamps_learning_rate() {
        let mut network = ActivationNetwork::new(Activation::Threshold, 2, &[1]);
        let mut trainer = PerceptronLearning::new(&mut network);
        trainer.set_learning_rate(3.0);
        assert_eq!(trainer.learning_rate(), 1.0);
    }
}
