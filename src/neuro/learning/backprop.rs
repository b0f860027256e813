//! Back-propagation learning.

use crate::neuro::learning::SupervisedLearning;
use crate::neuro::ActivationNetwork;

/// Back-propagation learning for multi-layer networks with continuous
/// activation functions.
///
/// Each [`run`](SupervisedLearning::run) performs a forward pass, a
/// backward error pass, and an immediate weight update — online
/// (stochastic) training. The update combines the previous update with
/// the fresh gradient through the momentum term:
///
/// ```text
/// Δw = momentum · rate · Δw_prev + (1 - momentum) · rate · e · input
/// ```
///
/// The derivative function is taken from the first neuron of the first
/// layer and reused for the whole network, so all neurons are assumed to
/// share one activation function. Networks built by
/// [`ActivationNetwork::new`] always satisfy this.
///
/// # Examples
///
/// Training a 2-2-1 network to compute XOR:
///
/// ```no_run
/// use evonet::neuro::learning::{BackPropagation, SupervisedLearning};
/// use evonet::neuro::{Activation, ActivationNetwork};
///
/// let inputs = vec![
///     vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0],
/// ];
/// let outputs = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
///
/// let mut network = ActivationNetwork::new(Activation::sigmoid(), 2, &[2, 1]);
/// let mut teacher = BackPropagation::new(&mut network);
/// loop {
///     let error = teacher.run_epoch(&inputs, &outputs);
///     if error < 0.1 {
///         break;
///     }
/// }
/// ```
pub struct BackPropagation<'a> {
    network: &'a mut ActivationNetwork,
    learning_rate: f64,
    momentum: f64,

    // per layer, per neuron
    neuron_errors: Vec<Vec<f64>>,
    thresholds_updates: Vec<Vec<f64>>,
    // per layer, per neuron, per weight
    weights_updates: Vec<Vec<Vec<f64>>>,
}

impl<'a> BackPropagation<'a> {
    /// Creates a trainer for the given network.
    pub fn new(network: &'a mut ActivationNetwork) -> Self {
        let mut neuron_errors = Vec::with_capacity(network.layers.len());
        let mut weights_updates = Vec::with_capacity(network.layers.len());
        let mut thresholds_updates = Vec::with_capacity(network.layers.len());

        for layer in &network.layers {
            let neurons_count = layer.neurons.len();
            neuron_errors.push(vec![0.0; neurons_count]);
            thresholds_updates.push(vec![0.0; neurons_count]);
            weights_updates.push(vec![vec![0.0; layer.inputs_count()]; neurons_count]);
        }

        Self {
            network,
            learning_rate: 0.1,
            momentum: 0.0,
            neuron_errors,
            thresholds_updates,
            weights_updates,
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

    /// Momentum, `[0, 1]`: the portion of the previous update reused on
    /// the current iteration. Default 0.
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    /// Sets the momentum (clamped to `[0, 1]`).
    pub fn set_momentum(&mut self, momentum: f64) {
        self.momentum = momentum.clamp(0.0, 1.0);
    }

    /// Backward error pass. Returns the output layer's `Σ e² / 2`.
    fn calculate_error(&mut self, desired_output: &[f64]) -> f64 {
        let layers = &self.network.layers;
        let errors = &mut self.neuron_errors;
        // all neurons of the network are assumed to share one
        // activation function
        let function = layers[0].neurons[0].function;

        let mut error = 0.0;
        let last = layers.len() - 1;

        for (i, neuron) in layers[last].neurons.iter().enumerate() {
            let output = neuron.output();
            let e = desired_output[i] - output;
            errors[last][i] = e * function.derivative2(output);
            error += e * e;
        }

        for j in (0..last).rev() {
            for i in 0..layers[j].neurons.len() {
                let mut sum = 0.0;
                for (k, next_neuron) in layers[j + 1].neurons.iter().enumerate() {
                    sum += errors[j + 1][k] * next_neuron.weights[i];
                }
                errors[j][i] = sum * function.derivative2(layers[j].neurons[i].output());
            }
        }

        error / 2.0
    }

    /// Folds each neuron's error into its update buffers, weighing the
    /// previous update by the momentum.
    fn calculate_updates(&mut self, input: &[f64]) {
        let cached_momentum = self.learning_rate * self.momentum;
        let cached_1m_momentum = self.learning_rate * (1.0 - self.momentum);

        // the first layer is driven by the raw input vector
        let errors = &self.neuron_errors[0];
        let layer_weights_updates = &mut self.weights_updates[0];
        let layer_threshold_updates = &mut self.thresholds_updates[0];

        for (i, &neuron_error) in errors.iter().enumerate() {
            let cached_error = neuron_error * cached_1m_momentum;
            for (update, x) in layer_weights_updates[i].iter_mut().zip(input) {
                *update = cached_momentum * *update + cached_error * x;
            }
            layer_threshold_updates[i] =
                cached_momentum * layer_threshold_updates[i] + cached_error;
        }

        // deeper layers are driven by the previous layer's outputs
        let layers = &self.network.layers;
        for k in 1..layers.len() {
            let errors = &self.neuron_errors[k];
            let layer_weights_updates = &mut self.weights_updates[k];
            let layer_threshold_updates = &mut self.thresholds_updates[k];
            let previous_layer = &layers[k - 1];

            for (i, &neuron_error) in errors.iter().enumerate() {
                let cached_error = neuron_error * cached_1m_momentum;
                for (j, update) in layer_weights_updates[i].iter_mut().enumerate() {
                    *update =
                        cached_momentum * *update + cached_error * previous_layer.neurons[j].output();
                }
                layer_threshold_updates[i] =
                    cached_momentum * layer_threshold_updates[i] + cached_error;
            }
        }
    }

    /// Applies the accumulated updates to every weight and threshold.
    fn update_network(&mut self) {
        for (k, layer) in self.network.layers.iter_mut().enumerate() {
            let layer_weights_updates = &self.weights_updates[k];
            let layer_threshold_updates = &self.thresholds_updates[k];

            for (j, neuron) in layer.neurons.iter_mut().enumerate() {
                for (weight, update) in neuron.weights.iter_mut().zip(&layer_weights_updates[j]) {
                    *weight += update;
                }
                neuron.threshold += layer_threshold_updates[j];
            }
        }
    }
}

impl SupervisedLearning for BackPropagation<'_> {
    fn run(&mut self, input: &[f64], output: &[f64]) -> f64 {
        self.network.compute(input);

        let error = self.calculate_error(output);
        self.calculate_updates(input);
        self.update_network();

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
