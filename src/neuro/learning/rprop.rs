//! Resilient back-propagation (RProp) learning.

use crate::neuro::learning::SupervisedLearning;
use crate::neuro::ActivationNetwork;

const ETA_PLUS: f64 = 1.2;
const ETA_MINUS: f64 = 0.5;
const DELTA_MAX: f64 = 50.0;
const DELTA_MIN: f64 = 1e-6;

/// Sign with `sign(0) = 0`; `f64::signum` maps zero to one, which would
/// move weights on a zero gradient.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Resilient back-propagation for multi-layer networks: per-weight
/// adaptive step sizes driven only by gradient signs.
///
/// This is a full-batch method: [`run_epoch`](SupervisedLearning::run_epoch)
/// accumulates the gradient over all samples before applying one update.
/// For every weight (and threshold) a step size is kept, bounded to
/// `[1e-6, 50.0]`:
///
/// - gradient kept its sign → step grows by 1.2, weight moves by
///   `-sign(gradient) · step`;
/// - gradient flipped its sign → step shrinks by 0.5 and the weight
///   update is skipped this round;
/// - gradient is zero on either side → weight moves with the current
///   step unchanged.
///
/// [`run`](SupervisedLearning::run) degrades to a single-sample batch:
/// the gradient is reset before and applied after each call.
///
/// Output-layer errors are accumulated as `output − desired`, so weight
/// moves subtract the signed step; the two sign conventions cancel.
pub struct ResilientBackPropagation<'a> {
    network: &'a mut ActivationNetwork,
    learning_rate: f64,

    // per layer, per neuron
    neuron_errors: Vec<Vec<f64>>,
    thresholds_updates: Vec<Vec<f64>>,
    thresholds_derivatives: Vec<Vec<f64>>,
    thresholds_previous_derivatives: Vec<Vec<f64>>,
    // per layer, per neuron, per weight
    weights_updates: Vec<Vec<Vec<f64>>>,
    weights_derivatives: Vec<Vec<Vec<f64>>>,
    weights_previous_derivatives: Vec<Vec<Vec<f64>>>,
}

impl<'a> ResilientBackPropagation<'a> {
    /// Creates a trainer for the given network. All update steps start
    /// at the learning rate (default 0.0125).
    pub fn new(network: &'a mut ActivationNetwork) -> Self {
        let learning_rate = 0.0125;

        let mut neuron_errors = Vec::with_capacity(network.layers.len());
        let mut thresholds_updates = Vec::with_capacity(network.layers.len());
        let mut thresholds_derivatives = Vec::with_capacity(network.layers.len());
        let mut thresholds_previous_derivatives = Vec::with_capacity(network.layers.len());
        let mut weights_updates = Vec::with_capacity(network.layers.len());
        let mut weights_derivatives = Vec::with_capacity(network.layers.len());
        let mut weights_previous_derivatives = Vec::with_capacity(network.layers.len());

        for layer in &network.layers {
            let neurons_count = layer.neurons.len();
            let inputs_count = layer.inputs_count();

            neuron_errors.push(vec![0.0; neurons_count]);
            thresholds_updates.push(vec![learning_rate; neurons_count]);
            thresholds_derivatives.push(vec![0.0; neurons_count]);
            thresholds_previous_derivatives.push(vec![0.0; neurons_count]);
            weights_updates.push(vec![vec![learning_rate; inputs_count]; neurons_count]);
            weights_derivatives.push(vec![vec![0.0; inputs_count]; neurons_count]);
            weights_previous_derivatives.push(vec![vec![0.0; inputs_count]; neurons_count]);
        }

        Self {
            network,
            learning_rate,
            neuron_errors,
            thresholds_updates,
            thresholds_derivatives,
            thresholds_previous_derivatives,
            weights_updates,
            weights_derivatives,
            weights_previous_derivatives,
        }
    }

    /// Initial per-weight update step. Default 0.0125.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Sets the learning rate and resets every update step to it.
    pub fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate;
        self.reset_updates(rate);
    }

    fn reset_updates(&mut self, rate: f64) {
        for layer in &mut self.weights_updates {
            for neuron in layer {
                neuron.fill(rate);
            }
        }
        for layer in &mut self.thresholds_updates {
            layer.fill(rate);
        }
    }

    /// Zeroes the accumulated gradient.
    fn reset_gradient(&mut self) {
        for layer in &mut self.weights_derivatives {
            for neuron in layer {
                neuron.fill(0.0);
            }
        }
        for layer in &mut self.thresholds_derivatives {
            layer.fill(0.0);
        }
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
            let e = output - desired_output[i];
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

    /// Accumulates the current sample's gradient into the derivative
    /// buffers.
    fn calculate_gradient(&mut self, input: &[f64]) {
        // the first layer is driven by the raw input vector
        let errors = &self.neuron_errors[0];
        let layer_weights_derivatives = &mut self.weights_derivatives[0];
        let layer_threshold_derivatives = &mut self.thresholds_derivatives[0];

        for (i, &neuron_error) in errors.iter().enumerate() {
            for (derivative, x) in layer_weights_derivatives[i].iter_mut().zip(input) {
                *derivative += neuron_error * x;
            }
            layer_threshold_derivatives[i] += neuron_error;
        }

        // deeper layers are driven by the previous layer's outputs
        let layers = &self.network.layers;
        for k in 1..layers.len() {
            let errors = &self.neuron_errors[k];
            let layer_weights_derivatives = &mut self.weights_derivatives[k];
            let layer_threshold_derivatives = &mut self.thresholds_derivatives[k];
            let previous_layer = &layers[k - 1];

            for (i, &neuron_error) in errors.iter().enumerate() {
                for (j, derivative) in layer_weights_derivatives[i].iter_mut().enumerate() {
                    *derivative += neuron_error * previous_layer.neurons[j].output();
                }
                layer_threshold_derivatives[i] += neuron_error;
            }
        }
    }

    /// Applies the RProp rule to every weight and threshold.
    fn update_network(&mut self) {
        for (k, layer) in self.network.layers.iter_mut().enumerate() {
            let layer_updates = &mut self.weights_updates[k];
            let layer_derivatives = &mut self.weights_derivatives[k];
            let layer_previous = &mut self.weights_previous_derivatives[k];
            let threshold_updates = &mut self.thresholds_updates[k];
            let threshold_derivatives = &mut self.thresholds_derivatives[k];
            let threshold_previous = &mut self.thresholds_previous_derivatives[k];

            for (j, neuron) in layer.neurons.iter_mut().enumerate() {
                let updates = &mut layer_updates[j];
                let derivatives = &mut layer_derivatives[j];
                let previous = &mut layer_previous[j];

                for i in 0..neuron.weights.len() {
                    let s = previous[i] * derivatives[i];

                    if s > 0.0 {
                        updates[i] = (updates[i] * ETA_PLUS).min(DELTA_MAX);
                        neuron.weights[i] -= sign(derivatives[i]) * updates[i];
                        previous[i] = derivatives[i];
                    } else if s < 0.0 {
                        updates[i] = (updates[i] * ETA_MINUS).max(DELTA_MIN);
                        previous[i] = 0.0;
                    } else {
                        neuron.weights[i] -= sign(derivatives[i]) * updates[i];
                        previous[i] = derivatives[i];
                    }
                }

                let s = threshold_previous[j] * threshold_derivatives[j];

                if s > 0.0 {
                    threshold_updates[j] = (threshold_updates[j] * ETA_PLUS).min(DELTA_MAX);
                    neuron.threshold -= sign(threshold_derivatives[j]) * threshold_updates[j];
                    threshold_previous[j] = threshold_derivatives[j];
                } else if s < 0.0 {
                    threshold_updates[j] = (threshold_updates[j] * ETA_MINUS).max(DELTA_MIN);
                    threshold_derivatives[j] = 0.0;
                } else {
                    neuron.threshold -= sign(threshold_derivatives[j]) * threshold_updates[j];
                    threshold_previous[j] = threshold_derivatives[j];
                }
            }
        }
    }
}

impl SupervisedLearning for ResilientBackPropagation<'_> {
    fn run(&mut self, input: &[f64], output: &[f64]) -> f64 {
        self.reset_gradient();

        self.network.compute(input);
        let error = self.calculate_error(output);
        self.calculate_gradient(input);
        self.update_network();

        error
    }

    fn run_epoch(&mut self, inputs: &[Vec<f64>], outputs: &[Vec<f64>]) -> f64 {
        self.reset_gradient();

        let mut error = 0.0;
        for (input, output) in inputs.iter().zip(outputs) {
            self.network.compute(input);
            error += self.calculate_error(output);
            self.calculate_gradient(input);
        }

        self.update_network();

        error
    }
}

// ============================================================================
// Tests
// ============================================================================
