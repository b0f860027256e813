//! Elastic network learning.

use crate::neuro::learning::UnsupervisedLearning;
use crate::neuro::DistanceNetwork;

/// Elastic network learning for [`DistanceNetwork`]s whose neurons form
/// a closed ring (the classic elastic-net setup for tours and contours).
///
/// Squared chord distances between ring positions are precomputed at
/// construction, indexed by `|neuron - winner|` on a ring of diameter 1.
/// Each iteration pulls every neuron toward the input, scaled by the
/// Gaussian factor `exp(-distance / (2r²))`.
pub struct ElasticLearning<'a> {
    network: &'a mut DistanceNetwork,
    // squared chord distance per ring offset
    distance: Vec<f64>,

    learning_rate: f64,
    learning_radius: f64,
    // 2r², cached for the update factor
    squared_radius2: f64,
}

impl<'a> ElasticLearning<'a> {
    /// Creates a trainer for the given network.
    pub fn new(network: &'a mut DistanceNetwork) -> Self {
        let neurons_count = network.layer.neurons.len();
        let delta_alpha = std::f64::consts::PI * 2.0 / neurons_count as f64;

        // squared distances between ring positions, diameter 1
        let mut distance = vec![0.0; neurons_count];
        let mut alpha = delta_alpha;
        for entry in distance.iter_mut().skip(1) {
            let dx = 0.5 * alpha.cos() - 0.5;
            let dy = 0.5 * alpha.sin();
            *entry = dx * dx + dy * dy;
            alpha += delta_alpha;
        }

        let learning_radius = 0.5;
        Self {
            network,
            distance,
            learning_rate: 0.1,
            learning_radius,
            squared_radius2: 2.0 * learning_radius * learning_radius,
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

    /// Learning radius on the ring. Default 0.5.
    pub fn learning_radius(&self) -> f64 {
        self.learning_radius
    }

    /// Sets the learning radius.
    pub fn set_learning_radius(&mut self, radius: f64) {
        self.learning_radius = radius;
        self.squared_radius2 = 2.0 * radius * radius;
    }
}

impl UnsupervisedLearning for ElasticLearning<'_> {
    fn run(&mut self, input: &[f64]) -> f64 {
        let mut error = 0.0;

        self.network.compute(input);
        let winner = self.network.winner();

        let layer = &mut self.network.layer;

        for (j, neuron) in layer.neurons.iter_mut().enumerate() {
            let offset = j.abs_diff(winner);
            let factor = (-self.distance[offset] / self.squared_radius2).exp();

            for (weight, x) in neuron.weights.iter_mut().zip(input) {
                let e = (x - *weight) * factor;
                error += e.abs();
                *weight += e * self.learning_rate;
            }
        }

        error
    }

    fn run_epoch(&mut self, inputs: &[Vec<f64>]) -> f64 {
        inputs.iter().map(|input| self.run(input)).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================
