//! Kohonen self-organizing map learning.

use crate::neuro::learning::UnsupervisedLearning;
use crate::neuro::DistanceNetwork;

/// Kohonen self-organizing map (SOM) learning for
/// [`DistanceNetwork`]s whose neurons form a rectangular grid.
///
/// Each iteration finds the winner neuron (minimum distance to the
/// input) and pulls weights toward the input. With a zero learning
/// radius only the winner moves; otherwise every neuron moves, scaled by
/// the Gaussian neighborhood factor `exp(-(dx² + dy²) / (2r²))` over
/// grid coordinates derived from the flat neuron index
/// (`x = index % width`, `y = index / width`).
///
/// Shrink the learning rate and radius between epochs so the map can
/// settle into a steady state.
pub struct SomLearning<'a> {
    network: &'a mut DistanceNetwork,
    width: usize,
    height: usize,

    learning_rate: f64,
    learning_radius: f64,
    // 2r², cached for the neighborhood factor
    squared_radius2: f64,
}

impl<'a> SomLearning<'a> {
    /// Creates a trainer for a square map, inferring the side length
    /// from the neuron count.
    ///
    /// # Panics
    /// Panics if the network's neuron count is not a perfect square.
    pub fn new(network: &'a mut DistanceNetwork) -> Self {
        let neurons_count = network.layer.neurons.len();
        let width = (neurons_count as f64).sqrt() as usize;
        assert_eq!(width * width, neurons_count, "invalid network size");

        Self::with_shape(network, width, width)
    }

    /// Creates a trainer for a rectangular `width × height` map.
    ///
    /// # Panics
    /// Panics if the network's neuron count differs from
    /// `width * height`.
    pub fn with_shape(network: &'a mut DistanceNetwork, width: usize, height: usize) -> Self {
        assert_eq!(
            network.layer.neurons.len(),
            width * height,
            "invalid network size"
        );

        let learning_radius = 7.0;
        Self {
            network,
            width,
            height,
            learning_rate: 0.1,
            learning_radius,
            squared_radius2: 2.0 * learning_radius * learning_radius,
        }
    }

    /// Map width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Map height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Learning rate, `[0, 1]`. Default 0.1.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Sets the learning rate (clamped to `[0, 1]`).
    pub fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate.clamp(0.0, 1.0);
    }

    /// Learning radius: how far around the winner updates reach.
    /// Zero updates the winner only. Default 7.
    pub fn learning_radius(&self) -> f64 {
        self.learning_radius
    }

    /// Sets the learning radius.
    pub fn set_learning_radius(&mut self, radius: f64) {
        self.learning_radius = radius;
        self.squared_radius2 = 2.0 * radius * radius;
    }
}

impl UnsupervisedLearning for SomLearning<'_> {
    fn run(&mut self, input: &[f64]) -> f64 {
        let mut error = 0.0;

        self.network.compute(input);
        let winner = self.network.winner();

        let layer = &mut self.network.layer;

        if self.learning_radius == 0.0 {
            // update the winner only
            let neuron = &mut layer.neurons[winner];
            for (weight, x) in neuron.weights.iter_mut().zip(input) {
                let e = x - *weight;
                error += e.abs();
                *weight += e * self.learning_rate;
            }
        } else {
            let winner_x = (winner % self.width) as isize;
            let winner_y = (winner / self.width) as isize;

            for (j, neuron) in layer.neurons.iter_mut().enumerate() {
                let dx = (j % self.width) as isize - winner_x;
                let dy = (j / self.width) as isize - winner_y;

                let factor = (-((dx * dx + dy * dy) as f64) / self.squared_radius2).exp();

                for (weight, x) in neuron.weights.iter_mut().zip(input) {
                    let e = (x - *weight) * factor;
                    error += e.abs();
                    *weight += e * self.learning_rate;
                }
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
