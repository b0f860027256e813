//! Fitness functions.
//!
//! A [`FitnessFunction`] maps a chromosome to a positive quality value —
//! the greater the value, the better the solution. Besides the trait,
//! this module provides four ready-made functions: binary-chromosome
//! function optimization in one and two dimensions, and two
//! expression-based functions (symbolic regression and time-series
//! prediction) that evaluate a chromosome's `Display` form in postfix
//! polish notation.

use crate::core::{polish, Range};
use crate::genetic::{BinaryChromosome, Chromosome};

/// Maps a chromosome to a positive fitness value; higher is better.
pub trait FitnessFunction: Send {
    /// Evaluates the chromosome's usefulness.
    fn evaluate(&mut self, chromosome: &dyn Chromosome) -> f64;
}

/// Whether the optimization target is the function's maximum or minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationMode {
    /// Search for the function's maximum; fitness is the function value.
    Maximization,
    /// Search for the function's minimum; fitness is the reciprocal of
    /// the function value.
    Minimization,
}

/// Fitness for optimizing a one-dimensional function over a [`Range`],
/// encoded as a [`BinaryChromosome`].
///
/// The chromosome's integer value is mapped linearly onto the range.
pub struct OptimizationFunction1D {
    function: Box<dyn Fn(f64) -> f64 + Send>,
    range: Range,
    mode: OptimizationMode,
}

impl OptimizationFunction1D {
    /// Creates a maximization fitness for `function` over `range`.
    pub fn new<F>(range: Range, function: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + 'static,
    {
        Self {
            function: Box::new(function),
            range,
            mode: OptimizationMode::Maximization,
        }
    }

    /// Optimization mode.
    pub fn mode(&self) -> OptimizationMode {
        self.mode
    }

    /// Sets the optimization mode.
    pub fn set_mode(&mut self, mode: OptimizationMode) {
        self.mode = mode;
    }

    /// Translates a binary chromosome's value into the function's domain.
    ///
    /// # Panics
    /// Panics if `chromosome` is not a [`BinaryChromosome`].
    pub fn translate(&self, chromosome: &dyn Chromosome) -> f64 {
        let binary = chromosome
            .as_any()
            .downcast_ref::<BinaryChromosome>()
            .expect("binary chromosome expected");
        let max = binary.max_value() as f64;
        binary.value() as f64 * self.range.length() as f64 / max + self.range.min() as f64
    }
}

impl FitnessFunction for OptimizationFunction1D {
    fn evaluate(&mut self, chromosome: &dyn Chromosome) -> f64 {
        let value = (self.function)(self.translate(chromosome));
        match self.mode {
            OptimizationMode::Maximization => value,
            OptimizationMode::Minimization => 1.0 / value,
        }
    }
}

/// Fitness for optimizing a two-dimensional function, encoded as a
/// [`BinaryChromosome`] whose low half carries X and high half carries Y.
pub struct OptimizationFunction2D {
    function: Box<dyn Fn(f64, f64) -> f64 + Send>,
    range_x: Range,
    range_y: Range,
    mode: OptimizationMode,
}

impl OptimizationFunction2D {
    /// Creates a maximization fitness for `function` over the two ranges.
    pub fn new<F>(range_x: Range, range_y: Range, function: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + 'static,
    {
        Self {
            function: Box::new(function),
            range_x,
            range_y,
            mode: OptimizationMode::Maximization,
        }
    }

    /// Optimization mode.
    pub fn mode(&self) -> OptimizationMode {
        self.mode
    }

    /// Sets the optimization mode.
    pub fn set_mode(&mut self, mode: OptimizationMode) {
        self.mode = mode;
    }

    /// Splits a binary chromosome into `(x, y)` coordinates.
    ///
    /// # Panics
    /// Panics if `chromosome` is not a [`BinaryChromosome`].
    pub fn translate(&self, chromosome: &dyn Chromosome) -> (f64, f64) {
        let binary = chromosome
            .as_any()
            .downcast_ref::<BinaryChromosome>()
            .expect("binary chromosome expected");

        let length = binary.length();
        let x_length = length / 2;
        let y_length = length - x_length;
        let x_max = (u64::MAX >> (64 - x_length)) as f64;
        let y_max = (u64::MAX >> (64 - y_length)) as f64;

        let value = binary.value();
        let x_part = (value & (u64::MAX >> (64 - x_length))) as f64;
        let y_part = (value >> x_length) as f64;

        (
            x_part * self.range_x.length() as f64 / x_max + self.range_x.min() as f64,
            y_part * self.range_y.length() as f64 / y_max + self.range_y.min() as f64,
        )
    }
}

impl FitnessFunction for OptimizationFunction2D {
    fn evaluate(&mut self, chromosome: &dyn Chromosome) -> f64 {
        let (x, y) = self.translate(chromosome);
        let value = (self.function)(x, y);
        match self.mode {
            OptimizationMode::Maximization => value,
            OptimizationMode::Minimization => 1.0 / value,
        }
    }
}

/// Fitness for symbolic regression: how well a chromosome's polish
/// expression approximates a set of `(x, y)` data points.
///
/// Variable `$0` is the current X value; `$1` onward are user constants.
/// A non-finite result or an evaluation failure yields fitness `0`
/// (worst), keeping the genetic loop alive despite malformed
/// expressions.
pub struct SymbolicRegressionFitness {
    data: Vec<(f64, f64)>,
    variables: Vec<f64>,
}

impl SymbolicRegressionFitness {
    /// Creates a fitness over `data` with the given constant table.
    pub fn new(data: Vec<(f64, f64)>, constants: &[f64]) -> Self {
        let mut variables = vec![0.0; constants.len() + 1];
        variables[1..].copy_from_slice(constants);
        Self { data, variables }
    }
}

impl FitnessFunction for SymbolicRegressionFitness {
    fn evaluate(&mut self, chromosome: &dyn Chromosome) -> f64 {
        let function = chromosome.to_string();

        let mut error = 0.0;
        for &(x, y) in &self.data {
            self.variables[0] = x;
            match polish::evaluate(&function, &self.variables) {
                Ok(value) if value.is_nan() => return 0.0,
                Ok(value) => error += (value - y).abs(),
                Err(_) => return 0.0,
            }
        }

        100.0 / (error + 1.0)
    }
}

/// Fitness for time-series prediction: a chromosome's polish expression
/// predicts the next value of a series from a sliding window of past
/// values.
///
/// Variables `$0..$window` are the window values, most recent first;
/// the remaining variables are user constants. The last
/// `prediction_size` points are held out of evaluation. Non-finite or
/// failed evaluation yields fitness `0`.
pub struct TimeSeriesPredictionFitness {
    data: Vec<f64>,
    variables: Vec<f64>,
    window_size: usize,
    prediction_size: usize,
}

impl TimeSeriesPredictionFitness {
    /// Creates a fitness over the series `data`.
    ///
    /// # Panics
    /// Panics if the window does not fit the series: `window_size >=
    /// data.len()`, or fewer than one sample remains after the window
    /// and prediction intervals.
    pub fn new(
        data: Vec<f64>,
        window_size: usize,
        prediction_size: usize,
        constants: &[f64],
    ) -> Self {
        assert!(
            window_size < data.len(),
            "window size should be less than data amount"
        );
        assert!(
            data.len() - window_size > prediction_size,
            "data size should be enough for window and prediction"
        );

        let mut variables = vec![0.0; constants.len() + window_size];
        variables[window_size..].copy_from_slice(constants);
        Self {
            data,
            variables,
            window_size,
            prediction_size,
        }
    }
}

impl FitnessFunction for TimeSeriesPredictionFitness {
    fn evaluate(&mut self, chromosome: &dyn Chromosome) -> f64 {
        let function = chromosome.to_string();

        let mut error = 0.0;
        let n = self.data.len() - self.window_size - self.prediction_size;
        for i in 0..n {
            // window values, most recent first
            for j in 0..self.window_size {
                self.variables[j] = self.data[i + self.window_size - 1 - j];
            }

            match polish::evaluate(&function, &self.variables) {
                Ok(value) if value.is_nan() => return 0.0,
                Ok(value) => error += (value - self.data[i + self.window_size]).abs(),
                Err(_) => return 0.0,
            }
        }

        100.0 / (error + 1.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
