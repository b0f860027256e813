//! Evolutionary (genetic) training of network weights.

use std::sync::Arc;

use crate::core::Range;
use crate::genetic::{
    Chromosome, DoubleArrayChromosome, EliteSelection, FitnessFunction, Population,
    SelectionMethod,
};
use crate::neuro::learning::SupervisedLearning;
use crate::neuro::ActivationNetwork;
use crate::random::{shared, ExponentialGenerator, SharedGenerator, UniformGenerator};

/// Fitness of a chromosome encoding a network's weights and thresholds.
///
/// Genes are written into the network in layer, then neuron, then
/// weights-then-threshold order; the fitness is the reciprocal of the
/// total squared error over all samples — `f64::MAX` when the error is
/// exactly zero.
///
/// The function owns a scratch copy of the network, so evaluation never
/// touches the network being trained.
pub struct EvolutionaryFitness {
    network: ActivationNetwork,
    inputs: Vec<Vec<f64>>,
    outputs: Vec<Vec<f64>>,
}

impl EvolutionaryFitness {
    /// Creates a fitness function bound to the given samples.
    ///
    /// # Panics
    /// Panics if the sample arrays are empty or of different lengths, or
    /// if the input vectors do not match the network's inputs count.
    pub fn new(network: ActivationNetwork, inputs: Vec<Vec<f64>>, outputs: Vec<Vec<f64>>) -> Self {
        assert!(
            !inputs.is_empty() && inputs.len() == outputs.len(),
            "length of inputs and outputs arrays must be equal and greater than 0"
        );
        assert_eq!(
            network.inputs_count(),
            inputs[0].len(),
            "length of each input vector must be equal to the network's inputs count"
        );

        Self {
            network,
            inputs,
            outputs,
        }
    }
}

impl FitnessFunction for EvolutionaryFitness {
    fn evaluate(&mut self, chromosome: &dyn Chromosome) -> f64 {
        let genes = chromosome
            .as_any()
            .downcast_ref::<DoubleArrayChromosome>()
            .expect("double-array chromosome expected")
            .value();

        copy_genes_into_network(genes, &mut self.network);

        let mut total_error = 0.0;
        for (input, output) in self.inputs.iter().zip(&self.outputs) {
            let computed = self.network.compute(input);
            for (desired, actual) in output.iter().zip(&computed) {
                let error = desired - actual;
                total_error += error * error;
            }
        }

        if total_error > 0.0 {
            return 1.0 / total_error;
        }

        // zero error is the best possible fitness
        f64::MAX
    }
}

/// Writes a flat gene vector into the network, layer by layer, each
/// neuron's weights followed by its threshold.
fn copy_genes_into_network(genes: &[f64], network: &mut ActivationNetwork) {
    let mut v = 0;
    for layer in &mut network.layers {
        for neuron in &mut layer.neurons {
            for weight in &mut neuron.weights {
                *weight = genes[v];
                v += 1;
            }
            neuron.threshold = genes[v];
            v += 1;
        }
    }
}

/// Counts the weights and thresholds of the network.
fn network_size(network: &ActivationNetwork) -> usize {
    network
        .layers
        .iter()
        .flat_map(|layer| &layer.neurons)
        .map(|neuron| neuron.weights.len() + 1)
        .sum()
}

/// Evolutionary training: the network's whole weight vector is encoded
/// as a [`DoubleArrayChromosome`] and a genetic [`Population`] searches
/// for weights that minimize the training error.
///
/// The population is created lazily on the first
/// [`run_epoch`](SupervisedLearning::run_epoch) call and is bound to the
/// samples given then; passing different samples to later epochs has no
/// effect. After each epoch the best chromosome's genes are written back
/// into the network.
///
/// [`run`](SupervisedLearning::run) is not supported: evolutionary
/// search is inherently population-level and needs the full sample set.
pub struct EvolutionaryLearning<'a> {
    network: &'a mut ActivationNetwork,
    weights_count: usize,

    population: Option<Population>,
    population_size: usize,

    chromosome_generator: SharedGenerator,
    mutation_multiplier_generator: SharedGenerator,
    mutation_addition_generator: SharedGenerator,
    // consumed when the population is built
    selection_method: Option<Box<dyn SelectionMethod>>,

    crossover_rate: f64,
    mutation_rate: f64,
    random_selection_rate: f64,
    seed: Option<u64>,
}

impl<'a> EvolutionaryLearning<'a> {
    /// Creates a trainer with the default search setup: elite selection,
    /// crossover rate 0.75, mutation rate 0.25, random injection 0.2;
    /// genes initialized uniformly in `[-1, 1]`, multiplicative mutation
    /// drawn from `Exponential(1)`, additive mutation uniform in
    /// `[-0.5, 0.5]`.
    pub fn new(network: &'a mut ActivationNetwork, population_size: usize) -> Self {
        Self::with_parameters(
            network,
            population_size,
            shared(UniformGenerator::new(Range::new(-1.0, 1.0))),
            shared(ExponentialGenerator::new(1.0)),
            shared(UniformGenerator::new(Range::new(-0.5, 0.5))),
            Box::new(EliteSelection),
            0.75,
            0.25,
            0.2,
        )
    }

    /// Creates a trainer with full control over the genetic search.
    #[allow(clippy::too_many_arguments)]
    pub fn with_parameters(
        network: &'a mut ActivationNetwork,
        population_size: usize,
        chromosome_generator: SharedGenerator,
        mutation_multiplier_generator: SharedGenerator,
        mutation_addition_generator: SharedGenerator,
        selection_method: Box<dyn SelectionMethod>,
        crossover_rate: f64,
        mutation_rate: f64,
        random_selection_rate: f64,
    ) -> Self {
        let weights_count = network_size(network);
        Self {
            network,
            weights_count,
            population: None,
            population_size,
            chromosome_generator,
            mutation_multiplier_generator,
            mutation_addition_generator,
            selection_method: Some(selection_method),
            crossover_rate,
            mutation_rate,
            random_selection_rate,
            seed: None,
        }
    }

    /// Seeds the population's random stream for reproducible runs. Only
    /// effective before the first epoch.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl SupervisedLearning for EvolutionaryLearning<'_> {
    /// Not supported: evolutionary search is global over the whole
    /// sample set.
    ///
    /// # Panics
    /// Always panics; use
    /// [`run_epoch`](SupervisedLearning::run_epoch) instead.
    fn run(&mut self, _input: &[f64], _output: &[f64]) -> f64 {
        unimplemented!("evolutionary learning works on whole epochs; use run_epoch")
    }

    fn run_epoch(&mut self, inputs: &[Vec<f64>], outputs: &[Vec<f64>]) -> f64 {
        // the first call binds the population to these samples
        if self.population.is_none() {
            let ancestor = Box::new(DoubleArrayChromosome::new(
                Arc::clone(&self.chromosome_generator),
                Arc::clone(&self.mutation_multiplier_generator),
                Arc::clone(&self.mutation_addition_generator),
                self.weights_count,
            ));
            let fitness = Box::new(EvolutionaryFitness::new(
                self.network.clone(),
                inputs.to_vec(),
                outputs.to_vec(),
            ));
            let selection = self
                .selection_method
                .take()
                .expect("selection method consumed only once");

            let mut population = match self.seed {
                Some(seed) => Population::with_seed(
                    self.population_size,
                    ancestor,
                    fitness,
                    selection,
                    seed,
                ),
                None => Population::new(self.population_size, ancestor, fitness, selection),
            };
            population.set_crossover_rate(self.crossover_rate);
            population.set_mutation_rate(self.mutation_rate);
            population.set_random_selection_portion(self.random_selection_rate);

            self.population = Some(population);
        }

        let population = self.population.as_mut().expect("population initialized");
        population.run_epoch();

        let best = population
            .best_chromosome()
            .expect("statistics computed by selection");
        let chromosome = best
            .as_any()
            .downcast_ref::<DoubleArrayChromosome>()
            .expect("population of double-array chromosomes");

        copy_genes_into_network(chromosome.value(), self.network);

        1.0 / chromosome.fitness()
    }
}

// ============================================================================
// Tests
// ============================================================================
