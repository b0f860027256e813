//! Real-valued chromosome with injected value generators.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::genetic::Chromosome;
use crate::random::SharedGenerator;

/// Chromosome represented by an array of `f64` genes.
///
/// Gene values come from three injected
/// [generators](crate::random::RandomGenerator):
///
/// - the **chromosome generator** initializes genes in
///   [`generate`](Chromosome::generate);
/// - the **mutation multiplier generator** scales a gene during
///   multiplicative mutation;
/// - the **mutation addition generator** shifts a gene during additive
///   mutation.
///
/// The [`mutation_balancer`](Self::set_mutation_balancer) picks between
/// the two mutation kinds, and the
/// [`crossover_balancer`](Self::set_crossover_balancer) picks between
/// single-point and arithmetic crossover.
#[derive(Clone)]
pub struct DoubleArrayChromosome {
    genes: Vec<f64>,
    fitness: f64,
    chromosome_generator: SharedGenerator,
    mutation_multiplier_generator: SharedGenerator,
    mutation_addition_generator: SharedGenerator,
    mutation_balancer: f64,
    crossover_balancer: f64,
}

impl DoubleArrayChromosome {
    /// Maximum chromosome length in genes.
    pub const MAX_LENGTH: usize = 65_536;

    /// Creates a randomly initialized chromosome of `length` genes
    /// (clamped to `[2, 65536]`), drawn from `chromosome_generator`.
    pub fn new(
        chromosome_generator: SharedGenerator,
        mutation_multiplier_generator: SharedGenerator,
        mutation_addition_generator: SharedGenerator,
        length: usize,
    ) -> Self {
        let mut chromosome = Self {
            genes: vec![0.0; length.clamp(2, Self::MAX_LENGTH)],
            fitness: 0.0,
            chromosome_generator,
            mutation_multiplier_generator,
            mutation_addition_generator,
            mutation_balancer: 0.5,
            crossover_balancer: 0.5,
        };
        chromosome.regenerate();
        chromosome
    }

    /// Creates a chromosome from explicit gene values.
    ///
    /// # Panics
    /// Panics if `values.len()` is outside `[2, 65536]`.
    pub fn from_values(
        chromosome_generator: SharedGenerator,
        mutation_multiplier_generator: SharedGenerator,
        mutation_addition_generator: SharedGenerator,
        values: &[f64],
    ) -> Self {
        assert!(
            (2..=Self::MAX_LENGTH).contains(&values.len()),
            "invalid length of values array"
        );
        Self {
            genes: values.to_vec(),
            fitness: 0.0,
            chromosome_generator,
            mutation_multiplier_generator,
            mutation_addition_generator,
            mutation_balancer: 0.5,
            crossover_balancer: 0.5,
        }
    }

    /// Chromosome's length in genes.
    pub fn length(&self) -> usize {
        self.genes.len()
    }

    /// Current gene values.
    pub fn value(&self) -> &[f64] {
        &self.genes
    }

    /// Probability of multiplicative (vs additive) mutation, `[0, 1]`.
    pub fn mutation_balancer(&self) -> f64 {
        self.mutation_balancer
    }

    /// Sets the mutation balancer.
    pub fn set_mutation_balancer(&mut self, balancer: f64) {
        self.mutation_balancer = balancer.clamp(0.0, 1.0);
    }

    /// Probability of single-point (vs arithmetic) crossover, `[0, 1]`.
    pub fn crossover_balancer(&self) -> f64 {
        self.crossover_balancer
    }

    /// Sets the crossover balancer.
    pub fn set_crossover_balancer(&mut self, balancer: f64) {
        self.crossover_balancer = balancer.clamp(0.0, 1.0);
    }

    fn regenerate(&mut self) {
        let mut generator = self
            .chromosome_generator
            .lock()
            .expect("chromosome generator lock");
        for gene in &mut self.genes {
            *gene = generator.next() as f64;
        }
    }
}

impl fmt::Debug for DoubleArrayChromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleArrayChromosome")
            .field("genes", &self.genes)
            .field("fitness", &self.fitness)
            .field("mutation_balancer", &self.mutation_balancer)
            .field("crossover_balancer", &self.crossover_balancer)
            .finish()
    }
}

impl fmt::Display for DoubleArrayChromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{gene}")?;
        }
        Ok(())
    }
}

impl Chromosome for DoubleArrayChromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    fn generate(&mut self, _rng: &mut dyn RngCore) {
        self.regenerate();
    }

    fn create_new(&self, _rng: &mut dyn RngCore) -> Box<dyn Chromosome> {
        Box::new(Self::new(
            Arc::clone(&self.chromosome_generator),
            Arc::clone(&self.mutation_multiplier_generator),
            Arc::clone(&self.mutation_addition_generator),
            self.genes.len(),
        ))
    }

    fn clone_box(&self) -> Box<dyn Chromosome> {
        Box::new(self.clone())
    }

    /// Mutates one random gene: multiplied by a draw from the multiplier
    /// generator with probability `mutation_balancer`, otherwise shifted
    /// by a draw from the addition generator.
    fn mutate(&mut self, rng: &mut dyn RngCore) {
        let gene = rng.random_range(0..self.genes.len());

        if rng.random::<f64>() < self.mutation_balancer {
            let multiplier = self
                .mutation_multiplier_generator
                .lock()
                .expect("mutation multiplier generator lock")
                .next() as f64;
            self.genes[gene] *= multiplier;
        } else {
            let addition = self
                .mutation_addition_generator
                .lock()
                .expect("mutation addition generator lock")
                .next() as f64;
            self.genes[gene] += addition;
        }
    }

    /// With probability `crossover_balancer`, single-point crossover
    /// (the gene suffix after a random split is exchanged). Otherwise
    /// arithmetic crossover: one random factor in `[0, 1]` with a random
    /// sign moves every gene pair toward or away from each other by
    /// `factor * (a - b)` — one child lands between the parents' values,
    /// the other just outside.
    fn crossover(&mut self, pair: &mut dyn Chromosome, rng: &mut dyn RngCore) {
        let Some(pair) = pair.as_any_mut().downcast_mut::<DoubleArrayChromosome>() else {
            return;
        };
        if pair.genes.len() != self.genes.len() {
            return;
        }

        if rng.random::<f64>() < self.crossover_balancer {
            let point = rng.random_range(1..self.genes.len());
            for i in point..self.genes.len() {
                std::mem::swap(&mut self.genes[i], &mut pair.genes[i]);
            }
        } else {
            let mut factor = rng.random::<f64>();
            if rng.random_range(0..2) == 0 {
                factor = -factor;
            }

            for (a, b) in self.genes.iter_mut().zip(pair.genes.iter_mut()) {
                let portion = (*a - *b) * factor;
                *a -= portion;
                *b += portion;
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Range;
    use crate::random::{create_rng, shared, StandardGenerator, UniformGenerator};

    fn generators() -> (SharedGenerator, SharedGenerator, SharedGenerator) {
        (
            shared(UniformGenerator::with_seed(Range::new(-1.0, 1.0), 1)),
            shared(StandardGenerator::with_seed(2)),
            shared(UniformGenerator::with_seed(Range::new(-0.5, 0.5), 3)),
        )
    }

    #[test]
    fn test_generate_uses_chromosome_generator_range() {
        let (cg, mmg, mag) = generators();
        let chromosome = DoubleArrayChromosome::new(cg, mmg, mag, 100);
        assert!(chromosome.value().iter().all(|g| (-1.0..=1.0).contains(g)));
    }

    #[test]
    fn test_sibling_chromosomes_differ() {
        let (cg, mmg, mag) = generators();
        let mut rng = create_rng(42);
        let first = DoubleArrayChromosome::new(
            Arc::clone(&cg),
            Arc::clone(&mmg),
            Arc::clone(&mag),
            10,
        );
        let second = first.create_new(&mut rng);
        // shared stream: the second chromosome continues where the first
        // stopped instead of replaying it
        assert_ne!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_mutate_changes_one_gene() {
        let (cg, mmg, mag) = generators();
        let mut rng = create_rng(42);
        let mut chromosome = DoubleArrayChromosome::new(cg, mmg, mag, 10);
        let before = chromosome.value().to_vec();
        chromosome.mutate(&mut rng);
        let changed = before
            .iter()
            .zip(chromosome.value())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed <= 1, "mutation touched {changed} genes");
    }

    #[test]
    fn test_arithmetic_crossover_preserves_pair_sum() {
        let (cg, mmg, mag) = generators();
        let mut rng = create_rng(42);
        let mut a = DoubleArrayChromosome::new(
            Arc::clone(&cg),
            Arc::clone(&mmg),
            Arc::clone(&mag),
            8,
        );
        let mut b = DoubleArrayChromosome::new(cg, mmg, mag, 8);
        // force the arithmetic branch
        a.set_crossover_balancer(0.0);

        let sums: Vec<f64> = a
            .value()
            .iter()
            .zip(b.value())
            .map(|(x, y)| x + y)
            .collect();
        a.crossover(&mut b, &mut rng);
        for (i, sum) in sums.iter().enumerate() {
            let after = a.value()[i] + b.value()[i];
            assert!(
                (sum - after).abs() < 1e-12,
                "gene {i}: pair sum changed from {sum} to {after}"
            );
        }
    }

    #[test]
    fn test_single_point_crossover_swaps_suffix() {
        let (cg, mmg, mag) = generators();
        let mut rng = create_rng(42);
        let mut a = DoubleArrayChromosome::new(
            Arc::clone(&cg),
            Arc::clone(&mmg),
            Arc::clone(&mag),
            8,
        );
        let mut b = DoubleArrayChromosome::new(cg, mmg, mag, 8);
        a.set_crossover_balancer(1.0);

        let (before_a, before_b) = (a.value().to_vec(), b.value().to_vec());
        a.crossover(&mut b, &mut rng);

        let n = before_a.len();
        let point = (0..n).find(|&i| a.value()[i] != before_a[i]).unwrap_or(n);
        assert_eq!(&a.value()[point..], &before_b[point..]);
        assert_eq!(&b.value()[point..], &before_a[point..]);
    }

    #[test]
    fn test_from_values_copies_genes() {
        let (cg, mmg, mag) = generators();
        let values = [1.0, 2.0, 3.0];
        let chromosome = DoubleArrayChromosome::from_values(cg, mmg, mag, &values);
        assert_eq!(chromosome.value(), &values);
    }

    #[test]
    #[should_panic(expected = "invalid length of values array")]
    fn test_from_values_rejects_short_array() {
        let (cg, mmg, mag) = generators();
        DoubleArrayChromosome::from_values(cg, mmg, mag, &[1.0]);
    }
}
