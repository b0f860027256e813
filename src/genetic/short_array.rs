//! Short-array chromosome: a bounded `u16` gene array.

use std::any::Any;
use std::fmt;

use rand::{Rng, RngCore};

use crate::genetic::Chromosome;

/// Chromosome represented by an array of `u16` genes, each bounded by a
/// configurable maximum. Length is clamped to `[2, 32767]`.
#[derive(Debug, Clone)]
pub struct ShortArrayChromosome {
    genes: Vec<u16>,
    max_value: u16,
    fitness: f64,
}

impl ShortArrayChromosome {
    /// Maximum chromosome length in genes.
    pub const MAX_LENGTH: usize = 32_767;

    /// Creates a randomly initialized chromosome with genes in
    /// `[0, 32767]`.
    pub fn new<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self::with_max_value(length, i16::MAX as u16, rng)
    }

    /// Creates a randomly initialized chromosome with genes in
    /// `[0, max_value]` (`max_value` clamped to `[1, 32767]`).
    pub fn with_max_value<R: Rng + ?Sized>(length: usize, max_value: u16, rng: &mut R) -> Self {
        let mut chromosome = Self {
            genes: vec![0; length.clamp(2, Self::MAX_LENGTH)],
            max_value: max_value.clamp(1, i16::MAX as u16),
            fitness: 0.0,
        };
        chromosome.regenerate(rng);
        chromosome
    }

    /// Chromosome's length in genes.
    pub fn length(&self) -> usize {
        self.genes.len()
    }

    /// Current gene values.
    pub fn value(&self) -> &[u16] {
        &self.genes
    }

    /// Maximum possible value of a single gene.
    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for gene in &mut self.genes {
            *gene = rng.random_range(0..=self.max_value);
        }
    }
}

impl fmt::Display for ShortArrayChromosome {
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

impl Chromosome for ShortArrayChromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    fn generate(&mut self, rng: &mut dyn RngCore) {
        self.regenerate(rng);
    }

    fn create_new(&self, rng: &mut dyn RngCore) -> Box<dyn Chromosome> {
        Box::new(Self::with_max_value(self.genes.len(), self.max_value, rng))
    }

    fn clone_box(&self) -> Box<dyn Chromosome> {
        Box::new(self.clone())
    }

    /// Replaces one random gene with a fresh random value.
    fn mutate(&mut self, rng: &mut dyn RngCore) {
        let i = rng.random_range(0..self.genes.len());
        self.genes[i] = rng.random_range(0..=self.max_value);
    }

    /// Single-point crossover: both chromosomes exchange the gene suffix
    /// starting at a random split point.
    fn crossover(&mut self, pair: &mut dyn Chromosome, rng: &mut dyn RngCore) {
        let Some(pair) = pair.as_any_mut().downcast_mut::<ShortArrayChromosome>() else {
            return;
        };
        if pair.genes.len() != self.genes.len() {
            return;
        }

        let point = rng.random_range(1..self.genes.len());
        for i in point..self.genes.len() {
            std::mem::swap(&mut self.genes[i], &mut pair.genes[i]);
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
    use crate::random::create_rng;

    #[test]
    fn test_genes_respect_max_value() {
        let mut rng = create_rng(42);
        let chromosome = ShortArrayChromosome::with_max_value(50, 10, &mut rng);
        assert!(chromosome.value().iter().all(|&g| g <= 10));
    }

    #[test]
    fn test_mutate_changes_at_most_one_gene() {
        let mut rng = create_rng(42);
        let mut chromosome = ShortArrayChromosome::new(20, &mut rng);
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
    fn test_crossover_swaps_suffix() {
        let mut rng = create_rng(42);
        let mut a = ShortArrayChromosome::with_max_value(10, 100, &mut rng);
        let mut b = ShortArrayChromosome::with_max_value(10, 100, &mut rng);
        let (before_a, before_b) = (a.value().to_vec(), b.value().to_vec());

        a.crossover(&mut b, &mut rng);

        // some split point must exist where prefix is original and
        // suffix is exchanged
        let n = before_a.len();
        let point = (0..n)
            .find(|&i| a.value()[i] != before_a[i])
            .unwrap_or(n);
        assert_eq!(&a.value()[..point], &before_a[..point]);
        assert_eq!(&a.value()[point..], &before_b[point..]);
        assert_eq!(&b.value()[point..], &before_a[point..]);
    }

    #[test]
    fn test_crossover_length_mismatch_is_noop() {
        let mut rng = create_rng(42);
        let mut a = ShortArrayChromosome::new(5, &mut rng);
        let mut b = ShortArrayChromosome::new(6, &mut rng);
        let before = a.value().to_vec();
        a.crossover(&mut b, &mut rng);
        assert_eq!(a.value(), before.as_slice());
    }

    #[test]
    fn test_display_space_joined() {
        let mut rng = create_rng(42);
        let chromosome = ShortArrayChromosome::with_max_value(4, 9, &mut rng);
        let text = chromosome.to_string();
        assert_eq!(text.split(' ').count(), 4);
    }

    #[test]
    fn test_length_clamped() {
        let mut rng = create_rng(42);
        assert_eq!(ShortArrayChromosome::new(0, &mut rng).length(), 2);
    }
}
