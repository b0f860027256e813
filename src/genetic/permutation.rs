//! Permutation chromosome: genes form a bijection onto `0..length`.

use std::any::Any;
use std::fmt;

use rand::{Rng, RngCore};

use crate::genetic::Chromosome;

/// Chromosome whose `u16` genes are always a permutation of
/// `0..length`: every value unique, every value below the length.
///
/// Mutation swaps two positions; crossover is an order crossover that
/// walks successor chains from both parents, so children stay valid
/// permutations.
#[derive(Debug, Clone)]
pub struct PermutationChromosome {
    genes: Vec<u16>,
    fitness: f64,
}

impl PermutationChromosome {
    /// Creates a randomly initialized permutation of `0..length`
    /// (length clamped to at least 2).
    pub fn new<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        let mut chromosome = Self {
            genes: vec![0; length.max(2)],
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

    /// Ascending sequence shuffled by `length / 2` random swaps.
    fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let length = self.genes.len();
        for (i, gene) in self.genes.iter_mut().enumerate() {
            *gene = i as u16;
        }
        for _ in 0..length / 2 {
            let j1 = rng.random_range(0..length);
            let j2 = rng.random_range(0..length);
            self.genes.swap(j1, j2);
        }
    }

    /// Builds one child by walking successor chains of both parents:
    /// starting from `parent2`'s first gene, each step takes the gene
    /// following the previous one in either parent (random choice when
    /// both are unused, linear scan for a free gene when neither is).
    fn create_child<R: Rng + ?Sized>(parent1: &[u16], parent2: &[u16], rng: &mut R) -> Vec<u16> {
        let length = parent1.len();
        let index1 = index_dictionary(parent1);
        let index2 = index_dictionary(parent2);

        let mut busy = vec![false; length];
        let mut child = vec![0u16; length];
        let last = length - 1;

        let mut prev = parent2[0];
        child[0] = prev;
        busy[prev as usize] = true;

        for slot in child.iter_mut().skip(1) {
            // the gene following `prev` in each parent's cycle
            let j1 = index1[prev as usize] as usize;
            let next1 = if j1 == last { parent1[0] } else { parent1[j1 + 1] };
            let j2 = index2[prev as usize] as usize;
            let next2 = if j2 == last { parent2[0] } else { parent2[j2 + 1] };

            let valid1 = !busy[next1 as usize];
            let valid2 = !busy[next2 as usize];

            prev = if valid1 && valid2 {
                if rng.random_range(0..2) == 0 {
                    next1
                } else {
                    next2
                }
            } else if !valid1 && !valid2 {
                // both successors taken: scan up from a random start,
                // then down; some gene is always free here
                let start = rng.random_range(0..length);
                let mut r = start;
                while r < length && busy[r] {
                    r += 1;
                }
                if r == length {
                    r = start - 1;
                    while busy[r] {
                        r -= 1;
                    }
                }
                r as u16
            } else if valid1 {
                next1
            } else {
                next2
            };

            *slot = prev;
            busy[prev as usize] = true;
        }

        child
    }
}

/// Maps each gene value to its position for O(1) successor lookup.
fn index_dictionary(genes: &[u16]) -> Vec<u16> {
    let mut index = vec![0u16; genes.len()];
    for (i, &gene) in genes.iter().enumerate() {
        index[gene as usize] = i as u16;
    }
    index
}

impl fmt::Display for PermutationChromosome {
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

impl Chromosome for PermutationChromosome {
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
        Box::new(Self::new(self.genes.len(), rng))
    }

    fn clone_box(&self) -> Box<dyn Chromosome> {
        Box::new(self.clone())
    }

    /// Swaps two random positions.
    fn mutate(&mut self, rng: &mut dyn RngCore) {
        let j1 = rng.random_range(0..self.genes.len());
        let j2 = rng.random_range(0..self.genes.len());
        self.genes.swap(j1, j2);
    }

    /// Order crossover: both parents are replaced by successor-chain
    /// children, each a valid permutation.
    fn crossover(&mut self, pair: &mut dyn Chromosome, rng: &mut dyn RngCore) {
        let Some(pair) = pair.as_any_mut().downcast_mut::<PermutationChromosome>() else {
            return;
        };
        if pair.genes.len() != self.genes.len() {
            return;
        }

        let child1 = Self::create_child(&self.genes, &pair.genes, rng);
        let child2 = Self::create_child(&pair.genes, &self.genes, rng);

        self.genes = child1;
        pair.genes = child2;
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
    use proptest::prelude::*;

    fn is_valid_permutation(genes: &[u16]) -> bool {
        let n = genes.len();
        let mut seen = vec![false; n];
        for &gene in genes {
            if gene as usize >= n || seen[gene as usize] {
                return false;
            }
            seen[gene as usize] = true;
        }
        true
    }

    #[test]
    fn test_generate_produces_permutation() {
        let mut rng = create_rng(42);
        for length in [2, 3, 10, 100] {
            for _ in 0..20 {
                let chromosome = PermutationChromosome::new(length, &mut rng);
                assert!(
                    is_valid_permutation(chromosome.value()),
                    "invalid permutation: {chromosome}"
                );
            }
        }
    }

    #[test]
    fn test_mutate_preserves_permutation() {
        let mut rng = create_rng(42);
        let mut chromosome = PermutationChromosome::new(12, &mut rng);
        for _ in 0..200 {
            chromosome.mutate(&mut rng);
            assert!(is_valid_permutation(chromosome.value()));
        }
    }

    #[test]
    fn test_crossover_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut a = PermutationChromosome::new(10, &mut rng);
            let mut b = PermutationChromosome::new(10, &mut rng);
            a.crossover(&mut b, &mut rng);
            assert!(is_valid_permutation(a.value()), "child1 invalid: {a}");
            assert!(is_valid_permutation(b.value()), "child2 invalid: {b}");
        }
    }

    #[test]
    fn test_crossover_length_mismatch_is_noop() {
        let mut rng = create_rng(42);
        let mut a = PermutationChromosome::new(5, &mut rng);
        let mut b = PermutationChromosome::new(8, &mut rng);
        let before = a.value().to_vec();
        a.crossover(&mut b, &mut rng);
        assert_eq!(a.value(), before.as_slice());
    }

    proptest! {
        #[test]
        fn prop_operators_preserve_permutation(
            length in 2usize..64,
            seed in 0u64..1000,
            mutations in 0usize..8,
        ) {
            let mut rng = create_rng(seed);
            let mut a = PermutationChromosome::new(length, &mut rng);
            let mut b = PermutationChromosome::new(length, &mut rng);

            for _ in 0..mutations {
                a.mutate(&mut rng);
                b.mutate(&mut rng);
            }
            a.crossover(&mut b, &mut rng);

            prop_assert!(is_valid_permutation(a.value()));
            prop_assert!(is_valid_permutation(b.value()));
        }
    }
}
