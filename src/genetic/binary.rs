//! Binary chromosome: up to 64 bits packed into a `u64`.

use std::any::Any;
use std::fmt;

use rand::{Rng, RngCore};

use crate::genetic::Chromosome;

/// Chromosome represented by a set of bits packed into a single `u64`.
///
/// The simplest chromosome type. Length is clamped to `[2, 64]`; the
/// value always fits into the low `length` bits.
#[derive(Debug, Clone)]
pub struct BinaryChromosome {
    length: usize,
    value: u64,
    fitness: f64,
}

impl BinaryChromosome {
    /// Maximum chromosome length in bits.
    pub const MAX_LENGTH: usize = 64;

    /// Creates a randomly initialized chromosome of `length` bits
    /// (clamped to `[2, 64]`).
    pub fn new<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        let mut chromosome = Self {
            length: length.clamp(2, Self::MAX_LENGTH),
            value: 0,
            fitness: 0.0,
        };
        chromosome.regenerate(rng);
        chromosome
    }

    /// Chromosome's length in bits.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Current numerical value of the chromosome.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Maximum value representable by a chromosome of this length:
    /// a mask of `length` low bits.
    pub fn max_value(&self) -> u64 {
        u64::MAX >> (64 - self.length)
    }

    fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.value = rng.random::<u64>() & self.max_value();
    }
}

impl fmt::Display for BinaryChromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.length)
    }
}

impl Chromosome for BinaryChromosome {
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
        Box::new(Self::new(self.length, rng))
    }

    fn clone_box(&self) -> Box<dyn Chromosome> {
        Box::new(self.clone())
    }

    /// Flips exactly one random bit.
    fn mutate(&mut self, rng: &mut dyn RngCore) {
        self.value ^= 1u64 << rng.random_range(0..self.length);
    }

    /// Single-point crossover: a random bit boundary splits both values,
    /// and the high parts are exchanged via bit masks.
    fn crossover(&mut self, pair: &mut dyn Chromosome, rng: &mut dyn RngCore) {
        let Some(pair) = pair.as_any_mut().downcast_mut::<BinaryChromosome>() else {
            return;
        };
        if pair.length != self.length {
            return;
        }

        // keep the low `low_bits` bits, exchange the rest
        let low_bits = rng.random_range(0..self.length - 1);
        let low_mask = (1u64 << low_bits) - 1;
        let high_mask = !low_mask;

        let v1 = self.value;
        let v2 = pair.value;
        self.value = (v1 & low_mask) | (v2 & high_mask);
        pair.value = (v2 & low_mask) | (v1 & high_mask);
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
    fn test_value_fits_length() {
        let mut rng = create_rng(42);
        for length in [2, 8, 32, 63, 64] {
            for _ in 0..50 {
                let chromosome = BinaryChromosome::new(length, &mut rng);
                assert!(
                    chromosome.value() <= chromosome.max_value(),
                    "length {length}: value {} exceeds {}",
                    chromosome.value(),
                    chromosome.max_value()
                );
            }
        }
    }

    #[test]
    fn test_length_clamped() {
        let mut rng = create_rng(42);
        assert_eq!(BinaryChromosome::new(1, &mut rng).length(), 2);
        assert_eq!(BinaryChromosome::new(100, &mut rng).length(), 64);
    }

    #[test]
    fn test_mutate_flips_exactly_one_bit() {
        let mut rng = create_rng(42);
        for length in [2, 16, 64] {
            let mut chromosome = BinaryChromosome::new(length, &mut rng);
            for _ in 0..100 {
                let before = chromosome.value();
                chromosome.mutate(&mut rng);
                let diff = before ^ chromosome.value();
                assert_eq!(diff.count_ones(), 1, "expected exactly one flipped bit");
                assert!(chromosome.value() <= chromosome.max_value());
            }
        }
    }

    #[test]
    fn test_crossover_preserves_bit_multiset() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut a = BinaryChromosome::new(16, &mut rng);
            let mut b = BinaryChromosome::new(16, &mut rng);
            let combined_before = a.value().count_ones() + b.value().count_ones();
            a.crossover(&mut b, &mut rng);
            let combined_after = a.value().count_ones() + b.value().count_ones();
            assert_eq!(combined_before, combined_after);
            assert!(a.value() <= a.max_value());
            assert!(b.value() <= b.max_value());
        }
    }

    #[test]
    fn test_crossover_length_mismatch_is_noop() {
        let mut rng = create_rng(42);
        let mut a = BinaryChromosome::new(8, &mut rng);
        let mut b = BinaryChromosome::new(16, &mut rng);
        let (va, vb) = (a.value(), b.value());
        a.crossover(&mut b, &mut rng);
        assert_eq!(a.value(), va);
        assert_eq!(b.value(), vb);
    }

    #[test]
    fn test_display_is_padded_bit_string() {
        let mut rng = create_rng(42);
        let chromosome = BinaryChromosome::new(8, &mut rng);
        let text = chromosome.to_string();
        assert_eq!(text.len(), 8);
        assert!(text.chars().all(|c| c == '0' || c == '1'));
    }

    #[test]
    fn test_clone_box_copies_fitness() {
        let mut rng = create_rng(42);
        let mut chromosome = BinaryChromosome::new(8, &mut rng);
        chromosome.set_fitness(3.5);
        let copy = chromosome.clone_box();
        assert_eq!(copy.fitness(), 3.5);
        assert_eq!(copy.to_string(), chromosome.to_string());
    }
}
