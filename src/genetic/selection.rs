//! Selection strategies.
//!
//! A [`SelectionMethod`] reduces a grown population back to a target
//! size. All strategies assume **maximization** (greater fitness is
//! better) and may keep several copies of the same member.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use rand::{Rng, RngCore};

use crate::genetic::Chromosome;

/// Reduces a chromosome list to a target size in place.
///
/// The policy — elitism, fitness-proportionate, rank-based — is left to
/// the strategy implementation.
pub trait SelectionMethod: Send {
    /// Selects `size` members of `chromosomes` into the new generation,
    /// replacing the list's contents.
    fn apply_selection(
        &mut self,
        chromosomes: &mut Vec<Box<dyn Chromosome>>,
        size: usize,
        rng: &mut dyn RngCore,
    );
}

/// Sorts members by fitness descending and keeps the best `size`.
///
/// Deterministic and strongly elitist: the population after selection is
/// ordered best first.
#[derive(Debug, Clone, Copy, Default)]
pub struct EliteSelection;

impl SelectionMethod for EliteSelection {
    fn apply_selection(
        &mut self,
        chromosomes: &mut Vec<Box<dyn Chromosome>>,
        size: usize,
        _rng: &mut dyn RngCore,
    ) {
        sort_by_fitness_descending(chromosomes);
        chromosomes.truncate(size);
    }
}

/// Fitness-proportionate (roulette wheel) selection.
///
/// Each spin picks a member with probability proportional to its share
/// of the total fitness. Susceptible to super-individual dominance when
/// fitness variance is high.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouletteWheelSelection;

impl SelectionMethod for RouletteWheelSelection {
    fn apply_selection(
        &mut self,
        chromosomes: &mut Vec<Box<dyn Chromosome>>,
        size: usize,
        rng: &mut dyn RngCore,
    ) {
        let fitness_sum: f64 = chromosomes.iter().map(|c| c.fitness()).sum();
        if fitness_sum <= 0.0 || !fitness_sum.is_finite() {
            // degenerate fitness landscape: keep a uniform random sample
            let new_population = (0..size)
                .map(|_| chromosomes[rng.random_range(0..chromosomes.len())].clone_box())
                .collect();
            *chromosomes = new_population;
            return;
        }

        let mut new_population = Vec::with_capacity(size);
        for _ in 0..size {
            let spin = rng.random::<f64>() * fitness_sum;
            let mut cumulative = 0.0;
            let mut selected = chromosomes.len() - 1;
            for (i, chromosome) in chromosomes.iter().enumerate() {
                cumulative += chromosome.fitness();
                if cumulative > spin {
                    selected = i;
                    break;
                }
            }
            new_population.push(chromosomes[selected].clone_box());
        }

        *chromosomes = new_population;
    }
}

/// Rank-based selection with a linear wheel.
///
/// Members are sorted by fitness descending; the wheel slice of the
/// member at rank `i` (0 = best) is proportional to `n - i`. Avoids the
/// scaling problems of raw fitness-proportionate selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankSelection;

impl SelectionMethod for RankSelection {
    fn apply_selection(
        &mut self,
        chromosomes: &mut Vec<Box<dyn Chromosome>>,
        size: usize,
        rng: &mut dyn RngCore,
    ) {
        sort_by_fitness_descending(chromosomes);

        let n = chromosomes.len();
        let total = (n * (n + 1)) as f64 / 2.0;

        let mut new_population = Vec::with_capacity(size);
        for _ in 0..size {
            let spin = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            let mut selected = n - 1;
            for (rank, _) in chromosomes.iter().enumerate() {
                cumulative += (n - rank) as f64;
                if cumulative > spin {
                    selected = rank;
                    break;
                }
            }
            new_population.push(chromosomes[selected].clone_box());
        }

        *chromosomes = new_population;
    }
}

/// Sorts greater fitness first; NaN fitness sorts last.
pub(crate) fn sort_by_fitness_descending(chromosomes: &mut [Box<dyn Chromosome>]) {
    chromosomes.sort_by(|a, b| {
        b.fitness()
            .partial_cmp(&a.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

// ============================================================================
// Tests
// ============================================================================
