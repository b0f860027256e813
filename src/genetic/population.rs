//! Population life cycle.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::genetic::selection::sort_by_fitness_descending;
use crate::genetic::{Chromosome, FitnessFunction, SelectionMethod};
use crate::random::{create_rng, random_seed};

/// A collection of chromosomes evolving through crossover, mutation, and
/// selection.
///
/// The population grows temporarily while crossover and mutation append
/// offspring, and [`selection`](Self::selection) shrinks it back to the
/// configured size. One full cycle is [`run_epoch`](Self::run_epoch).
///
/// Statistics ([`fitness_max`](Self::fitness_max),
/// [`fitness_sum`](Self::fitness_sum), [`fitness_avg`](Self::fitness_avg),
/// [`best_chromosome`](Self::best_chromosome)) are recomputed only by
/// [`selection`](Self::selection), [`migrate`](Self::migrate), and
/// [`set_fitness_function`](Self::set_fitness_function); they are not
/// meaningful before the first of those calls completes.
///
/// # Examples
///
/// ```
/// use evonet::core::Range;
/// use evonet::genetic::{
///     BinaryChromosome, EliteSelection, OptimizationFunction1D, Population,
/// };
/// use evonet::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let ancestor = Box::new(BinaryChromosome::new(32, &mut rng));
/// let fitness = OptimizationFunction1D::new(Range::new(0.0, 255.0), |x| {
///     (x / 23.0).cos() * (x / 50.0).sin() + 2.0
/// });
///
/// let mut population = Population::with_seed(
///     40,
///     ancestor,
///     Box::new(fitness),
///     Box::new(EliteSelection),
///     42,
/// );
/// for _ in 0..20 {
///     population.run_epoch();
/// }
/// assert!(population.fitness_max() >= population.fitness_avg());
/// ```
pub struct Population {
    fitness_function: Box<dyn FitnessFunction>,
    selection_method: Box<dyn SelectionMethod>,
    members: Vec<Box<dyn Chromosome>>,
    size: usize,
    rng: StdRng,

    random_selection_portion: f64,
    auto_shuffling: bool,
    crossover_rate: f64,
    mutation_rate: f64,

    fitness_max: f64,
    fitness_sum: f64,
    fitness_avg: f64,
    best_chromosome: Option<Box<dyn Chromosome>>,
}

impl Population {
    /// Creates a population of `size` members. The ancestor is evaluated
    /// and becomes member 0; the rest are fresh random chromosomes built
    /// through the ancestor's factory, each evaluated on creation.
    ///
    /// # Panics
    /// Panics if `size < 2`.
    pub fn new(
        size: usize,
        ancestor: Box<dyn Chromosome>,
        fitness_function: Box<dyn FitnessFunction>,
        selection_method: Box<dyn SelectionMethod>,
    ) -> Self {
        Self::with_seed(size, ancestor, fitness_function, selection_method, random_seed())
    }

    /// Creates a population with a deterministic random stream.
    ///
    /// # Panics
    /// Panics if `size < 2`.
    pub fn with_seed(
        size: usize,
        mut ancestor: Box<dyn Chromosome>,
        mut fitness_function: Box<dyn FitnessFunction>,
        selection_method: Box<dyn SelectionMethod>,
        seed: u64,
    ) -> Self {
        assert!(size >= 2, "too small population size");

        let mut rng = create_rng(seed);

        let fitness = fitness_function.evaluate(ancestor.as_ref());
        ancestor.set_fitness(fitness);

        let mut members: Vec<Box<dyn Chromosome>> = Vec::with_capacity(size);
        members.push(ancestor.clone_box());
        for _ in 1..size {
            let mut chromosome = ancestor.create_new(&mut rng);
            let fitness = fitness_function.evaluate(chromosome.as_ref());
            chromosome.set_fitness(fitness);
            members.push(chromosome);
        }

        Self {
            fitness_function,
            selection_method,
            members,
            size,
            rng,
            random_selection_portion: 0.0,
            auto_shuffling: false,
            crossover_rate: 0.75,
            mutation_rate: 0.10,
            fitness_max: 0.0,
            fitness_sum: 0.0,
            fitness_avg: 0.0,
            best_chromosome: None,
        }
    }

    /// Refills the whole population with fresh random chromosomes built
    /// through member 0's factory.
    pub fn regenerate(&mut self) {
        let ancestor = self.members[0].clone_box();

        self.members.clear();
        for _ in 0..self.size {
            let mut chromosome = ancestor.create_new(&mut self.rng);
            let fitness = self.fitness_function.evaluate(chromosome.as_ref());
            chromosome.set_fitness(fitness);
            self.members.push(chromosome);
        }
    }

    /// Walks the population pairwise — (0, 1), (2, 3), … — and, with
    /// probability [`crossover_rate`](Self::crossover_rate) per pair,
    /// crosses clones of both parents and appends the evaluated
    /// offspring.
    pub fn crossover(&mut self) {
        for i in (1..self.size).step_by(2) {
            if self.rng.random::<f64>() <= self.crossover_rate {
                let mut c1 = self.members[i - 1].clone_box();
                let mut c2 = self.members[i].clone_box();

                c1.crossover(c2.as_mut(), &mut self.rng);

                let fitness = self.fitness_function.evaluate(c1.as_ref());
                c1.set_fitness(fitness);
                let fitness = self.fitness_function.evaluate(c2.as_ref());
                c2.set_fitness(fitness);

                self.members.push(c1);
                self.members.push(c2);
            }
        }
    }

    /// Walks the first `size` members and, with probability
    /// [`mutation_rate`](Self::mutation_rate) each, appends an evaluated
    /// mutated clone.
    pub fn mutate(&mut self) {
        for i in 0..self.size {
            if self.rng.random::<f64>() <= self.mutation_rate {
                let mut clone = self.members[i].clone_box();
                clone.mutate(&mut self.rng);
                let fitness = self.fitness_function.evaluate(clone.as_ref());
                clone.set_fitness(fitness);
                self.members.push(clone);
            }
        }
    }

    /// Applies the selection method, shrinking the grown population back
    /// to the configured size, then injects
    /// `⌊random_selection_portion · size⌋` fresh random members and
    /// recomputes the population statistics.
    pub fn selection(&mut self) {
        let random_amount = (self.random_selection_portion * self.size as f64) as usize;

        self.selection_method.apply_selection(
            &mut self.members,
            self.size - random_amount,
            &mut self.rng,
        );

        if random_amount > 0 {
            for _ in 0..random_amount {
                let mut chromosome = self.members[0].create_new(&mut self.rng);
                let fitness = self.fitness_function.evaluate(chromosome.as_ref());
                chromosome.set_fitness(fitness);
                self.members.push(chromosome);
            }
        }

        self.find_best_chromosome();
    }

    /// Runs one epoch: [`crossover`](Self::crossover),
    /// [`mutate`](Self::mutate), [`selection`](Self::selection), and a
    /// [`shuffle`](Self::shuffle) when auto-shuffling is enabled.
    pub fn run_epoch(&mut self) {
        self.crossover();
        self.mutate();
        self.selection();

        if self.auto_shuffling {
            self.shuffle();
        }
    }

    /// Randomly reorders the population. Useful when the selection
    /// operator leaves the population sorted (elite selection does),
    /// which would otherwise bias the pairwise crossover walk.
    pub fn shuffle(&mut self) {
        self.members.shuffle(&mut self.rng);
    }

    /// Evaluates and appends a caller-initialized chromosome.
    ///
    /// The chromosome must have the same type and construction parameters
    /// as the ancestor, otherwise genetic operators will skip it.
    pub fn add_chromosome(&mut self, mut chromosome: Box<dyn Chromosome>) {
        let fitness = self.fitness_function.evaluate(chromosome.as_ref());
        chromosome.set_fitness(fitness);
        self.members.push(chromosome);
    }

    /// Exchanges `migrants_count` members with another population.
    ///
    /// The migrants are chosen by applying `migrants_selector` to a full
    /// clone of each population; the originals are sorted by fitness
    /// descending and their worst members are replaced by the other
    /// population's migrants. Both populations keep their size, and both
    /// statistics are refreshed.
    pub fn migrate(
        &mut self,
        other: &mut Population,
        migrants_count: usize,
        migrants_selector: &mut dyn SelectionMethod,
    ) {
        let current_size = self.size;
        let other_size = other.size;

        let mut current_copy: Vec<Box<dyn Chromosome>> = self.members[..current_size]
            .iter()
            .map(|c| c.clone_box())
            .collect();
        let mut other_copy: Vec<Box<dyn Chromosome>> = other.members[..other_size]
            .iter()
            .map(|c| c.clone_box())
            .collect();

        // select members to migrate from each copy
        migrants_selector.apply_selection(&mut current_copy, migrants_count, &mut self.rng);
        migrants_selector.apply_selection(&mut other_copy, migrants_count, &mut self.rng);

        // make room by dropping each population's worst members
        sort_by_fitness_descending(&mut self.members);
        sort_by_fitness_descending(&mut other.members);
        self.members.truncate(current_size - migrants_count);
        other.members.truncate(other_size - migrants_count);

        self.members.extend(other_copy);
        other.members.extend(current_copy);

        self.find_best_chromosome();
        other.find_best_chromosome();
    }

    /// Resizes the population using the configured selection method.
    ///
    /// # Panics
    /// Panics if `new_size < 2`.
    pub fn resize(&mut self, new_size: usize) {
        assert!(new_size >= 2, "too small new population size");

        if new_size > self.size {
            // the population may already exceed `size` after crossover
            // and mutation; keep those members instead of adding random
            // ones
            let to_add = new_size.saturating_sub(self.members.len());
            for _ in 0..to_add {
                let mut chromosome = self.members[0].create_new(&mut self.rng);
                let fitness = self.fitness_function.evaluate(chromosome.as_ref());
                chromosome.set_fitness(fitness);
                self.members.push(chromosome);
            }
        } else {
            self.selection_method
                .apply_selection(&mut self.members, new_size, &mut self.rng);
        }

        self.size = new_size;
    }

    /// Resizes the population, shrinking through the given selector.
    ///
    /// # Panics
    /// Panics if `new_size < 2`.
    pub fn resize_with(&mut self, new_size: usize, members_selector: &mut dyn SelectionMethod) {
        assert!(new_size >= 2, "too small new population size");

        if new_size > self.size {
            let to_add = new_size.saturating_sub(self.members.len());
            for _ in 0..to_add {
                let mut chromosome = self.members[0].create_new(&mut self.rng);
                let fitness = self.fitness_function.evaluate(chromosome.as_ref());
                chromosome.set_fitness(fitness);
                self.members.push(chromosome);
            }
        } else {
            members_selector.apply_selection(&mut self.members, new_size, &mut self.rng);
        }

        self.size = new_size;
    }

    /// Scans the first `size` members for the maximum fitness; the first
    /// maximum seen wins ties.
    fn find_best_chromosome(&mut self) {
        let scan = self.size.min(self.members.len());

        self.fitness_max = self.members[0].fitness();
        self.fitness_sum = self.fitness_max;
        let mut best_index = 0;

        for (i, member) in self.members.iter().enumerate().take(scan).skip(1) {
            let fitness = member.fitness();
            self.fitness_sum += fitness;
            if fitness > self.fitness_max {
                self.fitness_max = fitness;
                best_index = i;
            }
        }

        self.fitness_avg = self.fitness_sum / scan as f64;
        self.best_chromosome = Some(self.members[best_index].clone_box());
    }

    /// Configured (target) size of the population. The population always
    /// returns to this size after [`selection`](Self::selection).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current number of members, including offspring appended since the
    /// last selection.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the population currently has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn chromosome(&self, index: usize) -> &dyn Chromosome {
        self.members[index].as_ref()
    }

    /// Best chromosome found by the last statistics scan, or `None`
    /// before the first [`selection`](Self::selection) or
    /// [`migrate`](Self::migrate).
    pub fn best_chromosome(&self) -> Option<&dyn Chromosome> {
        self.best_chromosome.as_deref()
    }

    /// Maximum fitness of the last statistics scan.
    pub fn fitness_max(&self) -> f64 {
        self.fitness_max
    }

    /// Summary fitness of the last statistics scan.
    pub fn fitness_sum(&self) -> f64 {
        self.fitness_sum
    }

    /// Average fitness of the last statistics scan.
    pub fn fitness_avg(&self) -> f64 {
        self.fitness_avg
    }

    /// Crossover rate, clamped to `[0.1, 1]`. Default 0.75.
    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// Sets the crossover rate (clamped to `[0.1, 1]`).
    pub fn set_crossover_rate(&mut self, rate: f64) {
        self.crossover_rate = rate.clamp(0.1, 1.0);
    }

    /// Mutation rate, clamped to `[0.1, 1]`. Default 0.1.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Sets the mutation rate (clamped to `[0.1, 1]`).
    pub fn set_mutation_rate(&mut self, rate: f64) {
        self.mutation_rate = rate.clamp(0.1, 1.0);
    }

    /// Portion of the population replaced by fresh random members during
    /// selection, clamped to `[0, 0.9]`. Default 0.
    pub fn random_selection_portion(&self) -> f64 {
        self.random_selection_portion
    }

    /// Sets the random selection portion (clamped to `[0, 0.9]`).
    pub fn set_random_selection_portion(&mut self, portion: f64) {
        self.random_selection_portion = portion.clamp(0.0, 0.9);
    }

    /// Whether every [`run_epoch`](Self::run_epoch) ends with a shuffle.
    pub fn auto_shuffling(&self) -> bool {
        self.auto_shuffling
    }

    /// Enables or disables auto-shuffling.
    pub fn set_auto_shuffling(&mut self, auto_shuffling: bool) {
        self.auto_shuffling = auto_shuffling;
    }

    /// Replaces the selection method.
    pub fn set_selection_method(&mut self, selection_method: Box<dyn SelectionMethod>) {
        self.selection_method = selection_method;
    }

    /// Replaces the fitness function, re-evaluates every member, and
    /// refreshes the statistics.
    pub fn set_fitness_function(&mut self, mut fitness_function: Box<dyn FitnessFunction>) {
        for member in &mut self.members {
            let fitness = fitness_function.evaluate(member.as_ref());
            member.set_fitness(fitness);
        }
        self.fitness_function = fitness_function;
        self.find_best_chromosome();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Range;
    use crate::genetic::{
        BinaryChromosome, EliteSelection, OptimizationFunction1D, RouletteWheelSelection,
    };

    fn test_population(size: usize, seed: u64) -> Population {
        let mut rng = create_rng(seed);
        let ancestor = Box::new(BinaryChromosome::new(16, &mut rng));
        let fitness = OptimizationFunction1D::new(Range::new(0.0, 100.0), |x| x + 1.0);
        Population::with_seed(
            size,
            ancestor,
            Box::new(fitness),
            Box::new(EliteSelection),
            seed,
        )
    }

    #[test]
    #[should_panic(expected = "too small population size")]
    fn test_rejects_size_below_two() {
        test_population(1, 42);
    }

    #[test]
    fn test_initial_population_filled_and_evaluated() {
        let population = test_population(10, 42);
        assert_eq!(population.len(), 10);
        for i in 0..10 {
            assert!(population.chromosome(i).fitness() > 0.0);
        }
    }

    #[test]
    fn test_selection_restores_size() {
        let mut population = test_population(10, 42);
        population.crossover();
        population.mutate();
        assert!(population.len() >= 10);
        population.selection();
        assert_eq!(population.len(), 10);
    }

    #[test]
    fn test_epoch_restores_size_with_random_injection() {
        let mut population = test_population(10, 42);
        population.set_random_selection_portion(0.3);
        for _ in 0..5 {
            population.run_epoch();
            assert_eq!(population.len(), 10);
        }
    }

    #[test]
    fn test_statistics_consistency() {
        let mut population = test_population(10, 42);
        population.run_epoch();

        assert!(population.fitness_max() >= population.fitness_avg());
        let expected_avg = population.fitness_sum() / population.size() as f64;
        assert!((population.fitness_avg() - expected_avg).abs() < 1e-12);

        let best = population.best_chromosome().expect("statistics computed");
        assert_eq!(best.fitness(), population.fitness_max());
    }

    #[test]
    fn test_epochs_do_not_regress_with_elitism() {
        let mut population = test_population(20, 42);
        population.selection();
        let mut previous_best = population.fitness_max();
        for _ in 0..10 {
            population.run_epoch();
            assert!(
                population.fitness_max() >= previous_best,
                "elite selection lost the best member"
            );
            previous_best = population.fitness_max();
        }
    }

    #[test]
    fn test_migration_preserves_sizes() {
        let mut population1 = test_population(10, 1);
        let mut population2 = test_population(8, 2);
        population1.selection();
        population2.selection();

        let mut selector = EliteSelection;
        population1.migrate(&mut population2, 3, &mut selector);

        assert_eq!(population1.len(), 10);
        assert_eq!(population2.len(), 8);
        assert!(population1.best_chromosome().is_some());
        assert!(population2.best_chromosome().is_some());
    }

    #[test]
    fn test_migration_moves_best_members() {
        let mut population1 = test_population(10, 1);
        let mut population2 = test_population(10, 2);
        population1.selection();
        population2.selection();

        let best1 = population1.fitness_max();
        let best2 = population2.fitness_max();

        let mut selector = EliteSelection;
        population1.migrate(&mut population2, 2, &mut selector);

        // each population now contains the other's best member
        assert!(population1.fitness_max() >= best2);
        assert!(population2.fitness_max() >= best1);
    }

    #[test]
    fn test_resize_grow_and_shrink() {
        let mut population = test_population(10, 42);
        population.resize(15);
        assert_eq!(population.size(), 15);
        assert_eq!(population.len(), 15);

        population.resize(5);
        assert_eq!(population.size(), 5);
        assert_eq!(population.len(), 5);
    }

    #[test]
    #[should_panic(expected = "too small new population size")]
    fn test_resize_rejects_size_below_two() {
        let mut population = test_population(10, 42);
        population.resize(1);
    }

    #[test]
    fn test_regenerate_refills() {
        let mut population = test_population(10, 42);
        population.regenerate();
        assert_eq!(population.len(), 10);
    }

    #[test]
    fn test_rate_clamping() {
        let mut population = test_population(10, 42);
        population.set_crossover_rate(5.0);
        assert_eq!(population.crossover_rate(), 1.0);
        population.set_mutation_rate(0.0);
        assert_eq!(population.mutation_rate(), 0.1);
        population.set_random_selection_portion(2.0);
        assert_eq!(population.random_selection_portion(), 0.9);
    }

    #[test]
    fn test_shuffle_keeps_members() {
        let mut population = test_population(10, 42);
        let mut before: Vec<u64> = (0..10)
            .map(|i| {
                population
                    .chromosome(i)
                    .as_any()
                    .downcast_ref::<BinaryChromosome>()
                    .unwrap()
                    .value()
            })
            .collect();
        population.shuffle();
        let mut after: Vec<u64> = (0..10)
            .map(|i| {
                population
                    .chromosome(i)
                    .as_any()
                    .downcast_ref::<BinaryChromosome>()
                    .unwrap()
                    .value()
            })
            .collect();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_set_fitness_function_reevaluates() {
        let mut population = test_population(10, 42);
        let constant = OptimizationFunction1D::new(Range::new(0.0, 1.0), |_| 7.0);
        population.set_fitness_function(Box::new(constant));
        assert_eq!(population.fitness_max(), 7.0);
        assert!((population.fitness_avg() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_roulette_selection_epoch() {
        let mut rng = create_rng(7);
        let ancestor = Box::new(BinaryChromosome::new(16, &mut rng));
        let fitness = OptimizationFunction1D::new(Range::new(0.0, 100.0), |x| x + 1.0);
        let mut population = Population::with_seed(
            12,
            ancestor,
            Box::new(fitness),
            Box::new(RouletteWheelSelection),
            7,
        );
        for _ in 0..5 {
            population.run_epoch();
            assert_eq!(population.len(), 12);
        }
    }
}
