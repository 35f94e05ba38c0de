//! A Population is a fixed-size generation of evolvable
//! members, which is replaced each generation by mutated
//! copies of members sampled in proportion to their fitness.
mod errors;
pub mod logging;
pub mod selection;

use crate::Evolvable;
pub use errors::PopulationError;
use selection::{normalize_fitness, RouletteWheel};

use rand::Rng;
use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// A population of evolvable members.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "PopulationParts<T>")]
pub struct Population<T> {
    members: Vec<T>,
    generation: usize,
}

/// Unvalidated population contents, as found in serialized data.
#[derive(Deserialize)]
struct PopulationParts<T> {
    members: Vec<T>,
    generation: usize,
}

impl<T> TryFrom<PopulationParts<T>> for Population<T> {
    type Error = PopulationError;

    fn try_from(parts: PopulationParts<T>) -> Result<Population<T>, PopulationError> {
        if parts.members.is_empty() {
            return Err(PopulationError::EmptyPopulation);
        }
        Ok(Population {
            members: parts.members,
            generation: parts.generation,
        })
    }
}

impl<T: Evolvable> Population<T> {
    /// Creates a population of `size` members, each built by `factory`.
    ///
    /// # Examples
    /// ```
    /// # use neuroevolution::{Evolvable, Individual};
    /// # use rand::Rng;
    /// # #[derive(Clone)]
    /// # struct Member(Individual);
    /// # impl Evolvable for Member {
    /// #     fn individual(&self) -> &Individual { &self.0 }
    /// #     fn individual_mut(&mut self) -> &mut Individual { &mut self.0 }
    /// #     fn mutated_copy<R: Rng + ?Sized>(&self, rng: &mut R) -> Member {
    /// #         Member(self.0.mutated(0.1, rng))
    /// #     }
    /// # }
    /// use neuroevolution::Population;
    /// use neuron::{Network, NetworkConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig::new(vec![4, 8, 2]);
    /// // With `Member` a suitable type implementing `Evolvable`...
    /// let population = Population::new(NonZeroUsize::new(50).unwrap(), || {
    ///     Member(Individual::new(Network::new(&config).unwrap()))
    /// });
    ///
    /// assert_eq!(population.size(), 50);
    /// assert_eq!(population.generation(), 0);
    /// ```
    pub fn new<F>(size: NonZeroUsize, factory: F) -> Population<T>
    where
        F: FnMut() -> T,
    {
        Population {
            members: std::iter::repeat_with(factory).take(size.get()).collect(),
            generation: 0,
        }
    }

    /// Creates a population from already-built members.
    ///
    /// # Errors
    /// Returns an error if `members` is empty.
    pub fn from_members(members: Vec<T>) -> Result<Population<T>, PopulationError> {
        Population::try_from(PopulationParts {
            members,
            generation: 0,
        })
    }

    /// Returns the current members.
    pub fn members(&self) -> &[T] {
        &self.members
    }

    /// Returns the current members mutably, so that
    /// callers can add to their scores. The number of
    /// members can't be changed.
    pub fn members_mut(&mut self) -> &mut [T] {
        &mut self.members
    }

    /// Returns the number of members, which is the same every generation.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Returns the current generation number.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Adds `evaluator(member)` to each member's score.
    ///
    /// # Panics
    /// Panics if the evaluator returns a negative or NaN value.
    pub fn evaluate_scores<E>(&mut self, mut evaluator: E)
    where
        E: FnMut(&T) -> f64,
    {
        for member in &mut self.members {
            let score = evaluator(member);
            member.add_score(score);
        }
    }

    /// Returns the member with the highest score.
    /// Ties go to the earliest member.
    pub fn champion(&self) -> &T {
        let mut champion = &self.members[0];
        for member in &self.members[1..] {
            if member.score() > champion.score() {
                champion = member;
            }
        }
        champion
    }

    /// Replaces the population with its next generation.
    ///
    /// Scores are squared and normalized into fitnesses, then
    /// as many members as before are drawn with replacement in
    /// proportion to their fitness, and each draw is replaced by
    /// its [mutated copy]. If every member scored 0, all are
    /// equally likely to be drawn.
    ///
    /// [mutated copy]: Evolvable::mutated_copy
    ///
    /// # Errors
    /// Returns an error, leaving the population untouched, if the
    /// sum of squared scores is infinite.
    ///
    /// # Examples
    /// ```
    /// # use neuroevolution::{Evolvable, Individual};
    /// # use rand::Rng;
    /// # #[derive(Clone)]
    /// # struct Member(Individual);
    /// # impl Evolvable for Member {
    /// #     fn individual(&self) -> &Individual { &self.0 }
    /// #     fn individual_mut(&mut self) -> &mut Individual { &mut self.0 }
    /// #     fn mutated_copy<R: Rng + ?Sized>(&self, rng: &mut R) -> Member {
    /// #         Member(self.0.mutated(0.1, rng))
    /// #     }
    /// # }
    /// use neuroevolution::Population;
    /// use neuron::{Network, NetworkConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig::new(vec![1, 1]);
    /// let mut population = Population::new(NonZeroUsize::new(10).unwrap(), || {
    ///     Member(Individual::new(Network::new(&config).unwrap()))
    /// });
    ///
    /// for _ in 0..5 {
    ///     // Networks with larger outputs are given higher scores.
    ///     population.evaluate_scores(|m| m.network().evaluate(&[1.0]).unwrap()[0]);
    ///     population.advance_generation().unwrap();
    /// }
    /// assert_eq!(population.generation(), 5);
    /// assert_eq!(population.size(), 10);
    /// ```
    pub fn advance_generation(&mut self) -> Result<(), PopulationError> {
        self.advance_generation_with_rng(&mut rand::thread_rng())
    }

    /// Like [`Population::advance_generation`], but draws
    /// both selections and mutations from `rng`.
    pub fn advance_generation_with_rng<R>(&mut self, rng: &mut R) -> Result<(), PopulationError>
    where
        R: Rng + ?Sized,
    {
        let fitnesses = normalize_fitness(self.members.iter().map(|member| member.score()))?;
        let wheel = RouletteWheel::new(&fitnesses).ok_or(PopulationError::EmptyPopulation)?;

        for (member, fitness) in self.members.iter_mut().zip(&fitnesses) {
            let individual = member.individual_mut();
            individual.set_score(individual.score() * individual.score());
            individual.set_fitness(*fitness);
        }
        log::debug!(
            "generation {}: champion score {}",
            self.generation,
            self.champion().score()
        );

        let members = &self.members;
        let next_generation = (0..members.len())
            .map(|_| members[wheel.spin(&mut *rng)].mutated_copy(&mut *rng))
            .collect();

        self.members = next_generation;
        self.generation += 1;
        Ok(())
    }

    /// Resets the population to generation 0, rebuilding
    /// the same number of members with `factory`. Used
    /// primarily when evolution has stalled.
    pub fn reset_with<F>(&mut self, factory: F)
    where
        F: FnMut() -> T,
    {
        log::debug!(
            "resetting population of {} at generation {}",
            self.members.len(),
            self.generation
        );
        self.members = std::iter::repeat_with(factory)
            .take(self.members.len())
            .collect();
        self.generation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Individual;

    use neuron::{Network, NetworkConfig};
    use rand::{rngs::StdRng, SeedableRng};

    /// Member whose offspring remember who their parent was.
    #[derive(Clone, Debug)]
    struct Tagged {
        individual: Individual,
        tag: usize,
    }

    impl Evolvable for Tagged {
        fn individual(&self) -> &Individual {
            &self.individual
        }

        fn individual_mut(&mut self) -> &mut Individual {
            &mut self.individual
        }

        fn mutated_copy<R: Rng + ?Sized>(&self, rng: &mut R) -> Tagged {
            Tagged {
                individual: self.individual.mutated(0.0, rng),
                tag: self.tag,
            }
        }
    }

    fn tagged_population(size: usize, rng: &mut StdRng) -> Population<Tagged> {
        let config = NetworkConfig::new(vec![1, 1]);
        let mut tag = 0;
        Population::new(NonZeroUsize::new(size).unwrap(), || {
            tag += 1;
            Tagged {
                individual: Individual::new(Network::with_rng(&config, &mut *rng).unwrap()),
                tag: tag - 1,
            }
        })
    }

    #[test]
    fn from_members_rejects_empty() {
        assert_eq!(
            Population::<Tagged>::from_members(vec![]).unwrap_err(),
            PopulationError::EmptyPopulation
        );
    }

    #[test]
    fn generation_counter_and_size() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut population = tagged_population(7, &mut rng);
        for generation in 0..5 {
            assert_eq!(population.generation(), generation);
            population.evaluate_scores(|m| m.tag as f64);
            population.advance_generation_with_rng(&mut rng).unwrap();
            assert_eq!(population.size(), 7);
        }
        assert_eq!(population.generation(), 5);
    }

    #[test]
    fn offspring_start_unscored() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut population = tagged_population(5, &mut rng);
        population.evaluate_scores(|_| 3.0);
        population.advance_generation_with_rng(&mut rng).unwrap();
        assert!(population
            .members()
            .iter()
            .all(|m| m.score() == 0.0 && m.fitness() == 0.0));
    }

    #[test]
    fn only_scoring_member_survives() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut population = tagged_population(6, &mut rng);
        population.members_mut()[4].add_score(1.0);
        population.advance_generation_with_rng(&mut rng).unwrap();
        assert!(population.members().iter().all(|m| m.tag == 4));
    }

    #[test]
    fn all_zero_scores_still_advance() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut population = tagged_population(20, &mut rng);
        population.advance_generation_with_rng(&mut rng).unwrap();
        assert_eq!(population.generation(), 1);
        assert_eq!(population.size(), 20);
    }

    #[test]
    fn infinite_scores_leave_population_untouched() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut population = tagged_population(3, &mut rng);
        population.members_mut()[0].add_score(f64::MAX);
        population.members_mut()[1].add_score(1.0);
        let networks: Vec<Network> = population
            .members()
            .iter()
            .map(|m| m.network().clone())
            .collect();

        assert_eq!(
            population.advance_generation_with_rng(&mut rng),
            Err(PopulationError::NonFiniteScores)
        );
        assert_eq!(population.generation(), 0);
        assert_eq!(population.members()[0].score(), f64::MAX);
        assert_eq!(population.members()[1].score(), 1.0);
        for (member, network) in population.members().iter().zip(&networks) {
            assert_eq!(member.network(), network);
        }
    }

    #[test]
    fn champion_has_highest_score() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut population = tagged_population(5, &mut rng);
        population.evaluate_scores(|m| [1.0, 5.0, 2.0, 5.0, 0.0][m.tag]);
        assert_eq!(population.champion().tag, 1);
    }

    #[test]
    fn reset_rebuilds_generation_zero() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut population = tagged_population(4, &mut rng);
        population.advance_generation_with_rng(&mut rng).unwrap();
        let template = population.members()[0].clone();
        population.reset_with(|| template.clone());
        assert_eq!(population.generation(), 0);
        assert_eq!(population.size(), 4);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(7);
            let mut population = tagged_population(8, &mut rng);
            for _ in 0..3 {
                population.evaluate_scores(|m| m.tag as f64 + 1.0);
                population.advance_generation_with_rng(&mut rng).unwrap();
            }
            population
                .members()
                .iter()
                .map(|m| m.tag)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
