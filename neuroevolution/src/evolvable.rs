use crate::PopulationError;
use neuron::Network;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The state every member of a [`Population`] carries:
/// its network, the score accumulated during the current
/// generation, and the fitness derived from that score
/// when the generation ends.
///
/// Callers may only _add_ to the score. Fitness is computed
/// by the population and is 0 until the first normalization.
///
/// [`Population`]: crate::Population
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IndividualParts")]
pub struct Individual {
    network: Network,
    score: f64,
    fitness: f64,
}

/// Unvalidated individual contents, as found in serialized data.
#[derive(Deserialize)]
struct IndividualParts {
    network: Network,
    score: f64,
    fitness: f64,
}

impl TryFrom<IndividualParts> for Individual {
    type Error = PopulationError;

    fn try_from(parts: IndividualParts) -> Result<Individual, PopulationError> {
        if parts.score.is_nan() || parts.score < 0.0 {
            return Err(PopulationError::InvalidScore(parts.score));
        }
        if !(0.0..=1.0).contains(&parts.fitness) {
            return Err(PopulationError::InvalidFitness(parts.fitness));
        }
        Ok(Individual {
            network: parts.network,
            score: parts.score,
            fitness: parts.fitness,
        })
    }
}

impl Individual {
    /// Wraps `network` with a zero score and fitness.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::Individual;
    /// use neuron::{Network, NetworkConfig};
    ///
    /// let network = Network::new(&NetworkConfig::new(vec![2, 1])).unwrap();
    /// let individual = Individual::new(network);
    /// assert_eq!(individual.score(), 0.0);
    /// assert_eq!(individual.fitness(), 0.0);
    /// ```
    pub fn new(network: Network) -> Individual {
        Individual {
            network,
            score: 0.0,
            fitness: 0.0,
        }
    }

    /// Returns the individual's network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Returns the score accumulated so far.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns the fitness assigned at the last generation boundary.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Adds `score` to the individual's accumulated score.
    ///
    /// # Panics
    /// Panics if `score` is negative or NaN.
    ///
    /// # Examples
    /// ```
    /// # use neuroevolution::Individual;
    /// # use neuron::{Network, NetworkConfig};
    /// # let network = Network::new(&NetworkConfig::new(vec![2, 1])).unwrap();
    /// let mut individual = Individual::new(network);
    /// individual.add_score(1.5);
    /// individual.add_score(2.0);
    /// assert_eq!(individual.score(), 3.5);
    /// ```
    pub fn add_score(&mut self, score: f64) {
        assert!(score >= 0.0, "score increments must be non-negative, got {}", score);
        self.score += score;
    }

    /// Returns a new individual holding a copy of this one's network,
    /// each of whose parameters was nudged by gaussian noise with
    /// probability `rate`. Score and fitness start at zero.
    ///
    /// # Examples
    /// ```
    /// # use neuroevolution::Individual;
    /// # use neuron::{Network, NetworkConfig};
    /// let mut rng = rand::thread_rng();
    /// # let network = Network::new(&NetworkConfig::new(vec![2, 1])).unwrap();
    /// let mut parent = Individual::new(network);
    /// parent.add_score(10.0);
    ///
    /// let child = parent.mutated(0.0, &mut rng);
    /// assert_eq!(child.network(), parent.network());
    /// assert_eq!(child.score(), 0.0);
    /// ```
    pub fn mutated<R>(&self, rate: f64, rng: &mut R) -> Individual
    where
        R: Rng + ?Sized,
    {
        let mut network = self.network.clone();
        network.mutate_at_rate_with_rng(rate, rng);
        Individual::new(network)
    }

    pub(crate) fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

/// An interface for population members.
///
/// Implementors embed an [`Individual`] and decide how their
/// offspring are mutated. Everything else is provided.
///
/// # Examples
/// ```
/// use neuroevolution::{Evolvable, Individual};
/// use rand::Rng;
///
/// #[derive(Clone)]
/// struct Walker {
///     individual: Individual,
///     stride: f64,
/// }
///
/// impl Evolvable for Walker {
///     fn individual(&self) -> &Individual {
///         &self.individual
///     }
///
///     fn individual_mut(&mut self) -> &mut Individual {
///         &mut self.individual
///     }
///
///     fn mutated_copy<R: Rng + ?Sized>(&self, rng: &mut R) -> Walker {
///         Walker {
///             individual: self.individual.mutated(0.1, rng),
///             stride: self.stride,
///         }
///     }
/// }
/// ```
pub trait Evolvable: Sized {
    /// Returns the member's shared evolutionary state.
    fn individual(&self) -> &Individual;

    /// Returns the member's shared evolutionary state, mutably.
    fn individual_mut(&mut self) -> &mut Individual;

    /// Returns a mutated copy of the member, with
    /// score and fitness reset to zero.
    fn mutated_copy<R: Rng + ?Sized>(&self, rng: &mut R) -> Self;

    /// Returns the member's network.
    fn network(&self) -> &Network {
        self.individual().network()
    }

    /// Returns the member's accumulated score.
    fn score(&self) -> f64 {
        self.individual().score()
    }

    /// Returns the member's fitness at the last generation boundary.
    fn fitness(&self) -> f64 {
        self.individual().fitness()
    }

    /// Adds to the member's score.
    ///
    /// # Panics
    /// Panics if `score` is negative or NaN.
    fn add_score(&mut self, score: f64) {
        self.individual_mut().add_score(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use neuron::NetworkConfig;
    use rand::{rngs::StdRng, SeedableRng};

    fn individual(seed: u64) -> Individual {
        let network = Network::with_rng(
            &NetworkConfig::new(vec![2, 3, 1]),
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();
        Individual::new(network)
    }

    #[test]
    fn scores_accumulate() {
        let mut individual = individual(0);
        individual.add_score(1.0);
        individual.add_score(0.0);
        individual.add_score(2.5);
        assert_eq!(individual.score(), 3.5);
        assert_eq!(individual.fitness(), 0.0);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn negative_score_panics() {
        individual(0).add_score(-1.0);
    }

    #[test]
    #[should_panic]
    fn nan_score_panics() {
        individual(0).add_score(f64::NAN);
    }

    #[test]
    fn mutated_resets_state() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut parent = individual(1);
        parent.add_score(4.0);
        parent.set_fitness(0.25);

        let child = parent.mutated(1.0, &mut rng);
        assert_eq!(child.score(), 0.0);
        assert_eq!(child.fitness(), 0.0);
        assert_ne!(child.network(), parent.network());
        assert_eq!(child.network().layer_sizes(), parent.network().layer_sizes());
        assert_eq!(parent.network(), individual(1).network());
    }

    #[test]
    fn deserialization_checks_score_and_fitness() {
        let mut original = individual(3);
        original.add_score(2.0);
        original.set_fitness(0.5);
        let json = serde_json::to_value(&original).unwrap();
        assert_eq!(serde_json::from_value::<Individual>(json.clone()).unwrap(), original);

        let mut negative = json.clone();
        negative["score"] = serde_json::json!(-1.0);
        let error = serde_json::from_value::<Individual>(negative).unwrap_err();
        assert!(error.to_string().contains("non-negative"), "{}", error);

        let mut overweight = json;
        overweight["fitness"] = serde_json::json!(1.5);
        let error = serde_json::from_value::<Individual>(overweight).unwrap_err();
        assert!(error.to_string().contains("[0, 1]"), "{}", error);
    }

    #[test]
    fn zero_rate_mutation_copies_network() {
        let mut rng = StdRng::seed_from_u64(2);
        let parent = individual(2);
        assert_eq!(parent.mutated(0.0, &mut rng).network(), parent.network());
    }
}
