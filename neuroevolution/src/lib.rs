//! Generational neuroevolution of fixed-topology [`neuron`] networks.
//!
//! Instead of gradient descent, networks improve by selection: every
//! generation the caller scores each member of a [`Population`], and
//! [`Population::advance_generation`] replaces it with mutated copies
//! of members drawn in proportion to their (squared, normalized) scores.
//! There is no crossover and no elitism.
//!
//! Member types implement [`Evolvable`] by embedding an [`Individual`]
//! and choosing how their offspring are mutated.
//!
//! # Example usage: evolving an OR gate
//! ```
//! use neuroevolution::{Evolvable, Individual, Population};
//! use neuron::{Network, NetworkConfig};
//! use rand::{rngs::StdRng, Rng, SeedableRng};
//! use std::num::NonZeroUsize;
//!
//! #[derive(Clone)]
//! struct Gate(Individual);
//!
//! impl Evolvable for Gate {
//!     fn individual(&self) -> &Individual {
//!         &self.0
//!     }
//!
//!     fn individual_mut(&mut self) -> &mut Individual {
//!         &mut self.0
//!     }
//!
//!     fn mutated_copy<R: Rng + ?Sized>(&self, rng: &mut R) -> Gate {
//!         Gate(self.0.mutated(0.1, rng))
//!     }
//! }
//!
//! // Higher for networks closer to the OR truth table.
//! fn evaluate_or(gate: &Gate) -> f64 {
//!     let values = [([0.0, 0.0], 0.0), ([0.0, 1.0], 1.0), ([1.0, 0.0], 1.0), ([1.0, 1.0], 1.0)];
//!     let error: f64 = values
//!         .iter()
//!         .map(|(input, output)| (gate.network().evaluate(input).unwrap()[0] - output).abs())
//!         .sum();
//!     4.0 - error
//! }
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let config = NetworkConfig::new(vec![2, 2, 1]);
//! let mut population = Population::new(NonZeroUsize::new(50).unwrap(), || {
//!     Gate(Individual::new(Network::with_rng(&config, &mut rng).unwrap()))
//! });
//!
//! for _ in 0..20 {
//!     population.evaluate_scores(evaluate_or);
//!     if let Err(e) = population.advance_generation_with_rng(&mut rng) {
//!         eprintln!("{}", e);
//!         break;
//!     }
//! }
//! assert_eq!(population.generation(), 20);
//! ```

mod evolvable;
mod populations;

pub use evolvable::*;
pub use populations::*;
