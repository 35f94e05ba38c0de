//! # Neuron
//! A small fully-connected feedforward neural network, trained one
//! example at a time by backpropagation, or perturbed by random
//! mutation for use with the [`neuroevolution`] crate.
//!
//! Weights and biases are stored as [`ndarray`] matrices, one pair
//! per layer transition. All layers share a single [`ActivationFunction`].
//!
//! [`neuroevolution`]: https://docs.rs/neuroevolution
//!
//! # Example usage: learning the AND gate
//! ```
//! use neuron::{Network, NetworkConfig};
//! use rand::{rngs::StdRng, Rng, SeedableRng};
//!
//! let truth_table = [
//!     ([0.0, 0.0], [0.0]),
//!     ([1.0, 0.0], [0.0]),
//!     ([0.0, 1.0], [0.0]),
//!     ([1.0, 1.0], [1.0]),
//! ];
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let mut network = Network::with_rng(&NetworkConfig::new(vec![2, 5, 1]), &mut rng).unwrap();
//! for _ in 0..15000 {
//!     let (input, target) = &truth_table[rng.gen_range(0..truth_table.len())];
//!     network.train(input, target).unwrap();
//! }
//!
//! for (input, target) in &truth_table {
//!     let output = network.evaluate(input).unwrap()[0];
//!     assert_eq!(output > 0.5, target[0] > 0.5);
//! }
//! ```

mod activation;
mod networks;

pub use activation::ActivationFunction;
pub use networks::*;
