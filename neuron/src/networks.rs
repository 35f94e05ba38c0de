//! Fully-connected feedforward networks stored as one
//! weight matrix and one bias column per layer transition.
mod config;
mod errors;

pub use config::{NetworkConfig, DEFAULT_LEARNING_RATE};
pub use errors::{NetworkError, Parameter};

use crate::ActivationFunction;

use ndarray::{Array1, Array2, Axis};
use ndarray_rand::rand_distr::{StandardNormal, Uniform};
use ndarray_rand::RandomExt;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A feedforward neural network.
///
/// `weights[i]` maps layer `i` to layer `i + 1` and has shape
/// `layer_sizes[i + 1] × layer_sizes[i]`; `biases[i]` is a
/// `layer_sizes[i + 1] × 1` column. These shapes are checked on
/// construction and never change afterwards.
///
/// Cloning a network deep-copies every matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkParts")]
pub struct Network {
    config: NetworkConfig,
    weights: Vec<Array2<f64>>,
    biases: Vec<Array2<f64>>,
}

/// Unvalidated network contents, as found in serialized data.
#[derive(Deserialize)]
struct NetworkParts {
    config: NetworkConfig,
    weights: Vec<Array2<f64>>,
    biases: Vec<Array2<f64>>,
}

impl TryFrom<NetworkParts> for Network {
    type Error = NetworkError;

    fn try_from(parts: NetworkParts) -> Result<Network, NetworkError> {
        Network::from_parts(parts.config, parts.weights, parts.biases)
    }
}

impl Network {
    /// Creates a network with every weight and bias drawn
    /// independently and uniformly from [-1, 1].
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid
    /// (see [`NetworkConfig::validate`]).
    ///
    /// # Examples
    /// ```
    /// use neuron::{Network, NetworkConfig};
    ///
    /// let network = Network::new(&NetworkConfig::new(vec![2, 5, 1])).unwrap();
    /// assert_eq!(network.weights()[0].dim(), (5, 2));
    /// assert_eq!(network.biases()[1].dim(), (1, 1));
    /// ```
    pub fn new(config: &NetworkConfig) -> Result<Network, NetworkError> {
        Network::with_rng(config, &mut rand::thread_rng())
    }

    /// Like [`Network::new`], but draws the initial values from `rng`.
    ///
    /// # Examples
    /// ```
    /// use neuron::{Network, NetworkConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let config = NetworkConfig::new(vec![3, 4, 2]);
    /// let a = Network::with_rng(&config, &mut StdRng::seed_from_u64(7)).unwrap();
    /// let b = Network::with_rng(&config, &mut StdRng::seed_from_u64(7)).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn with_rng<R>(config: &NetworkConfig, rng: &mut R) -> Result<Network, NetworkError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;
        let distribution = Uniform::<f64>::new_inclusive(-1.0, 1.0);
        let (weights, biases) = (0..config.transition_count())
            .map(|i| {
                (
                    Array2::random_using(config.weight_shape(i), distribution, &mut *rng),
                    Array2::random_using(config.bias_shape(i), distribution, &mut *rng),
                )
            })
            .unzip();
        let network = Network {
            config: config.clone(),
            weights,
            biases,
        };
        log::debug!(
            "created random network {:?} with {} parameters",
            network.layer_sizes(),
            network.parameter_count()
        );
        Ok(network)
    }

    /// Creates a network from explicit weight and bias matrices.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, if the
    /// number of matrices is not `layer_sizes.len() - 1`, or if
    /// any matrix has the wrong shape.
    ///
    /// # Examples
    /// ```
    /// use ndarray::array;
    /// use neuron::{Network, NetworkConfig, NetworkError};
    ///
    /// let config = NetworkConfig::new(vec![2, 1]);
    /// let network = Network::from_parts(
    ///     config.clone(),
    ///     vec![array![[1.0, -1.0]]],
    ///     vec![array![[0.0]]],
    /// )
    /// .unwrap();
    /// assert_eq!(network.evaluate(&[0.0, 0.0]).unwrap(), vec![0.5]);
    ///
    /// // A transposed weight matrix is rejected.
    /// let error = Network::from_parts(config, vec![array![[1.0], [-1.0]]], vec![array![[0.0]]]);
    /// assert!(matches!(error, Err(NetworkError::ShapeMismatch { .. })));
    /// ```
    pub fn from_parts(
        config: NetworkConfig,
        weights: Vec<Array2<f64>>,
        biases: Vec<Array2<f64>>,
    ) -> Result<Network, NetworkError> {
        config.validate()?;
        check_parameters(&config, Parameter::Weights, &weights, |i| {
            config.weight_shape(i)
        })?;
        check_parameters(&config, Parameter::Biases, &biases, |i| config.bias_shape(i))?;
        Ok(Network {
            config,
            weights,
            biases,
        })
    }

    /// Returns the network's configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Returns the width of each layer, input layer first.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.config.layer_sizes
    }

    /// Returns the activation function shared by all layers.
    pub fn activation(&self) -> ActivationFunction {
        self.config.activation
    }

    /// Returns the backpropagation step size.
    pub fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    /// Returns the weight matrices, one per layer transition.
    pub fn weights(&self) -> &[Array2<f64>] {
        &self.weights
    }

    /// Returns the bias columns, one per layer transition.
    pub fn biases(&self) -> &[Array2<f64>] {
        &self.biases
    }

    /// Number of input values the network expects.
    pub fn input_count(&self) -> usize {
        self.config.layer_sizes[0]
    }

    /// Number of values the network produces.
    pub fn output_count(&self) -> usize {
        self.config.layer_sizes[self.config.layer_sizes.len() - 1]
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.weights
            .iter()
            .chain(&self.biases)
            .map(|matrix| matrix.len())
            .sum()
    }

    /// Returns the network's output for `input`.
    ///
    /// # Errors
    /// Returns an error if `input` doesn't have exactly
    /// [`input_count`] elements.
    ///
    /// [`input_count`]: Network::input_count
    ///
    /// # Examples
    /// ```
    /// use neuron::{Network, NetworkConfig, NetworkError};
    ///
    /// let network = Network::new(&NetworkConfig::new(vec![2, 3, 2])).unwrap();
    /// let output = network.evaluate(&[0.5, -0.5]).unwrap();
    /// assert_eq!(output.len(), 2);
    ///
    /// assert_eq!(
    ///     network.evaluate(&[1.0]),
    ///     Err(NetworkError::InputLength { expected: 2, found: 1 }),
    /// );
    /// ```
    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>, NetworkError> {
        self.check_input(input)?;
        let output = (0..self.weights.len()).fold(column(input), |a, i| self.activate(i, &a));
        Ok(output.iter().copied().collect())
    }

    /// Performs one step of stochastic gradient descent
    /// on a single `(input, target)` example.
    ///
    /// The error of each hidden layer is propagated through the
    /// weights used in the forward pass, before they are updated.
    ///
    /// # Errors
    /// Returns an error, leaving the network untouched, if `input`
    /// or `target` don't match the input or output layer widths.
    ///
    /// # Examples
    /// ```
    /// use neuron::{Network, NetworkConfig};
    ///
    /// let mut network = Network::new(&NetworkConfig::new(vec![1, 1])).unwrap();
    /// let before = network.evaluate(&[1.0]).unwrap()[0];
    /// for _ in 0..100 {
    ///     network.train(&[1.0], &[1.0]).unwrap();
    /// }
    /// assert!(network.evaluate(&[1.0]).unwrap()[0] > before);
    /// ```
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<(), NetworkError> {
        self.check_input(input)?;
        if target.len() != self.output_count() {
            return Err(NetworkError::TargetLength {
                expected: self.output_count(),
                found: target.len(),
            });
        }

        let outputs = self.feed_forward(input);
        let mut error = column(target) - &outputs[outputs.len() - 1];

        let activation = self.config.activation;
        let learning_rate = self.config.learning_rate;
        for i in (0..self.weights.len()).rev() {
            let mut gradient = outputs[i + 1].mapv(|y| activation.derivative_from_output(y));
            gradient *= &error;
            gradient *= learning_rate;
            let delta = gradient.dot(&outputs[i].t());

            let propagated = self.weights[i].t().dot(&error);
            self.weights[i] += &delta;
            self.biases[i] += &gradient;
            error = propagated;
        }
        Ok(())
    }

    /// Replaces every weight and bias `v` with `mutation(v)`.
    ///
    /// # Examples
    /// ```
    /// use neuron::{Network, NetworkConfig};
    ///
    /// let mut network = Network::new(&NetworkConfig::new(vec![2, 2])).unwrap();
    /// network.mutate(|_| 0.0);
    /// assert!(network.weights()[0].iter().all(|w| *w == 0.0));
    /// ```
    pub fn mutate<F>(&mut self, mut mutation: F)
    where
        F: FnMut(f64) -> f64,
    {
        for matrix in self.weights.iter_mut().chain(self.biases.iter_mut()) {
            matrix.mapv_inplace(&mut mutation);
        }
    }

    /// Nudges each weight and bias with probability `rate`
    /// by adding standard gaussian noise to it.
    ///
    /// A rate of 0 leaves the network exactly as it was, and
    /// a rate of 1 or more nudges every value.
    pub fn mutate_at_rate(&mut self, rate: f64) {
        self.mutate_at_rate_with_rng(rate, &mut rand::thread_rng());
    }

    /// Like [`Network::mutate_at_rate`], but draws from `rng`.
    ///
    /// # Examples
    /// ```
    /// use neuron::{Network, NetworkConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(3);
    /// let original = Network::with_rng(&NetworkConfig::new(vec![2, 4, 1]), &mut rng).unwrap();
    ///
    /// let mut mutated = original.clone();
    /// mutated.mutate_at_rate_with_rng(0.0, &mut rng);
    /// assert_eq!(mutated, original);
    ///
    /// mutated.mutate_at_rate_with_rng(1.0, &mut rng);
    /// assert_ne!(mutated, original);
    /// ```
    pub fn mutate_at_rate_with_rng<R>(&mut self, rate: f64, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let mut nudged = 0usize;
        self.mutate(|value| {
            if rng.gen::<f64>() < rate {
                nudged += 1;
                value + rng.sample::<f64, _>(StandardNormal)
            } else {
                value
            }
        });
        log::trace!(
            "mutated {} of {} parameters at rate {}",
            nudged,
            self.parameter_count(),
            rate
        );
    }

    /// Runs the forward pass, keeping the output of every layer
    /// (the input itself included).
    fn feed_forward(&self, input: &[f64]) -> Vec<Array2<f64>> {
        let mut outputs = Vec::with_capacity(self.config.layer_sizes.len());
        outputs.push(column(input));
        for i in 0..self.weights.len() {
            let next = self.activate(i, &outputs[i]);
            outputs.push(next);
        }
        outputs
    }

    /// Computes the output of layer `i + 1` from that of layer `i`.
    fn activate(&self, i: usize, previous: &Array2<f64>) -> Array2<f64> {
        let activation = self.config.activation;
        let mut layer = self.weights[i].dot(previous);
        layer += &self.biases[i];
        layer.mapv_inplace(|x| activation.apply(x));
        layer
    }

    fn check_input(&self, input: &[f64]) -> Result<(), NetworkError> {
        if input.len() == self.input_count() {
            Ok(())
        } else {
            Err(NetworkError::InputLength {
                expected: self.input_count(),
                found: input.len(),
            })
        }
    }
}

/// Turns a slice into an `n × 1` column matrix.
fn column(values: &[f64]) -> Array2<f64> {
    Array1::from(values.to_vec()).insert_axis(Axis(1))
}

/// Checks the count and shapes of one kind of parameter matrix.
fn check_parameters<S>(
    config: &NetworkConfig,
    parameter: Parameter,
    matrices: &[Array2<f64>],
    expected_shape: S,
) -> Result<(), NetworkError>
where
    S: Fn(usize) -> (usize, usize),
{
    if matrices.len() != config.transition_count() {
        return Err(NetworkError::ParameterCount {
            parameter,
            expected: config.transition_count(),
            found: matrices.len(),
        });
    }
    for (layer, matrix) in matrices.iter().enumerate() {
        let expected = expected_shape(layer);
        if matrix.dim() != expected {
            return Err(NetworkError::ShapeMismatch {
                parameter,
                layer,
                expected,
                found: matrix.dim(),
            });
        }
    }
    Ok(())
}
