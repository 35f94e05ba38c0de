use super::NetworkError;
use crate::ActivationFunction;

use serde::{Deserialize, Serialize};

/// Learning rate used when none is specified.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Shape and training parameters of a [`Network`].
///
/// # Note
/// The learning rate only affects [`Network::train`];
/// networks evolved by mutation alone ignore it.
///
/// [`Network`]: crate::Network
/// [`Network::train`]: crate::Network::train
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Width of each layer, input layer first and output layer last.
    pub layer_sizes: Vec<usize>,
    /// Nonlinearity shared by every layer.
    #[serde(default = "default_activation")]
    pub activation: ActivationFunction,
    /// Step size of backpropagation updates.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
}

fn default_activation() -> ActivationFunction {
    ActivationFunction::Sigmoid
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

impl NetworkConfig {
    /// Returns a configuration with the given layer sizes,
    /// [`Sigmoid`] activation and a learning rate of 0.1.
    ///
    /// [`Sigmoid`]: ActivationFunction::Sigmoid
    ///
    /// # Examples
    /// ```
    /// use neuron::{ActivationFunction, NetworkConfig};
    ///
    /// let config = NetworkConfig::new(vec![2, 5, 1]);
    /// assert_eq!(config.activation, ActivationFunction::Sigmoid);
    /// assert_eq!(config.learning_rate, 0.1);
    ///
    /// let tanh = NetworkConfig {
    ///     activation: ActivationFunction::Tanh,
    ///     ..NetworkConfig::new(vec![4, 8, 2])
    /// };
    /// ```
    pub fn new(layer_sizes: Vec<usize>) -> NetworkConfig {
        NetworkConfig {
            layer_sizes,
            activation: default_activation(),
            learning_rate: default_learning_rate(),
        }
    }

    /// Checks that the configuration describes a buildable network:
    /// at least two layers, none of them empty, and a positive,
    /// finite learning rate.
    ///
    /// # Errors
    /// Returns the first violated condition.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if self.layer_sizes.len() < 2 {
            return Err(NetworkError::TooFewLayers(self.layer_sizes.len()));
        }
        if let Some(index) = self.layer_sizes.iter().position(|&width| width == 0) {
            return Err(NetworkError::EmptyLayer(index));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }

    /// Expected (rows, columns) of the weight matrix
    /// between layer `i` and layer `i + 1`.
    pub(crate) fn weight_shape(&self, i: usize) -> (usize, usize) {
        (self.layer_sizes[i + 1], self.layer_sizes[i])
    }

    /// Expected (rows, columns) of the bias column
    /// feeding layer `i + 1`.
    pub(crate) fn bias_shape(&self, i: usize) -> (usize, usize) {
        (self.layer_sizes[i + 1], 1)
    }

    /// Number of weight (and bias) matrices.
    pub(crate) fn transition_count(&self) -> usize {
        self.layer_sizes.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_single_layer() {
        assert_eq!(
            NetworkConfig::new(vec![3]).validate(),
            Err(NetworkError::TooFewLayers(1))
        );
        assert_eq!(
            NetworkConfig::new(vec![]).validate(),
            Err(NetworkError::TooFewLayers(0))
        );
    }

    #[test]
    fn validate_rejects_empty_layer() {
        assert_eq!(
            NetworkConfig::new(vec![2, 0, 1]).validate(),
            Err(NetworkError::EmptyLayer(1))
        );
    }

    #[test]
    fn validate_rejects_bad_learning_rate() {
        for rate in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let config = NetworkConfig {
                learning_rate: rate,
                ..NetworkConfig::new(vec![1, 1])
            };
            assert!(matches!(
                config.validate(),
                Err(NetworkError::InvalidLearningRate(_))
            ));
        }
    }

    #[test]
    fn shapes() {
        let config = NetworkConfig::new(vec![2, 5, 1]);
        assert_eq!(config.transition_count(), 2);
        assert_eq!(config.weight_shape(0), (5, 2));
        assert_eq!(config.weight_shape(1), (1, 5));
        assert_eq!(config.bias_shape(0), (5, 1));
        assert_eq!(config.bias_shape(1), (1, 1));
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: NetworkConfig = serde_json::from_str(r#"{"layer_sizes":[3,2]}"#).unwrap();
        assert_eq!(config, NetworkConfig::new(vec![3, 2]));
    }
}
