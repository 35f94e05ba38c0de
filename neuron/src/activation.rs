use serde::{Deserialize, Serialize};

/// The nonlinearity applied to every node of a [`Network`].
///
/// Each variant knows its derivative as a function of its
/// own _output_, which is what backpropagation has at hand
/// after a forward pass.
///
/// [`Network`]: crate::Network
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationFunction {
    // 1 / (1 + exp(-x))
    Sigmoid,
    // tanh(x)
    Tanh,
}

impl ActivationFunction {
    /// Evaluates the function at `x`.
    ///
    /// # Examples
    /// ```
    /// use neuron::ActivationFunction;
    ///
    /// assert_eq!(ActivationFunction::Sigmoid.apply(0.0), 0.5);
    /// assert_eq!(ActivationFunction::Tanh.apply(0.0), 0.0);
    /// ```
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Self::Tanh => x.tanh(),
        }
    }

    /// Returns the derivative of the function at the point
    /// where it produced `y`, expressed in terms of `y` alone.
    ///
    /// # Examples
    /// ```
    /// use neuron::ActivationFunction;
    ///
    /// let y = ActivationFunction::Sigmoid.apply(0.0);
    /// assert_eq!(ActivationFunction::Sigmoid.derivative_from_output(y), 0.25);
    /// ```
    pub fn derivative_from_output(self, y: f64) -> f64 {
        match self {
            Self::Sigmoid => y * (1.0 - y),
            Self::Tanh => 1.0 - y * y,
        }
    }
}
