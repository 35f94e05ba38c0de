use std::error::Error;
use std::fmt;

/// Which of a layer's parameter matrices an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parameter {
    Weights,
    Biases,
}

/// An error type indicating a network could not be built,
/// or was handed data that doesn't fit its layers.
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkError {
    /// Fewer than two layer sizes were given.
    TooFewLayers(usize),
    /// The layer at this index has zero width.
    EmptyLayer(usize),
    /// The learning rate was not a positive, finite number.
    InvalidLearningRate(f64),
    /// The number of weight or bias matrices doesn't match
    /// the number of layer transitions.
    ParameterCount {
        parameter: Parameter,
        expected: usize,
        found: usize,
    },
    /// A weight or bias matrix disagrees with the layer sizes.
    /// Shapes are given as (rows, columns).
    ShapeMismatch {
        parameter: Parameter,
        layer: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// The input vector's length differs from the input layer's width.
    InputLength { expected: usize, found: usize },
    /// The target vector's length differs from the output layer's width.
    TargetLength { expected: usize, found: usize },
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weights => write!(f, "weight"),
            Self::Biases => write!(f, "bias"),
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewLayers(count) => write!(
                f,
                "network needs at least 2 layers, {} given",
                count
            ),
            Self::EmptyLayer(index) => write!(f, "layer {} has zero width", index),
            Self::InvalidLearningRate(rate) => {
                write!(f, "learning rate must be positive and finite, got {}", rate)
            }
            Self::ParameterCount {
                parameter,
                expected,
                found,
            } => write!(
                f,
                "expected {} {} matrices, found {}",
                expected, parameter, found
            ),
            Self::ShapeMismatch {
                parameter,
                layer,
                expected,
                found,
            } => write!(
                f,
                "{} matrix {} has shape {}x{}, expected {}x{}",
                parameter, layer, found.0, found.1, expected.0, expected.1
            ),
            Self::InputLength { expected, found } => write!(
                f,
                "input of length {} given to network with {} inputs",
                found, expected
            ),
            Self::TargetLength { expected, found } => write!(
                f,
                "target of length {} given to network with {} outputs",
                found, expected
            ),
        }
    }
}

impl Error for NetworkError {}
