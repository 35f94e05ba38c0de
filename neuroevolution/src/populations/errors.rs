use std::error::Error;
use std::fmt;

/// An error type indicating a population or one of its
/// members could not be built, or the population could
/// not be advanced to its next generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PopulationError {
    /// The population would have no members.
    EmptyPopulation,
    /// The sum of squared scores is NaN or infinite,
    /// so fitness can't be normalized.
    NonFiniteScores,
    /// A member's score is negative or NaN.
    InvalidScore(f64),
    /// A member's fitness lies outside [0, 1].
    InvalidFitness(f64),
}

impl fmt::Display for PopulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPopulation => write!(f, "population must have at least one member"),
            Self::NonFiniteScores => {
                write!(f, "attempted evolution with non-finite total score")
            }
            Self::InvalidScore(score) => {
                write!(f, "scores must be non-negative, found {}", score)
            }
            Self::InvalidFitness(fitness) => {
                write!(f, "fitness must lie in [0, 1], found {}", fitness)
            }
        }
    }
}

impl Error for PopulationError {}
