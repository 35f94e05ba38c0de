use neuron::NetworkConfig;

use serde::{Deserialize, Serialize};

use std::error::Error;
use std::fmt;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

/// Two-input boolean gates the experiments learn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    And,
    Or,
    Xor,
    Xnor,
}

impl Gate {
    pub const ALL: [Gate; 4] = [Gate::And, Gate::Or, Gate::Xor, Gate::Xnor];

    /// Returns the gate's output for inputs `a` and `b`.
    pub fn output(self, a: bool, b: bool) -> bool {
        match self {
            Gate::And => a && b,
            Gate::Or => a || b,
            Gate::Xor => a != b,
            Gate::Xnor => a == b,
        }
    }

    /// Returns every input pair with its expected output, as 0/1 values.
    pub fn truth_table(self) -> [([f64; 2], f64); 4] {
        let row = |a: bool, b: bool| {
            let bit = |x: bool| if x { 1.0 } else { 0.0 };
            ([bit(a), bit(b)], bit(self.output(a, b)))
        };
        [
            row(false, false),
            row(false, true),
            row(true, false),
            row(true, true),
        ]
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gate::And => "AND",
            Gate::Or => "OR",
            Gate::Xor => "XOR",
            Gate::Xnor => "XNOR",
        };
        write!(f, "{}", name)
    }
}

/// Parameters of a `gates` run.
///
/// Every field may be omitted from a configuration
/// file, in which case its default value is used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Shape of every network. Must have 2 inputs and 1 output.
    pub network: NetworkConfig,
    /// Gate learned by the evolutionary run.
    pub gate: Gate,
    pub population_size: NonZeroUsize,
    /// Per-parameter mutation probability of offspring.
    pub mutation_rate: f64,
    /// Maximum number of generations evolved.
    pub generations: usize,
    /// Backpropagation steps per gate.
    pub training_steps: usize,
    /// Seed for every random draw. Runs are unseeded if absent.
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> ExperimentConfig {
        ExperimentConfig {
            network: NetworkConfig::new(vec![2, 5, 1]),
            gate: Gate::Xor,
            population_size: NonZeroUsize::new(50).unwrap(),
            mutation_rate: 0.1,
            generations: 100,
            training_steps: 15000,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    /// Reads a configuration from a RON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<ExperimentConfig, Box<dyn Error>> {
        let contents = fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    /// Checks that the configuration describes a runnable experiment.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        self.network.validate()?;
        let sizes = &self.network.layer_sizes;
        if sizes[0] != 2 || sizes[sizes.len() - 1] != 1 {
            return Err(format!(
                "gate networks need 2 inputs and 1 output, got layer sizes {:?}",
                sizes
            )
            .into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(format!(
                "mutation rate must lie in [0, 1], got {}",
                self.mutation_rate
            )
            .into());
        }
        Ok(())
    }
}
