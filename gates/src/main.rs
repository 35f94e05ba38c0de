//! Learns two-input logic gates, first by backpropagation
//! and then by evolving a population of networks.
mod config;

use clap::Parser;
use config::{ExperimentConfig, Gate};
use neuroevolution::logging::{EvolutionLogger, ReportingLevel};
use neuroevolution::{Evolvable, Individual, Population};
use neuron::{Network, NetworkError};

use rand::{rngs::StdRng, Rng, SeedableRng};

use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gates")]
#[command(version)]
#[command(about = "Learns logic gates by backpropagation and by neuroevolution")]
struct Cli {
    /// Experiment configuration file (RON)
    config: Option<PathBuf>,

    /// Random seed, overriding the configuration's
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Loads the configured experiment, or the default one.
    fn experiment(&self) -> Result<ExperimentConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::from_file(path)?,
            None => ExperimentConfig::default(),
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Debug)]
struct GateMember {
    individual: Individual,
    mutation_rate: f64,
}

impl Evolvable for GateMember {
    fn individual(&self) -> &Individual {
        &self.individual
    }

    fn individual_mut(&mut self) -> &mut Individual {
        &mut self.individual
    }

    fn mutated_copy<R: Rng + ?Sized>(&self, rng: &mut R) -> GateMember {
        GateMember {
            individual: self.individual.mutated(self.mutation_rate, rng),
            mutation_rate: self.mutation_rate,
        }
    }
}

/// 4 minus the summed absolute error over the truth table,
/// with each row's error capped at 1 so that outputs outside
/// [0, 1] can't push the score below 0.
fn gate_score(gate: Gate, network: &Network) -> Result<f64, NetworkError> {
    let mut error = 0.0;
    for (input, output) in gate.truth_table() {
        error += (network.evaluate(&input)?[0] - output).abs().min(1.0);
    }
    Ok(4.0 - error)
}

/// Number of truth table rows the network gets on the right side of 0.5.
fn correct_rows(gate: Gate, network: &Network) -> Result<usize, NetworkError> {
    let mut correct = 0;
    for (input, output) in gate.truth_table() {
        if (network.evaluate(&input)?[0] > 0.5) == (output > 0.5) {
            correct += 1;
        }
    }
    Ok(correct)
}

fn train_gate<R: Rng>(
    gate: Gate,
    config: &ExperimentConfig,
    rng: &mut R,
) -> Result<Network, NetworkError> {
    let mut network = Network::with_rng(&config.network, &mut *rng)?;
    let table = gate.truth_table();
    for _ in 0..config.training_steps {
        let (input, output) = table[rng.gen_range(0..table.len())];
        network.train(&input, &[output])?;
    }
    Ok(network)
}

fn evolve_gate<R: Rng>(
    config: &ExperimentConfig,
    rng: &mut R,
) -> Result<Network, Box<dyn Error>> {
    let members = (0..config.population_size.get())
        .map(|_| {
            Network::with_rng(&config.network, &mut *rng).map(|network| GateMember {
                individual: Individual::new(network),
                mutation_rate: config.mutation_rate,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let mut population = Population::from_members(members)?;
    let mut logger = EvolutionLogger::new(ReportingLevel::Champion);
    let mut best: Option<Individual> = None;

    for generation in 0..=config.generations {
        let scores = population
            .members()
            .iter()
            .map(|member| gate_score(config.gate, member.network()))
            .collect::<Result<Vec<_>, _>>()?;
        for (member, score) in population.members_mut().iter_mut().zip(scores) {
            member.add_score(score);
        }

        logger.log(&population, &|m: &GateMember| [m.score()], ["score"]);
        let latest = logger.latest().and_then(|snapshot| snapshot.member_stats.first());
        if let Some((_, stats)) = latest {
            log::info!(
                "generation {}: best score {:.4}, mean {:.4}",
                generation,
                stats.maximum,
                stats.mean
            );
        }

        let champion = population.champion().individual();
        if best.as_ref().map_or(true, |b| champion.score() > b.score()) {
            best = Some(champion.clone());
        }
        let solved = correct_rows(config.gate, champion.network())? == 4;
        if solved || generation == config.generations {
            break;
        }
        population.advance_generation_with_rng(&mut *rng)?;
    }

    let best = best.ok_or("no generation was evaluated")?;
    log::info!(
        "evolved {} after {} generations, best score {:.4}",
        config.gate,
        population.generation(),
        best.score()
    );
    Ok(best.network().clone())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().experiment()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for gate in Gate::ALL {
        let network = train_gate(gate, &config, &mut rng)?;
        log::info!(
            "{} after {} training steps: {}/4 rows correct, score {:.4}",
            gate,
            config.training_steps,
            correct_rows(gate, &network)?,
            gate_score(gate, &network)?
        );
    }

    let champion = evolve_gate(&config, &mut rng)?;
    println!("{}", ron::to_string(&champion)?);
    Ok(())
}
