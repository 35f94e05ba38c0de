use super::Population;

use crate::Evolvable;

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportingLevel {
    /// Clones the entire population.
    AllMembers,
    /// Clones only the population champion.
    Champion,
    /// Clones no members.
    NoMembers,
}

/// A snapshot of a population, taken before
/// it advances to the next generation.
#[derive(Clone, Debug)]
pub struct Log<T> {
    pub generation_number: usize,
    pub generation_sample: GenerationMemberRecord<T>,
    pub population_size: usize,
    pub member_stats: Vec<(String, Stats)>,
}

impl<T> fmt::Display for Log<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Log {{")?;
        writeln!(f, "\tgeneration_number: {}", self.generation_number)?;
        writeln!(f, "\tpopulation_size: {}", self.population_size)?;
        for (name, stats) in &self.member_stats {
            writeln!(f, "\t{}: {:?}", name, stats)?;
        }
        write!(f, "}}")
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence,
    /// or `None` if the sequence is empty.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::logging::Stats;
    ///
    /// let stats = Stats::from_values([-2.0, -1.0, 0.5, 1.0, 1.5]).unwrap();
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    ///
    /// assert!(Stats::from_values(std::iter::empty()).is_none());
    /// ```
    pub fn from_values(data: impl IntoIterator<Item = f64>) -> Option<Stats> {
        let mut data: Vec<f64> = data.into_iter().collect();
        if data.is_empty() {
            return None;
        }
        data.sort_by(f64::total_cmp);

        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Some(Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f64>() / data.len() as f64,
            median,
        })
    }
}

/// A reporting-level dependant store
/// of members from a population.
#[derive(Clone, Debug)]
pub enum GenerationMemberRecord<T> {
    /// Every member.
    All(Vec<T>),
    /// Only the highest-scoring member.
    Champion(T),
    /// Empty.
    None,
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct EvolutionLogger<T> {
    reporting_level: ReportingLevel,
    logs: Vec<Log<T>>,
}

impl<T: Evolvable + Clone> EvolutionLogger<T> {
    /// Returns a logger with the appropiate reporting level.
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger<T> {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a population.
    ///
    /// The `member_stat_extractor` provides a way of
    /// obtaining arbitrary statistics on the population,
    /// where each statistic is named by `stat_names`.
    /// Call this after scoring and before advancing the
    /// generation, as advancing resets every score.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::logging::{EvolutionLogger, ReportingLevel};
    /// use neuroevolution::{Evolvable, Individual, Population};
    /// use neuron::{Network, NetworkConfig};
    /// use rand::Rng;
    /// use std::num::NonZeroUsize;
    ///
    /// #[derive(Clone)]
    /// struct Member(Individual);
    ///
    /// impl Evolvable for Member {
    ///     fn individual(&self) -> &Individual { &self.0 }
    ///     fn individual_mut(&mut self) -> &mut Individual { &mut self.0 }
    ///     fn mutated_copy<R: Rng + ?Sized>(&self, rng: &mut R) -> Member {
    ///         Member(self.0.mutated(0.1, rng))
    ///     }
    /// }
    ///
    /// let config = NetworkConfig::new(vec![1, 1]);
    /// let mut population = Population::new(NonZeroUsize::new(4).unwrap(), || {
    ///     Member(Individual::new(Network::new(&config).unwrap()))
    /// });
    /// population.evaluate_scores(|m| m.network().evaluate(&[1.0]).unwrap()[0]);
    ///
    /// let mut logger = EvolutionLogger::new(ReportingLevel::Champion);
    /// logger.log(&population, &|m: &Member| [m.score()], ["score"]);
    /// assert_eq!(logger.iter().count(), 1);
    /// ```
    pub fn log<F, const N: usize>(
        &mut self,
        population: &Population<T>,
        member_stat_extractor: &F,
        stat_names: [&str; N],
    ) where
        F: Fn(&T) -> [f64; N],
    {
        let stats: Vec<[f64; N]> = population.members().iter().map(member_stat_extractor).collect();
        let member_stats = stat_names
            .iter()
            .map(|name| String::from(*name))
            .zip(unzip_n_vecs(stats))
            .filter_map(|(name, data)| Stats::from_values(data).map(|stats| (name, stats)))
            .collect();
        let snapshot = Log {
            generation_number: population.generation(),
            generation_sample: match self.reporting_level {
                ReportingLevel::AllMembers => {
                    GenerationMemberRecord::All(population.members().to_vec())
                }
                ReportingLevel::Champion => {
                    GenerationMemberRecord::Champion(population.champion().clone())
                }
                ReportingLevel::NoMembers => GenerationMemberRecord::None,
            },
            population_size: population.size(),
            member_stats,
        };
        log::debug!("{}", snapshot);
        self.logs.push(snapshot);
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &Log<T>> {
        self.logs.iter()
    }

    /// Returns the most recent snapshot, if any.
    pub fn latest(&self) -> Option<&Log<T>> {
        self.logs.last()
    }
}

fn unzip_n_vecs<T: Clone, const N: usize>(rows: Vec<[T; N]>) -> Vec<Vec<T>> {
    let mut columns = vec![Vec::with_capacity(rows.len()); N];
    for row in rows {
        for (column, item) in columns.iter_mut().zip(row) {
            column.push(item);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_even_length_median() {
        let stats = Stats::from_values([4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.minimum, 1.0);
        assert_eq!(stats.maximum, 4.0);
    }

    #[test]
    fn stats_single_value() {
        let stats = Stats::from_values([7.0]).unwrap();
        assert_eq!(
            stats,
            Stats {
                maximum: 7.0,
                minimum: 7.0,
                mean: 7.0,
                median: 7.0
            }
        );
    }

    #[test]
    fn unzip_columns() {
        let columns = unzip_n_vecs(vec![[1, 2], [3, 4], [5, 6]]);
        assert_eq!(columns, vec![vec![1, 3, 5], vec![2, 4, 6]]);
        assert_eq!(unzip_n_vecs::<i32, 2>(vec![]), vec![Vec::<i32>::new(), vec![]]);
    }
}
