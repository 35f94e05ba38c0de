//! Fitness normalization and fitness-proportionate selection.
use super::PopulationError;

use rand::Rng;

/// Turns raw scores into fitnesses that sum to 1.
///
/// Each score is squared before normalization, so that
/// better scores are favoured more than linearly. If every
/// score is 0 all members get the same fitness.
///
/// # Errors
/// Returns an error if there are no scores, or if the
/// sum of squared scores is NaN or infinite.
///
/// # Examples
/// ```
/// use neuroevolution::selection::normalize_fitness;
///
/// assert_eq!(normalize_fitness([1.0, 3.0]).unwrap(), vec![0.1, 0.9]);
/// assert_eq!(normalize_fitness([0.0, 0.0]).unwrap(), vec![0.5, 0.5]);
/// ```
pub fn normalize_fitness<I>(scores: I) -> Result<Vec<f64>, PopulationError>
where
    I: IntoIterator<Item = f64>,
{
    let squared: Vec<f64> = scores.into_iter().map(|score| score * score).collect();
    if squared.is_empty() {
        return Err(PopulationError::EmptyPopulation);
    }

    let total: f64 = squared.iter().sum();
    if !total.is_finite() {
        return Err(PopulationError::NonFiniteScores);
    }
    if total == 0.0 {
        log::warn!(
            "all {} members scored 0, falling back to uniform fitness",
            squared.len()
        );
        return Ok(vec![1.0 / squared.len() as f64; squared.len()]);
    }

    Ok(squared.into_iter().map(|score| score / total).collect())
}

/// Samples indices with probability proportional to
/// their fitness.
///
/// Index `i` is chosen for a uniform draw `r` in [0, 1) iff
/// `fitness[0] + … + fitness[i - 1] <= r < fitness[0] + … + fitness[i]`,
/// so members with zero fitness are never chosen. Should round-off
/// leave `r` beyond the total, the last member with non-zero
/// fitness is chosen instead.
#[derive(Clone, Debug)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
    fallback: usize,
}

impl RouletteWheel {
    /// Builds a wheel over normalized `fitnesses`.
    /// Returns `None` if `fitnesses` is empty.
    ///
    /// # Examples
    /// ```
    /// use neuroevolution::selection::RouletteWheel;
    ///
    /// let wheel = RouletteWheel::new(&[0.25, 0.0, 0.75]).unwrap();
    /// assert_eq!(wheel.select(0.0), 0);
    /// assert_eq!(wheel.select(0.25), 2);
    /// assert_eq!(wheel.select(0.999), 2);
    ///
    /// assert!(RouletteWheel::new(&[]).is_none());
    /// ```
    pub fn new(fitnesses: &[f64]) -> Option<RouletteWheel> {
        if fitnesses.is_empty() {
            return None;
        }
        let cumulative = fitnesses
            .iter()
            .scan(0.0, |sum, fitness| {
                *sum += fitness;
                Some(*sum)
            })
            .collect();
        let fallback = fitnesses
            .iter()
            .rposition(|fitness| *fitness > 0.0)
            .unwrap_or(fitnesses.len() - 1);
        Some(RouletteWheel {
            cumulative,
            fallback,
        })
    }

    /// Returns the index the wheel stops at for the draw `r`.
    pub fn select(&self, r: f64) -> usize {
        let index = self.cumulative.partition_point(|sum| *sum <= r);
        if index < self.cumulative.len() {
            index
        } else {
            self.fallback
        }
    }

    /// Spins the wheel once.
    pub fn spin<R>(&self, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        self.select(rng.gen::<f64>())
    }
}
