//! Pheromone matrix: evaporation, deposit and bounding.

use super::error::{AcoError, Result};
use super::types::{DepositPolicy, Tour};

/// Summary of the pheromone matrix at one point in time.
///
/// Used to watch for collapse towards zero or unbounded growth.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PheromoneStats {
    /// Smallest entry.
    pub min: f64,
    /// Largest entry.
    pub max: f64,
    /// Mean over all `n * n` entries.
    pub mean: f64,
}

/// Mutable N×N pheromone intensities, stored row-major.
///
/// Entries start at `1/N` and never become negative: evaporation multiplies
/// by `1 - rate` with `rate` in `[0, 1]`, and deposits only add positive
/// amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneModel {
    n: usize,
    values: Vec<f64>,
    policy: DepositPolicy,
}

impl PheromoneModel {
    /// Creates a uniform `1/n` matrix with directed deposits.
    pub fn new(n: usize) -> Self {
        Self::with_policy(n, DepositPolicy::Directed)
    }

    /// Creates a uniform `1/n` matrix with the given deposit policy.
    pub fn with_policy(n: usize, policy: DepositPolicy) -> Self {
        let initial = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self {
            n,
            values: vec![initial; n * n],
            policy,
        }
    }

    /// Matrix dimension.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix has no cities.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The deposit policy in effect.
    pub fn policy(&self) -> DepositPolicy {
        self.policy
    }

    /// Pheromone on the directed edge `i -> j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    /// Row `i` of the matrix.
    pub(crate) fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Multiplies every entry by `1 - rate`.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidParameter`] if `rate` is not in `[0, 1]`.
    pub fn evaporate(&mut self, rate: f64) -> Result<()> {
        check_rate(rate)?;
        let keep = 1.0 - rate;
        for v in &mut self.values {
            *v *= keep;
        }
        Ok(())
    }

    /// Adds `1 / length` along every edge of `tour`, closing edge included.
    ///
    /// With [`DepositPolicy::Symmetric`] the reverse direction of each edge
    /// receives the same amount.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidParameter`] if `length` is not finite and positive
    /// or the tour references a city outside the matrix. Nothing is
    /// deposited in that case.
    pub fn deposit(&mut self, tour: &Tour, length: f64) -> Result<()> {
        self.check_deposit(tour, length)?;
        self.apply_deposit(tour, length);
        Ok(())
    }

    /// Evaporates once, then deposits every `(tour, length)` pair.
    ///
    /// All arguments are checked before the matrix is touched, so a failed
    /// update leaves it unchanged. An empty batch only evaporates.
    pub fn update(
        &mut self,
        tours: &[Tour],
        lengths: &[f64],
        evaporation_rate: f64,
    ) -> Result<()> {
        check_rate(evaporation_rate)?;
        if tours.len() != lengths.len() {
            return Err(AcoError::parameter(format!(
                "{} tours but {} lengths",
                tours.len(),
                lengths.len()
            )));
        }
        for (tour, &length) in tours.iter().zip(lengths) {
            self.check_deposit(tour, length)?;
        }

        self.evaporate(evaporation_rate)?;
        for (tour, &length) in tours.iter().zip(lengths) {
            self.apply_deposit(tour, length);
        }
        Ok(())
    }

    /// Clamps every entry into `[min, max]`.
    pub fn clamp(&mut self, min: f64, max: f64) -> Result<()> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(AcoError::parameter(format!(
                "clamp range must satisfy 0 <= min <= max, got ({min}, {max})"
            )));
        }
        for v in &mut self.values {
            *v = v.clamp(min, max);
        }
        Ok(())
    }

    /// Minimum, maximum and mean of the matrix.
    pub fn stats(&self) -> PheromoneStats {
        if self.values.is_empty() {
            return PheromoneStats {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
            };
        }
        let (min, max, sum) = self.values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v),
        );
        PheromoneStats {
            min,
            max,
            mean: sum / self.values.len() as f64,
        }
    }

    fn check_deposit(&self, tour: &Tour, length: f64) -> Result<()> {
        if !length.is_finite() || length <= 0.0 {
            return Err(AcoError::parameter(format!(
                "tour length must be finite and positive, got {length}"
            )));
        }
        if let Some(&city) = tour.cities().iter().find(|&&c| c >= self.n) {
            return Err(AcoError::parameter(format!(
                "tour references city {city} but the matrix has {} cities",
                self.n
            )));
        }
        Ok(())
    }

    fn apply_deposit(&mut self, tour: &Tour, length: f64) {
        let amount = 1.0 / length;
        for (a, b) in tour.edges() {
            self.values[a * self.n + b] += amount;
            if self.policy == DepositPolicy::Symmetric {
                self.values[b * self.n + a] += amount;
            }
        }
    }
}

fn check_rate(rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(AcoError::parameter(format!(
            "evaporation rate must be in [0, 1], got {rate}"
        )));
    }
    Ok(())
}
