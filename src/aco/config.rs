//! ACO configuration.
//!
//! [`AcoConfig`] holds every parameter that controls the colony loop.

use super::error::{AcoError, Result};
use super::types::DepositPolicy;

/// Configuration for the Ant Colony Optimizer.
///
/// # Defaults
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.num_ants, 100);
/// assert_eq!(config.iterations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_aco::aco::{AcoConfig, DepositPolicy};
///
/// let config = AcoConfig::default()
///     .with_num_ants(20)
///     .with_alpha(1.0)
///     .with_beta(3.0)
///     .with_evaporation_rate(0.3)
///     .with_deposit_policy(DepositPolicy::Symmetric)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants constructing a tour in every iteration.
    pub num_ants: usize,

    /// Number of iterations [`AcoRunner::run`](super::AcoRunner::run) executes.
    pub iterations: usize,

    /// Pheromone weight exponent. Must be finite and positive.
    pub alpha: f64,

    /// Heuristic (inverse distance) weight exponent. Must be finite and
    /// positive.
    pub beta: f64,

    /// Fraction of pheromone removed per iteration, in `[0, 1]`.
    pub evaporation_rate: f64,

    /// Whether deposits reinforce only the traversed direction of an edge.
    pub deposit_policy: DepositPolicy,

    /// Optional `(min, max)` range pheromone is clamped to after each update.
    ///
    /// `None` leaves pheromone unbounded above (the default).
    pub pheromone_bounds: Option<(f64, f64)>,

    /// Whether to construct tours in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 100,
            iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.5,
            deposit_policy: DepositPolicy::default(),
            pheromone_bounds: None,
            parallel: true,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the heuristic exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Sets the deposit policy.
    pub fn with_deposit_policy(mut self, policy: DepositPolicy) -> Self {
        self.deposit_policy = policy;
        self
    }

    /// Bounds pheromone to `[min, max]` after every update.
    pub fn with_pheromone_bounds(mut self, min: f64, max: f64) -> Self {
        self.pheromone_bounds = Some((min, max));
        self
    }

    /// Enables or disables parallel construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick runs: 20 ants, 50 iterations.
    pub fn fast() -> Self {
        Self {
            num_ants: 20,
            iterations: 50,
            ..Self::default()
        }
    }

    /// Preset for long runs on larger instances.
    ///
    /// Uses a slower evaporation and bounded pheromone so reinforcement
    /// cannot grow without limit over many iterations.
    pub fn thorough() -> Self {
        Self {
            num_ants: 200,
            iterations: 500,
            beta: 3.0,
            evaporation_rate: 0.1,
            pheromone_bounds: Some((1e-6, 1e3)),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Invalid values are reported, never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.num_ants == 0 {
            return Err(AcoError::config("num_ants must be at least 1"));
        }
        if self.iterations == 0 {
            return Err(AcoError::config("iterations must be at least 1"));
        }
        self.validate_colony()
    }

    /// Validates only the fields a [`Colony`](super::Colony) reads:
    /// exponents, evaporation rate and pheromone bounds.
    pub fn validate_colony(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(AcoError::config(format!(
                "alpha must be finite and positive, got {}",
                self.alpha
            )));
        }
        if !self.beta.is_finite() || self.beta <= 0.0 {
            return Err(AcoError::config(format!(
                "beta must be finite and positive, got {}",
                self.beta
            )));
        }
        if !(0.0..=1.0).contains(&self.evaporation_rate) {
            return Err(AcoError::config(format!(
                "evaporation_rate must be in [0, 1], got {}",
                self.evaporation_rate
            )));
        }
        if let Some((min, max)) = self.pheromone_bounds {
            if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
                return Err(AcoError::config(format!(
                    "pheromone_bounds must satisfy 0 <= min <= max, got ({min}, {max})"
                )));
            }
        }
        Ok(())
    }
}
