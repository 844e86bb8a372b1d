//! ACO outer loop.
//!
//! [`Optimizer`] owns the distance and pheromone models and repeats colony
//! iterations: construct → update pheromone → record → repeat.
//! [`AcoRunner`] is the one-call entry point.

use super::colony::Colony;
use super::config::AcoConfig;
use super::distance::DistanceModel;
use super::error::{AcoError, Result};
use super::pheromone::PheromoneModel;
use super::types::{AcoObserver, BestSolution, City, IterationResult, NoopObserver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of an ACO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// The shortest tour found across all iterations.
    pub best: BestSolution,

    /// One entry per executed iteration, in order.
    pub history: Vec<IterationResult>,

    /// Best length known at the end of each iteration. Non-increasing.
    pub best_length_history: Vec<f64>,

    /// Total number of iterations executed.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Stateful ACO optimizer for one city set.
///
/// The only state carried between iterations is the pheromone matrix, the
/// iteration counter, the best solution and the history. Calling
/// [`solve`](Optimizer::solve) again continues where the previous call
/// stopped.
///
/// # Usage
///
/// ```
/// use u_aco::aco::{AcoConfig, City, Optimizer};
///
/// let cities = [
///     City::new(0.0, 0.0),
///     City::new(0.0, 10.0),
///     City::new(10.0, 10.0),
///     City::new(10.0, 0.0),
/// ];
/// let config = AcoConfig::fast().with_seed(42);
/// let mut optimizer = Optimizer::new(&cities, config).unwrap();
/// let result = optimizer.solve(20).unwrap();
/// assert!((result.best.length - 40.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer {
    config: AcoConfig,
    seed: u64,
    distances: DistanceModel,
    pheromone: PheromoneModel,
    next_iteration: usize,
    best: Option<BestSolution>,
    history: Vec<IterationResult>,
    best_length_history: Vec<f64>,
}

impl Optimizer {
    /// Validates `config`, then builds the distance and pheromone models.
    ///
    /// Without a configured seed a random one is drawn; it is available
    /// from [`seed`](Optimizer::seed) to reproduce the run.
    pub fn new(cities: &[City], config: AcoConfig) -> Result<Self> {
        config.validate()?;
        let distances = DistanceModel::new(cities)?;
        let pheromone = PheromoneModel::with_policy(distances.len(), config.deposit_policy);
        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            config,
            seed,
            distances,
            pheromone,
            next_iteration: 0,
            best: None,
            history: Vec::new(),
            best_length_history: Vec::new(),
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// The run seed all ant streams derive from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The static distance model.
    pub fn distances(&self) -> &DistanceModel {
        &self.distances
    }

    /// The current pheromone matrix.
    pub fn pheromone(&self) -> &PheromoneModel {
        &self.pheromone
    }

    /// Best solution so far, if any iteration has run.
    pub fn best(&self) -> Option<&BestSolution> {
        self.best.as_ref()
    }

    /// Every iteration result so far.
    pub fn history(&self) -> &[IterationResult] {
        &self.history
    }

    /// Runs `iterations` colony iterations.
    pub fn solve(&mut self, iterations: usize) -> Result<AcoResult> {
        self.solve_with(iterations, &mut NoopObserver, None)
    }

    /// Runs `iterations` colony iterations, notifying `observer` and
    /// honouring an optional cancellation flag.
    ///
    /// The flag is checked between iterations, never during one, and only
    /// once a best solution exists: at least one iteration always completes.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidParameter`] if `iterations` is zero.
    pub fn solve_with<O: AcoObserver + ?Sized>(
        &mut self,
        iterations: usize,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult> {
        if iterations == 0 {
            return Err(AcoError::parameter("iterations must be at least 1"));
        }

        let mut colony = Colony::new(
            &self.distances,
            &mut self.pheromone,
            &self.config,
            self.seed,
        )?;
        let mut cancelled = false;

        for _ in 0..iterations {
            if let Some(ref flag) = cancel {
                if self.best.is_some() && flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let result = colony.run_iteration(self.next_iteration, self.config.num_ants)?;
            self.next_iteration += 1;

            // Ties keep the earlier tour.
            let improved = self
                .best
                .as_ref()
                .is_none_or(|best| result.length < best.length);
            if improved {
                let best = BestSolution {
                    tour: result.tour.clone(),
                    length: result.length,
                    iteration: result.iteration,
                };
                observer.on_improvement(&best);
                self.best = Some(best);
            }

            let best_length = self.best.as_ref().map_or(result.length, |b| b.length);
            self.best_length_history.push(best_length);
            observer.on_iteration(&result, best_length);
            self.history.push(result);
        }

        Ok(AcoResult {
            best: self
                .best
                .clone()
                .expect("at least one iteration has completed"),
            history: self.history.clone(),
            best_length_history: self.best_length_history.clone(),
            iterations: self.next_iteration,
            cancelled,
        })
    }
}

/// Runs the ACO algorithm in one call.
pub struct AcoRunner;

impl AcoRunner {
    /// Solves the tour over `cities` for `config.iterations` iterations.
    pub fn run(cities: &[City], config: &AcoConfig) -> Result<AcoResult> {
        Self::run_with_observer(cities, config, &mut NoopObserver, None)
    }

    /// Like [`run`](Self::run), with an observer and a cancellation flag.
    pub fn run_with_observer<O: AcoObserver + ?Sized>(
        cities: &[City],
        config: &AcoConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult> {
        let mut optimizer = Optimizer::new(cities, config.clone())?;
        optimizer.solve_with(config.iterations, observer, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::DepositPolicy;

    fn square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(0.0, 10.0),
            City::new(10.0, 10.0),
            City::new(10.0, 0.0),
        ]
    }

    fn ring(n: usize) -> Vec<City> {
        (0..n)
            .map(|k| {
                let angle = k as f64 * std::f64::consts::TAU / n as f64;
                City::new(100.0 * angle.cos(), 100.0 * angle.sin())
            })
            .collect()
    }

    #[derive(Default)]
    struct Recorder {
        iterations: Vec<usize>,
        improvements: usize,
    }

    impl AcoObserver for Recorder {
        fn on_iteration(&mut self, result: &IterationResult, _best_length: f64) {
            self.iterations.push(result.iteration);
        }

        fn on_improvement(&mut self, _best: &BestSolution) {
            self.improvements += 1;
        }
    }

    #[test]
    fn test_square_converges_to_perimeter() {
        let config = AcoConfig::default()
            .with_num_ants(10)
            .with_iterations(30)
            .with_seed(42);
        let result = AcoRunner::run(&square(), &config).unwrap();

        assert!(
            (result.best.length - 40.0).abs() < 1e-9,
            "expected 40, got {}",
            result.best.length
        );
        assert!(result.best.tour.is_closed_cycle(4));
        assert_eq!(result.history.len(), 30);
        assert_eq!(result.iterations, 30);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let config = AcoConfig::default()
            .with_num_ants(8)
            .with_iterations(15)
            .with_seed(12345);
        let a = AcoRunner::run(&ring(12), &config).unwrap();
        let b = AcoRunner::run(&ring(12), &config).unwrap();

        assert_eq!(a.history, b.history);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_best_length_non_increasing() {
        let config = AcoConfig::default()
            .with_num_ants(5)
            .with_iterations(40)
            .with_seed(7);
        let result = AcoRunner::run(&ring(15), &config).unwrap();

        assert_eq!(result.best_length_history.len(), 40);
        for window in result.best_length_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best length increased: {} -> {}",
                window[0],
                window[1]
            );
        }
        let last = *result.best_length_history.last().unwrap();
        assert_eq!(last, result.best.length);
    }

    #[test]
    fn test_history_in_iteration_order() {
        let config = AcoConfig::fast().with_iterations(10).with_seed(3);
        let result = AcoRunner::run(&ring(8), &config).unwrap();
        for (i, entry) in result.history.iter().enumerate() {
            assert_eq!(entry.iteration, i);
            assert!(entry.tour.is_closed_cycle(8));
        }
    }

    #[test]
    fn test_ties_keep_earliest_best() {
        let config = AcoConfig::default()
            .with_num_ants(10)
            .with_iterations(25)
            .with_seed(42);
        let result = AcoRunner::run(&square(), &config).unwrap();

        let first = result
            .history
            .iter()
            .position(|r| r.length == result.best.length)
            .unwrap();
        assert_eq!(result.best.iteration, first);
        assert_eq!(result.best.tour, result.history[first].tour);
    }

    #[test]
    fn test_observer_notified() {
        let config = AcoConfig::fast().with_iterations(12).with_seed(5);
        let mut recorder = Recorder::default();
        let result =
            AcoRunner::run_with_observer(&ring(10), &config, &mut recorder, None).unwrap();

        assert_eq!(recorder.iterations, (0..12).collect::<Vec<_>>());
        let strict_drops = 1 + result
            .best_length_history
            .windows(2)
            .filter(|w| w[1] < w[0])
            .count();
        assert_eq!(recorder.improvements, strict_drops);
    }

    #[test]
    fn test_cancellation_stops_after_first_iteration() {
        let config = AcoConfig::fast().with_iterations(100).with_seed(1);
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            AcoRunner::run_with_observer(&ring(6), &config, &mut NoopObserver, Some(cancel))
                .unwrap();

        assert!(result.cancelled);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.history.len(), 1);
    }

    #[test]
    fn test_solve_continues_across_calls() {
        let config = AcoConfig::fast().with_seed(9);
        let mut optimizer = Optimizer::new(&ring(9), config).unwrap();

        optimizer.solve(5).unwrap();
        let result = optimizer.solve(3).unwrap();
        assert_eq!(result.iterations, 8);
        assert_eq!(result.history.len(), 8);
        assert_eq!(result.history[7].iteration, 7);
        assert_eq!(optimizer.history().len(), 8);
    }

    #[test]
    fn test_split_solve_matches_single_solve() {
        let config = AcoConfig::fast().with_seed(77);
        let mut split = Optimizer::new(&ring(10), config.clone()).unwrap();
        split.solve(4).unwrap();
        let split = split.solve(6).unwrap();

        let mut whole = Optimizer::new(&ring(10), config).unwrap();
        let whole = whole.solve(10).unwrap();

        assert_eq!(split.history, whole.history);
    }

    #[test]
    fn test_two_cities() {
        let cities = [City::new(1.0, 1.0), City::new(4.0, 5.0)];
        let config = AcoConfig::fast().with_iterations(3).with_seed(0);
        let result = AcoRunner::run(&cities, &config).unwrap();

        assert!(result.best.tour.is_closed_cycle(2));
        assert!((result.best.length - 10.0).abs() < 1e-12);
        assert!(result.history.iter().all(|r| r.fallback_steps == 0));
    }

    #[test]
    fn test_symmetric_policy_converges() {
        let config = AcoConfig::default()
            .with_num_ants(10)
            .with_iterations(30)
            .with_deposit_policy(DepositPolicy::Symmetric)
            .with_seed(8);
        let result = AcoRunner::run(&square(), &config).unwrap();
        assert!((result.best.length - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_ring_finds_good_tour() {
        let n = 10;
        let config = AcoConfig::default()
            .with_num_ants(20)
            .with_iterations(60)
            .with_seed(2024);
        let result = AcoRunner::run(&ring(n), &config).unwrap();

        // the optimum is the regular polygon perimeter
        let optimum = n as f64 * 2.0 * 100.0 * (std::f64::consts::PI / n as f64).sin();
        assert!(result.best.length >= optimum - 1e-9);
        assert!(
            result.best.length < optimum * 1.1,
            "expected near {optimum}, got {}",
            result.best.length
        );
    }

    #[test]
    fn test_unseeded_run_is_valid() {
        let config = AcoConfig::fast().with_iterations(3);
        let mut optimizer = Optimizer::new(&ring(5), config).unwrap();
        let seed = optimizer.seed();
        let result = optimizer.solve(3).unwrap();
        assert!(result.best.tour.is_closed_cycle(5));

        let replay = AcoRunner::run(&ring(5), &AcoConfig::fast().with_iterations(3).with_seed(seed))
            .unwrap();
        assert_eq!(replay.history, result.history);
    }

    #[test]
    fn test_setup_errors() {
        let config = AcoConfig::default();
        assert_eq!(
            Optimizer::new(&[City::new(0.0, 0.0)], config.clone()).unwrap_err(),
            AcoError::TooFewCities { found: 1 }
        );
        assert!(matches!(
            Optimizer::new(&square(), config.clone().with_beta(-1.0)),
            Err(AcoError::InvalidConfig { .. })
        ));
        assert!(matches!(
            Optimizer::new(&square(), config.clone().with_num_ants(0)),
            Err(AcoError::InvalidConfig { .. })
        ));

        let far = [
            City::new(0.0, 0.0),
            City::new(1e308, 0.0),
            City::new(0.0, 1e308),
        ];
        assert_eq!(
            Optimizer::new(&far, AcoConfig::fast().with_seed(1)).unwrap_err(),
            AcoError::DistanceOverflow
        );

        let mut optimizer = Optimizer::new(&square(), config).unwrap();
        assert!(optimizer.solve(0).is_err());
        assert!(optimizer.best().is_none());
    }
}
