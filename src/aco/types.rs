//! Core data types for the ACO engine.
//!
//! [`City`] and [`Tour`] describe the problem and its solutions;
//! [`IterationResult`] and [`BestSolution`] record progress; [`AcoObserver`]
//! is the hook through which callers follow a run.

use super::pheromone::PheromoneStats;

/// A city in the plane. Identified by its position in the input slice.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        City::new(x, y)
    }
}

/// A closed tour: city indices starting and ending at the same city.
///
/// A valid tour over `n` cities has `n + 1` entries and visits every city
/// exactly once apart from the repeated start.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wraps a route. No validation is performed; see
    /// [`is_closed_cycle`](Tour::is_closed_cycle).
    pub fn new(route: Vec<usize>) -> Self {
        Tour(route)
    }

    /// The route as a slice of city indices.
    pub fn cities(&self) -> &[usize] {
        &self.0
    }

    /// Number of entries, including the closing repeat of the start.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the route is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The starting city, if any.
    pub fn start(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// Consecutive `(from, to)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Checks that this is a Hamiltonian cycle over `n` cities.
    pub fn is_closed_cycle(&self, n: usize) -> bool {
        if n == 0 || self.0.len() != n + 1 || self.0.first() != self.0.last() {
            return false;
        }
        let mut seen = vec![false; n];
        for &city in &self.0[..n] {
            if city >= n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }

    /// Consumes the tour and returns the route.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// How a deposit treats the edges of a tour.
///
/// Directed deposits only reinforce `(a, b)` for the traversal `a -> b`.
/// Symmetric deposits also reinforce `(b, a)`. The two converge
/// differently: directed pheromone learns an orientation of the tour,
/// symmetric pheromone learns the undirected edge set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepositPolicy {
    /// Reinforce only the traversed direction.
    #[default]
    Directed,
    /// Reinforce both directions of every traversed edge.
    Symmetric,
}

/// Outcome of one colony iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationResult {
    /// Zero-based iteration index.
    pub iteration: usize,

    /// Shortest tour built in this iteration.
    pub tour: Tour,

    /// Length of `tour`.
    pub length: f64,

    /// Selections made uniformly because the weighted distribution was
    /// degenerate, summed over all ants of the iteration.
    pub fallback_steps: usize,

    /// Pheromone statistics after this iteration's update.
    pub pheromone: PheromoneStats,
}

/// The best tour seen so far.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestSolution {
    /// The tour.
    pub tour: Tour,

    /// Its length.
    pub length: f64,

    /// Iteration in which it was found.
    pub iteration: usize,
}

/// Receives progress notifications from the optimizer.
///
/// All methods default to no-ops.
///
/// ```
/// use u_aco::aco::{AcoObserver, IterationResult};
///
/// struct Printer;
///
/// impl AcoObserver for Printer {
///     fn on_iteration(&mut self, result: &IterationResult, best_length: f64) {
///         println!("iteration {}: best length = {best_length:.2}", result.iteration + 1);
///     }
/// }
/// ```
pub trait AcoObserver {
    /// Called after each completed iteration, once its pheromone update
    /// has been applied.
    fn on_iteration(&mut self, _result: &IterationResult, _best_length: f64) {}

    /// Called when a strictly shorter tour replaces the best solution.
    fn on_improvement(&mut self, _best: &BestSolution) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AcoObserver for NoopObserver {}
