//! Ant Colony Optimization (ACO) for the Euclidean TSP.
//!
//! A colony of ants repeatedly builds closed tours. Each step picks the next
//! city with probability proportional to `pheromone^alpha * heuristic^beta`,
//! where the heuristic is inverse distance. After every iteration the
//! pheromone evaporates and each tour deposits `1/length` along its edges,
//! steering later ants towards shorter tours.
//!
//! # Key Types
//!
//! - [`DistanceModel`]: static distance and heuristic matrices
//! - [`PheromoneModel`]: mutable pheromone matrix
//! - [`TourConstructor`]: one ant's probabilistic tour construction
//! - [`Colony`]: one iteration over all ants plus the pheromone update
//! - [`Optimizer`] / [`AcoRunner`]: the outer loop
//! - [`AcoConfig`]: algorithm parameters
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*
//! - Stützle & Hoos (2000), "MAX–MIN Ant System" (pheromone bounds)

mod colony;
mod config;
mod construct;
mod distance;
mod error;
mod pheromone;
mod runner;
mod types;

pub use colony::Colony;
pub use config::AcoConfig;
pub use construct::TourConstructor;
pub use distance::{DistanceModel, HEURISTIC_EPSILON};
pub use error::{AcoError, Result};
pub use pheromone::{PheromoneModel, PheromoneStats};
pub use runner::{AcoResult, AcoRunner, Optimizer};
pub use types::{
    AcoObserver, BestSolution, City, DepositPolicy, IterationResult, NoopObserver, Tour,
};
