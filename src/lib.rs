//! Ant Colony Optimization for the Euclidean Traveling Salesman Problem.
//!
//! - **ACO engine** ([`aco`]): distance and heuristic matrices, the pheromone
//!   model, probabilistic tour construction, the per-iteration colony and the
//!   outer optimizer loop.
//! - **Randomness** ([`random`]): seeded generators and per-ant stream
//!   derivation, so a fixed seed reproduces a run exactly, with or without
//!   the `parallel` feature.
//!
//! # Quick start
//!
//! ```
//! use u_aco::aco::{AcoConfig, AcoRunner, City};
//!
//! let cities: Vec<City> = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]
//!     .into_iter()
//!     .map(City::from)
//!     .collect();
//!
//! let config = AcoConfig::fast().with_seed(42);
//! let result = AcoRunner::run(&cities, &config).unwrap();
//!
//! assert!((result.best.length - 40.0).abs() < 1e-9);
//! assert_eq!(result.history.len(), config.iterations);
//! ```
//!
//! # Features
//!
//! - `parallel`: construct the ants of an iteration on rayon workers
//! - `serde`: `Serialize`/`Deserialize` for cities, tours, results and config
//!
//! City generation, plotting and progress printing are left to callers;
//! progress can be followed through [`aco::AcoObserver`].

pub mod aco;
pub mod random;
