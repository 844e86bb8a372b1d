//! One colony iteration: construct, pick the best, update pheromone.

use super::config::AcoConfig;
use super::construct::TourConstructor;
use super::distance::DistanceModel;
use super::error::{AcoError, Result};
use super::pheromone::PheromoneModel;
use super::types::{IterationResult, Tour};
use crate::random::{create_rng, derive_seed};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A tour built by one ant.
#[derive(Debug, Clone)]
struct AntTour {
    tour: Tour,
    length: f64,
    fallback_steps: usize,
}

/// Runs colony iterations against borrowed distance and pheromone models.
///
/// Every ant in an iteration reads the pheromone matrix as it stood when
/// the iteration began; the matrix is written exactly once, after all ants
/// have finished.
#[derive(Debug)]
pub struct Colony<'a> {
    distances: &'a DistanceModel,
    pheromone: &'a mut PheromoneModel,
    alpha: f64,
    beta: f64,
    evaporation_rate: f64,
    pheromone_bounds: Option<(f64, f64)>,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
    seed: u64,
}

impl<'a> Colony<'a> {
    /// Creates a colony. `seed` is the run seed every ant stream derives from.
    ///
    /// # Errors
    ///
    /// Fails if the exponents, evaporation rate or pheromone bounds in
    /// `config` are invalid, or the models disagree on city count. The ant
    /// and iteration counts are not read here.
    pub fn new(
        distances: &'a DistanceModel,
        pheromone: &'a mut PheromoneModel,
        config: &AcoConfig,
        seed: u64,
    ) -> Result<Self> {
        config.validate_colony()?;
        if distances.len() != pheromone.len() {
            return Err(AcoError::parameter(format!(
                "distance model has {} cities but pheromone model has {}",
                distances.len(),
                pheromone.len()
            )));
        }
        Ok(Self {
            distances,
            pheromone,
            alpha: config.alpha,
            beta: config.beta,
            evaporation_rate: config.evaporation_rate,
            pheromone_bounds: config.pheromone_bounds,
            parallel: config.parallel,
            seed,
        })
    }

    /// Current pheromone state.
    pub fn pheromone(&self) -> &PheromoneModel {
        &*self.pheromone
    }

    /// Runs one iteration with `num_ants` ants.
    ///
    /// Each ant starts from a uniformly random city. The returned tour is the
    /// shortest of the batch; on ties the lowest ant index wins.
    pub fn run_iteration(&mut self, iteration: usize, num_ants: usize) -> Result<IterationResult> {
        if num_ants == 0 {
            return Err(AcoError::parameter("num_ants must be at least 1"));
        }

        let constructor =
            TourConstructor::new(self.distances, &*self.pheromone, self.alpha, self.beta)?;
        let ants = self.construct_batch(&constructor, iteration, num_ants)?;

        let mut best = 0;
        for (i, ant) in ants.iter().enumerate() {
            if ant.length < ants[best].length {
                best = i;
            }
        }
        let fallback_steps: usize = ants.iter().map(|a| a.fallback_steps).sum();
        let length = ants[best].length;
        let tour = ants[best].tour.clone();

        let (tours, lengths): (Vec<Tour>, Vec<f64>) =
            ants.into_iter().map(|a| (a.tour, a.length)).unzip();
        self.pheromone.update(&tours, &lengths, self.evaporation_rate)?;
        if let Some((min, max)) = self.pheromone_bounds {
            self.pheromone.clamp(min, max)?;
        }

        Ok(IterationResult {
            iteration,
            tour,
            length,
            fallback_steps,
            pheromone: self.pheromone.stats(),
        })
    }

    fn construct_batch(
        &self,
        constructor: &TourConstructor<'_>,
        iteration: usize,
        num_ants: usize,
    ) -> Result<Vec<AntTour>> {
        #[cfg(feature = "parallel")]
        let ants: Result<Vec<AntTour>> = if self.parallel {
            (0..num_ants)
                .into_par_iter()
                .map(|ant| self.run_ant(constructor, iteration, ant))
                .collect()
        } else {
            (0..num_ants)
                .map(|ant| self.run_ant(constructor, iteration, ant))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let ants: Result<Vec<AntTour>> = (0..num_ants)
            .map(|ant| self.run_ant(constructor, iteration, ant))
            .collect();

        ants
    }

    fn run_ant(
        &self,
        constructor: &TourConstructor<'_>,
        iteration: usize,
        ant: usize,
    ) -> Result<AntTour> {
        let mut rng = create_rng(derive_seed(self.seed, iteration, ant));
        let start = rng.random_range(0..self.distances.len());
        let (tour, fallback_steps) = constructor.construct_traced(start, &mut rng)?;
        let length = self.distances.tour_length(&tour);
        Ok(AntTour {
            tour,
            length,
            fallback_steps,
        })
    }
}
