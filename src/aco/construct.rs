//! Probabilistic tour construction for a single ant.

use super::distance::DistanceModel;
use super::error::{AcoError, Result};
use super::pheromone::PheromoneModel;
use super::types::Tour;
use rand::Rng;

/// Builds tours from a read-only view of the pheromone and heuristic
/// matrices.
///
/// From the current city `i`, an unvisited city `j` is chosen with
/// probability proportional to `tau(i,j)^alpha * eta(i,j)^beta`. Visited
/// cities, including `i` itself, get weight zero.
///
/// If the weights of all unvisited cities sum to zero or to a non-finite
/// value (for example after pheromone underflows), the step falls back to a
/// uniform choice over the unvisited cities. Construction therefore always
/// yields a valid tour.
#[derive(Debug, Clone, Copy)]
pub struct TourConstructor<'a> {
    distances: &'a DistanceModel,
    pheromone: &'a PheromoneModel,
    alpha: f64,
    beta: f64,
}

impl<'a> TourConstructor<'a> {
    /// Creates a constructor over the given matrices.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidParameter`] if the matrices disagree on the
    /// number of cities.
    pub fn new(
        distances: &'a DistanceModel,
        pheromone: &'a PheromoneModel,
        alpha: f64,
        beta: f64,
    ) -> Result<Self> {
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
            alpha,
            beta,
        })
    }

    /// Builds one closed tour starting at `start`.
    pub fn construct<R: Rng + ?Sized>(&self, start: usize, rng: &mut R) -> Result<Tour> {
        self.construct_traced(start, rng).map(|(tour, _)| tour)
    }

    /// Like [`construct`](Self::construct), also returning how many steps
    /// used the uniform fallback.
    pub fn construct_traced<R: Rng + ?Sized>(
        &self,
        start: usize,
        rng: &mut R,
    ) -> Result<(Tour, usize)> {
        let n = self.distances.len();
        if start >= n {
            return Err(AcoError::parameter(format!(
                "start city {start} out of range for {n} cities"
            )));
        }

        let mut visited = vec![false; n];
        visited[start] = true;
        let mut route = Vec::with_capacity(n + 1);
        route.push(start);

        let mut weights = vec![0.0; n];
        let mut fallback_steps = 0;
        let mut current = start;

        for remaining in (1..n).rev() {
            let next = if remaining == 1 {
                // Only one choice left: take it without drawing.
                visited
                    .iter()
                    .position(|&v| !v)
                    .expect("one unvisited city must remain")
            } else {
                let sum = self.fill_weights(current, &visited, &mut weights);
                if sum > 0.0 && sum.is_finite() {
                    sample_weighted(&weights, sum, rng)
                } else {
                    fallback_steps += 1;
                    sample_uniform(&visited, remaining, rng)
                }
            };

            route.push(next);
            visited[next] = true;
            current = next;
        }

        route.push(start);
        Ok((Tour::new(route), fallback_steps))
    }

    /// Selection probabilities from `current` given the visited mask.
    ///
    /// Visited cities get probability zero. Uses the same uniform fallback
    /// as construction when the weights are degenerate. Returns all zeros
    /// if every city is visited.
    pub fn probabilities(&self, current: usize, visited: &[bool]) -> Result<Vec<f64>> {
        let n = self.distances.len();
        if current >= n || visited.len() != n {
            return Err(AcoError::parameter(format!(
                "city {current} with a visited mask of {} entries is invalid for {n} cities",
                visited.len()
            )));
        }

        let mut weights = vec![0.0; n];
        let sum = self.fill_weights(current, visited, &mut weights);
        if sum > 0.0 && sum.is_finite() {
            for w in &mut weights {
                *w /= sum;
            }
            return Ok(weights);
        }

        let unvisited = visited.iter().filter(|&&v| !v).count();
        if unvisited == 0 {
            return Ok(vec![0.0; n]);
        }
        let p = 1.0 / unvisited as f64;
        Ok(visited
            .iter()
            .map(|&v| if v { 0.0 } else { p })
            .collect())
    }

    /// Writes unnormalized weights into `weights` and returns their sum.
    fn fill_weights(&self, current: usize, visited: &[bool], weights: &mut [f64]) -> f64 {
        let tau = self.pheromone.row(current);
        let eta = self.distances.heuristic_row(current);

        let mut sum = 0.0;
        for (j, w) in weights.iter_mut().enumerate() {
            *w = if visited[j] {
                0.0
            } else {
                tau[j].powf(self.alpha) * eta[j].powf(self.beta)
            };
            sum += *w;
        }
        sum
    }
}

/// Roulette-wheel draw over positive weights with a precomputed finite sum.
fn sample_weighted<R: Rng + ?Sized>(weights: &[f64], sum: f64, rng: &mut R) -> usize {
    let target = rng.random::<f64>() * sum;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (j, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = j;
        if target < cumulative {
            return j;
        }
    }
    // Rounding can leave `target` a hair above the final cumulative sum.
    last_positive
}

/// Uniform draw over the `unvisited` cities not yet marked in `visited`.
fn sample_uniform<R: Rng + ?Sized>(visited: &[bool], unvisited: usize, rng: &mut R) -> usize {
    let pick = rng.random_range(0..unvisited);
    visited
        .iter()
        .enumerate()
        .filter(|&(_, &v)| !v)
        .nth(pick)
        .map(|(j, _)| j)
        .expect("pick is below the number of unvisited cities")
}
