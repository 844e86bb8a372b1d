//! Static distance and heuristic matrices.

use super::error::{AcoError, Result};
use super::types::{City, Tour};

/// Added to every distance before inversion.
///
/// Only matters on the diagonal and for coincident cities; self-loops are
/// already excluded by visited masking during construction.
pub const HEURISTIC_EPSILON: f64 = 1e-10;

/// Precomputed pairwise Euclidean distances and inverse-distance
/// desirability for a fixed city set.
///
/// Both matrices are stored row-major and never change after construction.
#[derive(Debug, Clone)]
pub struct DistanceModel {
    cities: Vec<City>,
    n: usize,
    distances: Vec<f64>,
    heuristic: Vec<f64>,
}

impl DistanceModel {
    /// Builds the matrices for `cities`.
    ///
    /// # Errors
    ///
    /// - [`AcoError::TooFewCities`] for fewer than two cities
    /// - [`AcoError::MalformedCity`] for a non-finite coordinate
    /// - [`AcoError::DistanceOverflow`] when a distance, or a tour of
    ///   `len()` maximal edges, is not finite
    /// - [`AcoError::DegenerateCities`] when every city is at the same point
    pub fn new(cities: &[City]) -> Result<Self> {
        let n = cities.len();
        if n < 2 {
            return Err(AcoError::TooFewCities { found: n });
        }
        if let Some(index) = cities
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(AcoError::MalformedCity { index });
        }

        let mut distances = vec![0.0; n * n];
        let mut heuristic = vec![0.0; n * n];
        let mut max_distance = 0.0f64;
        for i in 0..n {
            for j in 0..n {
                let d = if i == j {
                    0.0
                } else {
                    cities[i].distance_to(&cities[j])
                };
                if !d.is_finite() {
                    return Err(AcoError::DistanceOverflow);
                }
                max_distance = max_distance.max(d);
                distances[i * n + j] = d;
                heuristic[i * n + j] = 1.0 / (d + HEURISTIC_EPSILON);
            }
        }
        if max_distance == 0.0 {
            return Err(AcoError::DegenerateCities);
        }
        // Bounds every tour length from above.
        if !(max_distance * n as f64).is_finite() {
            return Err(AcoError::DistanceOverflow);
        }

        Ok(Self {
            cities: cities.to_vec(),
            n,
            distances,
            heuristic,
        })
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false; a model holds at least two cities.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The cities this model was built from.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Euclidean distance between cities `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.n + j]
    }

    /// Heuristic desirability of moving from `i` to `j`.
    #[inline]
    pub fn heuristic(&self, i: usize, j: usize) -> f64 {
        self.heuristic[i * self.n + j]
    }

    /// Row `i` of the heuristic matrix.
    pub(crate) fn heuristic_row(&self, i: usize) -> &[f64] {
        &self.heuristic[i * self.n..(i + 1) * self.n]
    }

    /// Sum of edge distances along `tour`, including the closing edge.
    ///
    /// # Panics
    ///
    /// Panics if the tour references a city index `>= len()`.
    pub fn tour_length(&self, tour: &Tour) -> f64 {
        tour.edges().map(|(a, b)| self.distance(a, b)).sum()
    }
}
