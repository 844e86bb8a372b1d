//! Error type for the ACO engine.

use thiserror::Error;

/// Result alias for ACO operations.
pub type Result<T> = std::result::Result<T, AcoError>;

/// Errors reported by the ACO engine.
///
/// Configuration problems are reported at setup and are never silently
/// clamped. A degenerate selection distribution during construction is not
/// an error; it is resolved by the uniform fallback in
/// [`TourConstructor`](super::TourConstructor).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// An algorithm parameter is outside its valid range.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// A TSP instance needs at least two cities.
    #[error("at least 2 cities are required, got {found}")]
    TooFewCities {
        /// Number of cities supplied.
        found: usize,
    },

    /// A city has a NaN or infinite coordinate.
    #[error("city {index} has a non-finite coordinate")]
    MalformedCity {
        /// Index of the offending city.
        index: usize,
    },

    /// Cities lie so far apart that a distance or a tour length overflows.
    #[error("distances between cities overflow; coordinates span too large a range")]
    DistanceOverflow,

    /// Every city sits on the same point, so every tour has length zero.
    #[error("all cities coincide; tour lengths would be zero")]
    DegenerateCities,

    /// A runtime argument passed to a model operation is invalid.
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        /// What is wrong with the argument.
        message: String,
    },
}

impl AcoError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        AcoError::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn parameter(message: impl Into<String>) -> Self {
        AcoError::InvalidParameter {
            message: message.into(),
        }
    }
}
