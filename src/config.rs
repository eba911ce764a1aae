//! Cell Sphere Configuration and Builder
//!
//! This module provides configuration types for reproducible cell sphere generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};

/// Default sphere radius in world units
pub const DEFAULT_RADIUS: f64 = 5.0;
/// Default number of candidate sites per unit of surface area
pub const DEFAULT_DENSITY: f64 = 0.25;
/// Default minimum distance between two sites
pub const DEFAULT_MIN_DISTANCE: f64 = 1.4;

/// Configuration for cell sphere generation
///
/// The same configuration (including the seed) always produces the same
/// cell sphere.
///
/// # Example
///
/// ```rust
/// use voronoi_cell_sphere::*;
///
/// let config = PlanetConfigBuilder::new()
///     .seed(42)
///     .radius(10.0)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.radius, 10.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetConfig {
    /// Random seed for site sampling
    pub seed: u64,

    /// Sphere radius in world units
    ///
    /// A non-positive radius is allowed and samples no sites.
    pub radius: f64,

    /// Candidate sites per unit of surface area
    ///
    /// The sampler draws roughly `4π·radius²·density` candidates before
    /// filtering, so the final cell count is usually lower.
    pub density: f64,

    /// Minimum Euclidean distance between any two sites
    ///
    /// Candidates closer than this to an already accepted site are dropped.
    pub min_distance: f64,
}

impl PlanetConfig {
    /// Upper bound on the number of sites this configuration can produce
    #[inline]
    pub fn candidate_count(&self) -> usize {
        crate::generation::candidate_count(self.radius, self.density)
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            radius: DEFAULT_RADIUS,
            density: DEFAULT_DENSITY,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }
}

/// Builder for creating PlanetConfig with validation
///
/// # Example
///
/// ```rust
/// use voronoi_cell_sphere::*;
///
/// let config = PlanetConfigBuilder::new()
///     .seed(12345)
///     .density(0.5)
///     .unwrap()
///     .min_distance(0.8)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.seed, 12345);
/// ```
#[derive(Debug, Clone)]
pub struct PlanetConfigBuilder {
    seed: Option<u64>,
    radius: f64,
    density: f64,
    min_distance: f64,
}

impl PlanetConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random
    /// - radius: 5.0
    /// - density: 0.25
    /// - min_distance: 1.4
    pub fn new() -> Self {
        Self {
            seed: None,
            radius: DEFAULT_RADIUS,
            density: DEFAULT_DENSITY,
            min_distance: DEFAULT_MIN_DISTANCE,
        }
    }

    /// Set the random seed for site sampling
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the sphere radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the radius is NaN or infinite
    pub fn radius(mut self, radius: f64) -> Result<Self> {
        self.radius = finite("radius", radius)?;
        Ok(self)
    }

    /// Set the candidate density (candidates per unit of surface area)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the density is NaN or infinite
    pub fn density(mut self, density: f64) -> Result<Self> {
        self.density = finite("density", density)?;
        Ok(self)
    }

    /// Set the minimum distance between sites
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the distance is NaN, infinite or negative
    pub fn min_distance(mut self, min_distance: f64) -> Result<Self> {
        let min_distance = finite("min_distance", min_distance)?;
        if min_distance < 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "min_distance must be >= 0 (got {})",
                min_distance
            )));
        }
        self.min_distance = min_distance;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random seed is drawn.
    pub fn build(self) -> Result<PlanetConfig> {
        Ok(PlanetConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            radius: self.radius,
            density: self.density,
            min_distance: self.min_distance,
        })
    }
}

impl Default for PlanetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(VoronoiError::InvalidConfig(format!(
            "{} must be finite (got {})",
            name, value
        )))
    }
}
