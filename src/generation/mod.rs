//! Core cell sphere generation
//!
//! Samples sites on a sphere, tessellates them through a spherical Voronoi
//! engine and assembles the resulting cells.

mod builder;
mod engine;
mod sampling;

pub use builder::{build_cell_sphere, build_cell_sphere_with};
pub use engine::{ConvexHullVoronoi, SphericalVoronoi, MIN_SITES};
pub use sampling::{
    candidate_count, filter_min_distance, sample_sphere_points, sample_sphere_points_seeded,
};

use crate::cell_sphere::CellSphere;
use crate::config::PlanetConfig;
use crate::error::Result;

/// Generate a cell sphere from configuration
///
/// Sampling is seeded from `config.seed`, so the same configuration always
/// yields the same cells.
pub fn generate_cell_sphere(config: &PlanetConfig) -> Result<CellSphere> {
    // Step 1: Sample separated sites on the sphere
    let points = sample_sphere_points_seeded(
        config.seed,
        config.radius,
        config.density,
        config.min_distance,
    );

    // Step 2: Tessellate and assemble cells
    build_cell_sphere(&points)
}
