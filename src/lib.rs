//! Spherical Voronoi cell planets
//!
//! Samples well-separated random sites on a sphere, partitions the sphere into
//! Voronoi cells and exposes the result as an immutable [`CellSphere`]. A thin,
//! engine-agnostic render layer turns a cell sphere into point, line and mesh
//! data and drives a spinning planet inside any host scene graph.
//!
//! # Quick Start
//!
//! ```rust
//! use voronoi_cell_sphere::*;
//!
//! let config = PlanetConfigBuilder::new()
//!     .seed(42)
//!     .radius(5.0)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let sphere = generate_cell_sphere(&config).unwrap();
//! println!("Generated {} cells", sphere.len());
//!
//! let visual = PlanetVisual::from_cell_sphere(&sphere, &RenderStyle::default());
//! assert_eq!(visual.outlines.len(), sphere.len());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-cell lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, cells and geographic features

// Modules
pub mod error;
pub mod config;
pub mod geo;
pub mod interchange;
pub mod cell;
pub mod cell_sphere;
pub mod generation;
pub mod render;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use config::{PlanetConfig, PlanetConfigBuilder};
pub use geo::{to_geo, to_point3d, GeoCoordinate, EPSILON};
pub use cell::Cell;
pub use cell_sphere::CellSphere;
pub use generation::{
    build_cell_sphere, build_cell_sphere_with, filter_min_distance, generate_cell_sphere,
    sample_sphere_points, sample_sphere_points_seeded, ConvexHullVoronoi, SphericalVoronoi,
};
pub use render::{PlanetComponent, PlanetVisual, RenderStyle, SceneHost};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec3 for convenience
pub use glam::DVec3;
