//! Voronoi Cell Structure
//!
//! Represents one cell of a cell sphere: its site, boundary polygon and neighbors.

use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single Voronoi cell on the sphere surface
///
/// Each cell represents the region of the sphere closer to its site than to
/// any other site:
/// - `site` is the generating point
/// - `boundary` is the cell outline, in traversal order
/// - `neighbors` are indices of cells sharing a boundary edge
///
/// A cell's own index is its position in [`CellSphere::cells`](crate::CellSphere::cells).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Generating point of the cell, on the sphere surface
    pub site: DVec3,

    /// Vertices of the cell boundary polygon
    ///
    /// The polygon is closed implicitly: the last vertex connects back to the
    /// first. Order is the traversal order of the outline and is never sorted.
    pub boundary: Vec<DVec3>,

    /// Indices of adjacent cells, ascending and without duplicates
    ///
    /// Adjacency is symmetric across the whole cell sphere.
    pub neighbors: Vec<usize>,
}

impl Cell {
    /// Create a new cell
    ///
    /// This is typically called by the builder, not by user code.
    pub fn new(site: DVec3, boundary: Vec<DVec3>, neighbors: Vec<usize>) -> Self {
        Self {
            site,
            boundary,
            neighbors,
        }
    }

    /// Get the number of neighboring cells
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if the cell at `other` shares an edge with this cell
    #[inline]
    pub fn is_neighbor_of(&self, other: usize) -> bool {
        self.neighbors.binary_search(&other).is_ok()
    }

    /// Get the vertex count (polygon complexity)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.boundary.len()
    }

    /// Approximate surface area of this cell
    ///
    /// Sums the flat triangles fanned out from the site, so it slightly
    /// underestimates the spherical area.
    pub fn approximate_area(&self) -> f64 {
        if self.boundary.len() < 3 {
            return 0.0;
        }

        (0..self.boundary.len())
            .map(|i| {
                let v1 = self.boundary[i] - self.site;
                let v2 = self.boundary[(i + 1) % self.boundary.len()] - self.site;
                v1.cross(v2).length() * 0.5
            })
            .sum()
    }

    /// Great circle distance between this cell's site and another's
    pub fn arc_distance_to(&self, other: &Cell, sphere_radius: f64) -> f64 {
        let cos_angle = self.site.dot(other.site) / (self.site.length() * other.site.length());
        sphere_radius * cos_angle.clamp(-1.0, 1.0).acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_creation() {
        let cell = Cell::new(
            DVec3::new(1.0, 0.0, 0.0),
            vec![
                DVec3::new(1.0, 0.1, 0.1),
                DVec3::new(1.0, 0.1, -0.1),
                DVec3::new(1.0, -0.1, 0.0),
            ],
            vec![1, 2, 3],
        );

        assert_eq!(cell.neighbor_count(), 3);
        assert_eq!(cell.vertex_count(), 3);
        assert!(cell.is_neighbor_of(1));
        assert!(!cell.is_neighbor_of(99));
    }

    #[test]
    fn test_approximate_area() {
        let cell = Cell::new(
            DVec3::new(10.0, 0.0, 0.0),
            vec![
                DVec3::new(10.0, 1.0, 0.0),
                DVec3::new(10.0, 0.0, 1.0),
                DVec3::new(10.0, -1.0, 0.0),
                DVec3::new(10.0, 0.0, -1.0),
            ],
            vec![],
        );

        // A unit-diagonal square: four right triangles of area 0.5
        assert!((cell.approximate_area() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_area() {
        let cell = Cell::new(DVec3::X, vec![DVec3::Y], vec![]);
        assert_eq!(cell.approximate_area(), 0.0);
    }

    #[test]
    fn test_arc_distance_to() {
        let a = Cell::new(DVec3::new(10.0, 0.0, 0.0), vec![], vec![]);
        let b = Cell::new(DVec3::new(0.0, 10.0, 0.0), vec![], vec![]);

        let distance = a.arc_distance_to(&b, 10.0);
        assert!((distance - 10.0 * std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }
}
