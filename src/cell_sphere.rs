//! CellSphere: the assembled tessellation

use std::collections::{HashSet, VecDeque};
use std::fmt;

use crate::cell::Cell;
use crate::error::{Result, VoronoiError};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;
#[cfg(feature = "spatial-index")]
use glam::DVec3;

/// A sphere partitioned into Voronoi cells
///
/// Built once by [`build_cell_sphere`](crate::build_cell_sphere) and immutable
/// afterwards. Cell indices are stable and are what `Cell::neighbors` refers to.
///
/// # Examples
///
/// ```
/// use voronoi_cell_sphere::*;
///
/// let config = PlanetConfigBuilder::new().seed(42).build().unwrap();
/// let sphere = generate_cell_sphere(&config).unwrap();
///
/// for (index, cell) in sphere.iter().enumerate() {
///     for &neighbor in &cell.neighbors {
///         assert!(sphere.neighbors(neighbor).contains(&index));
///     }
/// }
/// ```
#[derive(Clone)]
pub struct CellSphere {
    radius: f64,

    /// All cells (indexed by cell index)
    cells: Vec<Cell>,

    /// Spatial index over cell sites (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl CellSphere {
    pub(crate) fn new(radius: f64, cells: Vec<Cell>) -> Self {
        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let sites: Vec<DVec3> = cells.iter().map(|c| c.site).collect();
            SpatialIndex::new(&sites)
        };

        Self {
            radius,
            cells,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    /// Sphere radius, taken from the first site
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a cell by index
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Get a cell by index, or `CellNotFound`
    pub fn cell(&self, index: usize) -> Result<&Cell> {
        self.cells
            .get(index)
            .ok_or(VoronoiError::CellNotFound(index))
    }

    /// All cells as a slice
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Neighbor indices of a cell
    ///
    /// Returns an empty slice if the index is invalid.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.cells
            .get(index)
            .map(|c| c.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Find the cell whose site is nearest to `position` (requires spatial-index feature)
    ///
    /// For a position on the sphere surface this is the cell containing it.
    ///
    /// # Arguments
    ///
    /// * `position` - 3D query position, usually on the sphere surface
    ///
    /// # Returns
    ///
    /// Index of the containing cell.
    ///
    /// # Performance
    ///
    /// O(log n) through the KD-tree built alongside the cells.
    ///
    /// # Example
    ///
    /// ```
    /// # use voronoi_cell_sphere::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let points = sample_sphere_points_seeded(3, 5.0, 0.25, 1.4);
    /// let sphere = build_cell_sphere(&points).unwrap();
    ///
    /// let north = sphere.find_cell_at(DVec3::new(0.0, 5.0, 0.0));
    /// assert!(north < sphere.len());
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: DVec3) -> usize {
        self.spatial_index.find_nearest(position)
    }

    /// Cells reachable within `hops` neighbor steps of `center` (BFS)
    ///
    /// # Arguments
    ///
    /// * `center` - Starting cell index
    /// * `hops` - Maximum number of neighbor steps (0 = just the center cell)
    ///
    /// # Returns
    ///
    /// Cell indices in BFS order, starting with `center`. Returns an empty
    /// vec if `center` is invalid.
    ///
    /// # Performance
    ///
    /// Visits each reached cell once, so the cost grows with the size of the
    /// returned neighborhood rather than with the whole sphere.
    pub fn cells_within_hops(&self, center: usize, hops: usize) -> Vec<usize> {
        if center >= self.cells.len() {
            return vec![];
        }

        let mut visited = HashSet::from([center]);
        let mut order = vec![center];
        let mut queue = VecDeque::from([(center, 0usize)]);

        while let Some((index, depth)) = queue.pop_front() {
            if depth == hops {
                continue;
            }
            for &neighbor in self.neighbors(index) {
                if visited.insert(neighbor) {
                    order.push(neighbor);
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }

        order
    }
}

impl fmt::Debug for CellSphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellSphere")
            .field("radius", &self.radius)
            .field("cells", &self.cells.len())
            .finish()
    }
}

impl<'a> IntoIterator for &'a CellSphere {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
