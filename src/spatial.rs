//! Spatial indexing for fast position-to-cell lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::DVec3;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// KD-tree over cell sites
///
/// Nearest-site lookups are O(log n). On the sphere surface the nearest site
/// is the site of the Voronoi cell containing the query point.
///
/// # Performance
///
/// - Construction: O(n log n), done once when a cell sphere is built
/// - Query: O(log n)
/// - Memory: one `[f64; 3]` plus an index per site
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 3, 32>,
}

impl SpatialIndex {
    /// Build a spatial index from cell sites
    ///
    /// Item `i` of the tree is `sites[i]`, so lookups return indices into the
    /// same slice.
    ///
    /// # Arguments
    ///
    /// * `sites` - Cell site positions, in cell order
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_cell_sphere::SpatialIndex;
    /// use glam::DVec3;
    ///
    /// let sites = vec![
    ///     DVec3::new(1.0, 0.0, 0.0),
    ///     DVec3::new(0.0, 1.0, 0.0),
    ///     DVec3::new(0.0, 0.0, 1.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&sites);
    /// assert_eq!(index.find_nearest(DVec3::new(1.0, 0.1, 0.0)), 0);
    /// ```
    pub fn new(sites: &[DVec3]) -> Self {
        let points: Vec<[f64; 3]> = sites.iter().map(|s| s.to_array()).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the site nearest to `position`
    ///
    /// # Arguments
    ///
    /// * `position` - 3D position to query
    ///
    /// # Returns
    ///
    /// Index into the slice the index was built from. Ties go to whichever
    /// site the tree reaches first.
    pub fn find_nearest(&self, position: DVec3) -> usize {
        let result = self.tree.nearest_one::<SquaredEuclidean>(&position.to_array());
        result.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let sites = vec![
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(-1.0, 0.0, 0.0),
        ];

        let index = SpatialIndex::new(&sites);

        assert_eq!(index.find_nearest(DVec3::new(0.9, 0.1, 0.0)), 0);
        assert_eq!(index.find_nearest(DVec3::new(0.0, 0.95, 0.0)), 1);
        assert_eq!(index.find_nearest(DVec3::new(0.0, 0.1, 0.9)), 2);
        assert_eq!(index.find_nearest(DVec3::new(-0.8, 0.0, 0.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let sites = vec![DVec3::new(10.0, 0.0, 0.0), DVec3::new(0.0, 10.0, 0.0)];

        let index = SpatialIndex::new(&sites);

        assert_eq!(index.find_nearest(sites[0]), 0);
        assert_eq!(index.find_nearest(sites[1]), 1);
    }
}
