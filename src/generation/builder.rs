//! Cell sphere assembly from a spherical Voronoi engine
//!
//! Sites are projected to geographic coordinates, tessellated by the engine,
//! and mapped back onto the sphere with the radius of the first site.

use glam::DVec3;
use std::collections::BTreeSet;

use crate::cell::Cell;
use crate::cell_sphere::CellSphere;
use crate::error::{Result, VoronoiError};
use crate::generation::engine::{ConvexHullVoronoi, SphericalVoronoi, MIN_SITES};
use crate::geo::{to_geo, to_point3d, GeoCoordinate, EPSILON};
use crate::interchange::site_collection;

/// Build a cell sphere from co-spherical sites with the default engine
///
/// # Errors
///
/// - `EmptyInput` for an empty slice
/// - `DegenerateInput` for fewer than 4 sites, a zero-length first site, or
///   sites the engine cannot tessellate (duplicates, all coplanar)
/// - `GenerationFailed` if the engine fails internally
///
/// # Example
///
/// ```rust
/// use voronoi_cell_sphere::*;
/// use glam::DVec3;
///
/// let sites = vec![
///     DVec3::new(1.0, 1.0, 1.0),
///     DVec3::new(1.0, -1.0, -1.0),
///     DVec3::new(-1.0, 1.0, -1.0),
///     DVec3::new(-1.0, -1.0, 1.0),
/// ];
/// let sphere = build_cell_sphere(&sites).unwrap();
/// assert_eq!(sphere.len(), 4);
/// ```
pub fn build_cell_sphere(points: &[DVec3]) -> Result<CellSphere> {
    build_cell_sphere_with(&ConvexHullVoronoi, points)
}

/// Build a cell sphere using any spherical Voronoi engine
///
/// Cells keep the input order. Boundaries keep the engine's ring order, minus
/// the closing repeat of the first position. Each link is inserted in both
/// directions, so adjacency is symmetric whatever the engine reports.
pub fn build_cell_sphere_with<E>(engine: &E, points: &[DVec3]) -> Result<CellSphere>
where
    E: SphericalVoronoi + ?Sized,
{
    let first = points.first().ok_or(VoronoiError::EmptyInput)?;
    let radius = first.length();
    if !radius.is_finite() || radius < EPSILON {
        return Err(VoronoiError::DegenerateInput(format!(
            "first site has unusable radius {}",
            radius
        )));
    }
    if points.len() < MIN_SITES {
        return Err(VoronoiError::DegenerateInput(format!(
            "need at least {} sites, got {}",
            MIN_SITES,
            points.len()
        )));
    }

    let coordinates: Vec<GeoCoordinate> = points.iter().map(|&p| to_geo(p)).collect();
    let features = engine.polygons(&site_collection(&coordinates))?;

    let mut slots: Vec<Option<Cell>> = vec![None; points.len()];
    for polygon in &features.polygons {
        let index = polygon.properties.index;
        let slot = slots.get_mut(index).ok_or_else(|| {
            VoronoiError::GenerationFailed(format!("polygon references unknown site {}", index))
        })?;
        if slot.is_some() {
            return Err(VoronoiError::GenerationFailed(format!(
                "site {} has more than one polygon",
                index
            )));
        }

        let site = to_point3d(polygon.properties.site.coordinate(), radius);
        let boundary = polygon
            .open_ring()
            .iter()
            .map(|&position| to_point3d(GeoCoordinate::from(position), radius))
            .collect();
        *slot = Some(Cell::new(site, boundary, Vec::new()));
    }

    let mut neighbor_sets: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); points.len()];
    for link in &features.links {
        let (source, target) = (link.source, link.target);
        if source >= points.len() || target >= points.len() {
            return Err(VoronoiError::GenerationFailed(format!(
                "link {} -> {} references an unknown site",
                source, target
            )));
        }
        if source == target {
            continue;
        }
        neighbor_sets[source].insert(target);
        neighbor_sets[target].insert(source);
    }

    let cells = slots
        .into_iter()
        .zip(neighbor_sets)
        .enumerate()
        .map(|(index, (slot, neighbors))| {
            let mut cell = slot.ok_or_else(|| {
                VoronoiError::GenerationFailed(format!("no polygon for site {}", index))
            })?;
            cell.neighbors = neighbors.into_iter().collect();
            Ok(cell)
        })
        .collect::<Result<Vec<Cell>>>()?;

    tracing::debug!(cells = cells.len(), radius, "built cell sphere");
    Ok(CellSphere::new(radius, cells))
}
