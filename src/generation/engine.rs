//! Spherical Voronoi engines
//!
//! An engine turns geographic site features into one polygon feature per
//! site plus the links between sites whose cells share an edge. The builder
//! only talks to the [`SphericalVoronoi`] trait, so any engine that honours
//! that contract can be swapped in.
//!
//! The default engine relies on the fact that for points on a sphere the
//! Delaunay triangulation is the 3D convex hull. Each hull face then yields one
//! Voronoi vertex (its outward normal pushed to the sphere surface).

use glam::DVec3;
use parry3d::math::Point;
use parry3d::transformation;
use std::collections::BTreeMap;

use crate::error::{Result, VoronoiError};
use crate::geo::{to_geo, to_point3d, EPSILON};
use crate::interchange::{LinkFeature, PolygonFeature, SiteFeature, SiteRef, VoronoiFeatures};

/// Fewest sites that enclose a volume, and so can be tessellated by a hull
pub const MIN_SITES: usize = 4;

/// Sites closer than this on the unit sphere count as duplicates
const DUPLICATE_TOLERANCE: f64 = 1e-6;

/// Hull vertices may drift this far from their site after the f32 round trip
const HULL_MATCH_TOLERANCE: f64 = 1e-4;

/// Orientation values at or below this are treated as co-circular
const FLIP_TOLERANCE: f64 = 1e-14;

/// A spherical Voronoi capability
///
/// Given sites as geographic point features, an implementation must return
/// one polygon per site (a closed ring in geographic coordinates, carrying the
/// site's index and coordinate) and the links between sites whose cells share
/// a boundary edge. Ring order is the cell's drawable outline and is kept
/// as-is by the caller.
pub trait SphericalVoronoi {
    fn polygons(&self, sites: &[SiteFeature]) -> Result<VoronoiFeatures>;
}

/// Default engine: Delaunay triangulation via convex hull, Voronoi vertices from
/// hull face normals
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvexHullVoronoi;

impl SphericalVoronoi for ConvexHullVoronoi {
    fn polygons(&self, sites: &[SiteFeature]) -> Result<VoronoiFeatures> {
        if sites.len() < MIN_SITES {
            return Err(VoronoiError::DegenerateInput(format!(
                "need at least {} sites, got {}",
                MIN_SITES,
                sites.len()
            )));
        }

        let unit: Vec<DVec3> = sites
            .iter()
            .map(|site| to_point3d(site.coordinate(), 1.0))
            .collect();
        reject_duplicates(&unit)?;

        // Step 1: Delaunay triangles (indices into `unit`)
        let triangles = delaunay_triangles(&unit)?;

        // Step 2: one Voronoi vertex per triangle
        let interior = unit.iter().copied().sum::<DVec3>() / unit.len() as f64;
        let circumcenters = triangles
            .iter()
            .map(|tri| spherical_circumcenter(tri, &unit, interior))
            .collect::<Result<Vec<DVec3>>>()?;

        // Step 3: per-site rings
        let mut site_triangles: Vec<Vec<usize>> = vec![Vec::new(); unit.len()];
        for (tri_idx, tri) in triangles.iter().enumerate() {
            for &vertex in tri {
                site_triangles[vertex].push(tri_idx);
            }
        }

        let polygons = site_triangles
            .iter()
            .enumerate()
            .map(|(index, tris)| {
                let corners: Vec<DVec3> = tris.iter().map(|&t| circumcenters[t]).collect();
                let ordered = collapse_coincident(order_around_site(corners, unit[index]));

                let mut ring: Vec<[f64; 2]> =
                    ordered.iter().map(|&v| to_geo(v).to_position()).collect();
                if let Some(&first) = ring.first() {
                    ring.push(first);
                }

                PolygonFeature {
                    ring,
                    properties: SiteRef {
                        index,
                        site: sites[index],
                    },
                }
            })
            .collect();

        // Step 4: adjacency from Delaunay edges that map to a real Voronoi edge
        let links = voronoi_links(&triangles, &circumcenters);

        tracing::debug!(
            sites = sites.len(),
            triangles = triangles.len(),
            links = links.len(),
            "computed spherical voronoi"
        );

        Ok(VoronoiFeatures { polygons, links })
    }
}

fn reject_duplicates(unit: &[DVec3]) -> Result<()> {
    let tolerance_sq = DUPLICATE_TOLERANCE * DUPLICATE_TOLERANCE;
    for (i, a) in unit.iter().enumerate() {
        if let Some(offset) = unit[i + 1..]
            .iter()
            .position(|b| a.distance_squared(*b) < tolerance_sq)
        {
            return Err(VoronoiError::DegenerateInput(format!(
                "sites {} and {} coincide",
                i,
                i + 1 + offset
            )));
        }
    }
    Ok(())
}

/// Triangulate sites on the unit sphere via their convex hull
///
/// The hull may return its vertices in a different order than the input, so
/// every hull vertex is matched back to the site it came from. The hull only
/// supplies the combinatorics; faces are then re-wound and legalized against
/// the f64 sites.
fn delaunay_triangles(unit: &[DVec3]) -> Result<Vec<[usize; 3]>> {
    let hull_input: Vec<Point<f32>> = unit
        .iter()
        .map(|p| Point::new(p.x as f32, p.y as f32, p.z as f32))
        .collect();

    let (hull_vertices, hull_triangles) = transformation::try_convex_hull(&hull_input)
        .map_err(|e| VoronoiError::GenerationFailed(format!("convex hull: {:?}", e)))?;

    if hull_vertices.len() != unit.len() {
        return Err(VoronoiError::DegenerateInput(format!(
            "only {} of {} sites lie on the hull",
            hull_vertices.len(),
            unit.len()
        )));
    }

    let mut remap = vec![usize::MAX; hull_vertices.len()];
    let mut claimed = vec![false; unit.len()];
    for (hull_idx, vertex) in hull_vertices.iter().enumerate() {
        let position = DVec3::new(vertex.x as f64, vertex.y as f64, vertex.z as f64);
        let (site_idx, distance) = nearest_site(unit, position);

        if distance > HULL_MATCH_TOLERANCE || claimed[site_idx] {
            return Err(VoronoiError::GenerationFailed(format!(
                "hull vertex {} does not match a unique site",
                hull_idx
            )));
        }
        claimed[site_idx] = true;
        remap[hull_idx] = site_idx;
    }

    let triangles: Vec<[usize; 3]> = hull_triangles
        .iter()
        .map(|tri| {
            [
                remap[tri[0] as usize],
                remap[tri[1] as usize],
                remap[tri[2] as usize],
            ]
        })
        .collect();

    // A closed triangulated sphere with n vertices has 2n - 4 faces; a flat
    // (double sided) hull satisfies that too, so check the enclosed volume.
    if triangles.len() != 2 * unit.len() - 4 {
        return Err(VoronoiError::DegenerateInput(format!(
            "hull has {} faces, expected {}",
            triangles.len(),
            2 * unit.len() - 4
        )));
    }
    let volume: f64 = triangles
        .iter()
        .map(|t| unit[t[0]].dot(unit[t[1]].cross(unit[t[2]])) / 6.0)
        .sum();
    if volume.abs() < EPSILON {
        return Err(VoronoiError::DegenerateInput(
            "sites are coplanar".to_string(),
        ));
    }

    let mut triangles = orient_outward(triangles, unit);
    let flips = legalize(&mut triangles, unit)?;
    if flips > 0 {
        tracing::debug!(flips, "flipped non-delaunay hull edges");
    }

    Ok(triangles)
}

/// Closest site to `position` and its distance
///
/// An empty slice yields `(usize::MAX, f64::INFINITY)`, which no tolerance
/// accepts.
fn nearest_site(unit: &[DVec3], position: DVec3) -> (usize, f64) {
    unit.iter()
        .enumerate()
        .map(|(i, p)| (i, p.distance(position)))
        .fold((usize::MAX, f64::INFINITY), |best, candidate| {
            if candidate.1 < best.1 {
                candidate
            } else {
                best
            }
        })
}

/// Wind every triangle counter-clockwise as seen from outside the sphere
fn orient_outward(triangles: Vec<[usize; 3]>, unit: &[DVec3]) -> Vec<[usize; 3]> {
    let interior = unit.iter().copied().sum::<DVec3>() / unit.len() as f64;
    triangles
        .into_iter()
        .map(|[a, b, c]| {
            let normal = (unit[b] - unit[a]).cross(unit[c] - unit[a]);
            if normal.dot(unit[a] - interior) < 0.0 {
                [a, c, b]
            } else {
                [a, b, c]
            }
        })
        .collect()
}

/// Restore the empty-circumcircle property with f64 edge flips
///
/// The hull is computed in f32, so for nearly co-circular quads it can pick
/// the wrong diagonal. For two outward-wound triangles `(a, b, c)` and
/// `(b, a, d)`, the shared edge is illegal when `d` lies above the plane of
/// `(a, b, c)`, i.e. inside its circumcircle on the sphere. Such an edge is
/// replaced by `c-d` and the four outer edges are re-checked.
///
/// Returns the number of flips performed.
fn legalize(triangles: &mut [[usize; 3]], unit: &[DVec3]) -> Result<usize> {
    let mut owner: BTreeMap<(usize, usize), usize> = BTreeMap::new();
    for (tri_idx, tri) in triangles.iter().enumerate() {
        for k in 0..3 {
            owner.insert((tri[k], tri[(k + 1) % 3]), tri_idx);
        }
    }

    let mut pending: Vec<(usize, usize)> =
        owner.keys().filter(|(a, b)| a < b).copied().collect();
    let limit = triangles.len() * triangles.len();
    let mut flips = 0;

    while let Some((a, b)) = pending.pop() {
        let (Some(&t1), Some(&t2)) = (owner.get(&(a, b)), owner.get(&(b, a))) else {
            continue;
        };
        let (Some(c), Some(d)) = (
            third_vertex(&triangles[t1], a, b),
            third_vertex(&triangles[t2], a, b),
        ) else {
            continue;
        };
        if c == d || owner.contains_key(&(c, d)) || owner.contains_key(&(d, c)) {
            continue;
        }

        let normal = (unit[b] - unit[a]).cross(unit[c] - unit[a]);
        if (unit[d] - unit[a]).dot(normal) <= FLIP_TOLERANCE {
            continue;
        }

        flips += 1;
        if flips > limit {
            return Err(VoronoiError::GenerationFailed(
                "edge flipping did not converge".to_string(),
            ));
        }

        for tri in [triangles[t1], triangles[t2]] {
            for k in 0..3 {
                owner.remove(&(tri[k], tri[(k + 1) % 3]));
            }
        }
        triangles[t1] = [a, d, c];
        triangles[t2] = [d, b, c];
        for t in [t1, t2] {
            let tri = triangles[t];
            for k in 0..3 {
                owner.insert((tri[k], tri[(k + 1) % 3]), t);
            }
        }

        pending.extend([(a, d), (d, b), (b, c), (c, a)]);
    }

    Ok(flips)
}

fn third_vertex(tri: &[usize; 3], a: usize, b: usize) -> Option<usize> {
    tri.iter().copied().find(|&v| v != a && v != b)
}

/// Circumcenter of a Delaunay triangle, projected onto the unit sphere
///
/// The face normal is oriented away from `interior` (a point inside the hull),
/// which picks the circumcenter on the empty side of the face.
fn spherical_circumcenter(tri: &[usize; 3], unit: &[DVec3], interior: DVec3) -> Result<DVec3> {
    let (v0, v1, v2) = (unit[tri[0]], unit[tri[1]], unit[tri[2]]);

    let normal = (v1 - v0).cross(v2 - v0);
    if normal.length_squared() < EPSILON * EPSILON {
        return Err(VoronoiError::DegenerateInput(format!(
            "sites {:?} are collinear",
            tri
        )));
    }

    let normal = if normal.dot(v0 - interior) < 0.0 {
        -normal
    } else {
        normal
    };
    Ok(normal.normalize())
}

/// Order Voronoi vertices counter-clockwise around their site
///
/// Projects vertices onto the tangent plane at the site and sorts by angle.
fn order_around_site(corners: Vec<DVec3>, site: DVec3) -> Vec<DVec3> {
    if corners.len() < 3 {
        return corners;
    }

    let normal = site.normalize();
    let reference = if normal.x.abs() > 0.5 {
        DVec3::Y
    } else {
        DVec3::X
    };
    let tangent_u = reference.cross(normal).normalize();
    let tangent_v = normal.cross(tangent_u);

    let mut with_angles: Vec<(DVec3, f64)> = corners
        .into_iter()
        .map(|corner| {
            let offset = corner - site;
            (corner, offset.dot(tangent_v).atan2(offset.dot(tangent_u)))
        })
        .collect();
    with_angles.sort_by(|a, b| a.1.total_cmp(&b.1));

    with_angles.into_iter().map(|(corner, _)| corner).collect()
}

/// Merge consecutive vertices that coincide, including across the wrap
///
/// Four or more co-circular sites produce one Voronoi vertex per hull face
/// touching that circle, all at the same position.
fn collapse_coincident(ordered: Vec<DVec3>) -> Vec<DVec3> {
    let tolerance_sq = EPSILON * EPSILON;
    let mut collapsed: Vec<DVec3> = Vec::with_capacity(ordered.len());
    for vertex in ordered {
        match collapsed.last() {
            Some(last) if last.distance_squared(vertex) < tolerance_sq => {}
            _ => collapsed.push(vertex),
        }
    }
    while collapsed.len() > 1 {
        match (collapsed.first(), collapsed.last()) {
            (Some(first), Some(last)) if first.distance_squared(*last) < tolerance_sq => {
                collapsed.pop();
            }
            _ => break,
        }
    }
    collapsed
}

/// Links between sites whose cells share an edge of non-zero length
///
/// Every Delaunay edge borders two triangles; the matching Voronoi edge joins
/// their circumcenters. When those coincide the cells only touch at a point.
fn voronoi_links(triangles: &[[usize; 3]], circumcenters: &[DVec3]) -> Vec<LinkFeature> {
    let mut edge_faces: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
    for (tri_idx, tri) in triangles.iter().enumerate() {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            edge_faces
                .entry((a.min(b), a.max(b)))
                .or_default()
                .push(tri_idx);
        }
    }

    edge_faces
        .into_iter()
        .filter(|(_, faces)| match faces.as_slice() {
            [f0, f1] => circumcenters[*f0].distance(circumcenters[*f1]) > EPSILON,
            _ => true,
        })
        .map(|((source, target), _)| LinkFeature { source, target })
        .collect()
}
