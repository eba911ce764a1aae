//! Render data for cell spheres
//!
//! Converts a [`CellSphere`] (or a bare point set) into engine-agnostic
//! primitives: a point cloud of sites, one closed line loop per cell boundary
//! and a backing sphere mesh. Hosts turn these into their own scene objects
//! through [`SceneHost`].

mod component;
mod style;

pub use component::{rotation_for_time, PlanetComponent, SceneHost, PLANET, ROTATION_PERIOD_MS};
pub use style::{hex_color, RenderStyle, Rgba};

use glam::DVec3;
use std::f64::consts::{PI, TAU};

use crate::cell_sphere::CellSphere;

/// Engine-agnostic triangle mesh
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - wgpu: Use directly as vertex buffers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions (3D coordinates)
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals (normalized direction from sphere center)
    pub normals: Vec<[f32; 3]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<Rgba>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A set of points drawn as sprites
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<[f32; 3]>,
    pub size: f32,
    pub color: Rgba,
}

/// A polyline whose last vertex connects back to its first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineLoop {
    pub positions: Vec<[f32; 3]>,
    pub width: f32,
    pub color: Rgba,
}

/// Everything a host needs to draw one planet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanetVisual {
    /// Cell sites
    pub sites: PointCloud,
    /// One outline per cell, in cell order
    pub outlines: Vec<LineLoop>,
    /// Opaque sphere behind the outlines, if any
    pub backing_sphere: Option<MeshData>,
}

impl PlanetVisual {
    /// Full visual: sites, cell outlines and backing sphere
    pub fn from_cell_sphere(sphere: &CellSphere, style: &RenderStyle) -> Self {
        Self {
            sites: site_cloud(sphere, style),
            outlines: cell_outlines(sphere, style),
            backing_sphere: Some(backing_sphere(
                sphere.radius() * style.sphere_scale,
                style.sphere_width_segments,
                style.sphere_height_segments,
                style.sphere_color,
            )),
        }
    }

    /// Sites only, for when no tessellation is available
    pub fn points_only(points: &[DVec3], style: &RenderStyle) -> Self {
        Self {
            sites: PointCloud {
                positions: points.iter().copied().map(to_f32).collect(),
                size: style.site_size,
                color: style.site_color,
            },
            outlines: Vec::new(),
            backing_sphere: None,
        }
    }
}

/// One line loop per cell boundary, in cell order
pub fn cell_outlines(sphere: &CellSphere, style: &RenderStyle) -> Vec<LineLoop> {
    sphere
        .iter()
        .map(|cell| LineLoop {
            positions: cell.boundary.iter().copied().map(to_f32).collect(),
            width: style.outline_width,
            color: style.outline_color,
        })
        .collect()
}

/// Point cloud of all cell sites, in cell order
pub fn site_cloud(sphere: &CellSphere, style: &RenderStyle) -> PointCloud {
    PointCloud {
        positions: sphere.iter().map(|cell| to_f32(cell.site)).collect(),
        size: style.site_size,
        color: style.site_color,
    }
}

/// UV sphere mesh with `width_segments` × `height_segments` quads
///
/// Rows run from the north pole (+Y) to the south pole; the pole rows
/// degenerate to triangles.
pub fn backing_sphere(radius: f64, width_segments: u32, height_segments: u32, color: Rgba) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut mesh = MeshData::default();

    for iy in 0..=height_segments {
        let v = iy as f64 / height_segments as f64;
        for ix in 0..=width_segments {
            let u = ix as f64 / width_segments as f64;
            let normal = DVec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.positions.push(to_f32(normal * radius));
            mesh.normals.push(to_f32(normal));
            mesh.colors.push(color);
        }
    }

    let row = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}

#[inline]
fn to_f32(v: DVec3) -> [f32; 3] {
    v.as_vec3().to_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_cell_sphere;

    fn tetrahedron_sphere() -> CellSphere {
        let sites = vec![
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(1.0, -1.0, -1.0),
            DVec3::new(-1.0, 1.0, -1.0),
            DVec3::new(-1.0, -1.0, 1.0),
        ];
        build_cell_sphere(&sites).unwrap()
    }

    #[test]
    fn test_visual_from_cell_sphere() {
        let sphere = tetrahedron_sphere();
        let style = RenderStyle::default();
        let visual = PlanetVisual::from_cell_sphere(&sphere, &style);

        assert_eq!(visual.sites.positions.len(), 4);
        assert_eq!(visual.outlines.len(), 4);
        for outline in &visual.outlines {
            assert_eq!(outline.positions.len(), 3);
            assert_eq!(outline.color, style.outline_color);
        }
        assert!(visual.backing_sphere.is_some());
    }

    #[test]
    fn test_outlines_follow_boundaries() {
        let sphere = tetrahedron_sphere();
        let outlines = cell_outlines(&sphere, &RenderStyle::default());

        for (cell, outline) in sphere.iter().zip(&outlines) {
            for (vertex, position) in cell.boundary.iter().zip(&outline.positions) {
                assert!((vertex.x as f32 - position[0]).abs() < 1e-5);
                assert!((vertex.y as f32 - position[1]).abs() < 1e-5);
                assert!((vertex.z as f32 - position[2]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_points_only() {
        let points = vec![DVec3::X, DVec3::Y];
        let visual = PlanetVisual::points_only(&points, &RenderStyle::default());

        assert_eq!(visual.sites.positions, vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert!(visual.outlines.is_empty());
        assert!(visual.backing_sphere.is_none());
    }

    #[test]
    fn test_backing_sphere_shape() {
        let mesh = backing_sphere(4.95, 20, 20, [0.5, 0.5, 0.5, 1.0]);

        assert_eq!(mesh.vertex_count(), 21 * 21);
        // Pole rows contribute one triangle per segment, the rest two
        assert_eq!(mesh.triangle_count(), 20 * (2 * 20 - 2));
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.positions.len(), mesh.colors.len());

        for p in &mesh.positions {
            let length = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((length - 4.95).abs() < 1e-4);
        }
        for &i in &mesh.indices {
            assert!((i as usize) < mesh.vertex_count());
        }
    }
}
