//! Geographic coordinate transform
//!
//! Maps points on a sphere to longitude/latitude and back. The polar axis is
//! +Y: inclination `phi` is measured from +Y and azimuth `theta = atan2(x, z)`,
//! so latitude 90 is the top of the sphere and longitude 0 faces +Z.

use glam::DVec3;
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used for geometric comparisons across the crate
pub const EPSILON: f64 = 1e-7;

/// A (longitude, latitude) pair in degrees
///
/// Longitude lies in (-180, 180], latitude in [-90, 90].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoCoordinate {
    /// Degrees east of the +Z meridian
    pub longitude: f64,
    /// Degrees above the equator
    pub latitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate from longitude and latitude in degrees
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// True when the coordinate sits on one of the poles, where longitude is meaningless
    #[inline]
    pub fn is_pole(&self) -> bool {
        (self.latitude.abs() - 90.0).abs() < EPSILON
    }

    /// Central angle to another coordinate, in degrees
    pub fn angle_to(&self, other: &GeoCoordinate) -> f64 {
        let a = to_point3d(*self, 1.0);
        let b = to_point3d(*other, 1.0);
        a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
    }

    /// `[longitude, latitude]`, the position layout used by geographic features
    #[inline]
    pub fn to_position(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl From<[f64; 2]> for GeoCoordinate {
    fn from(position: [f64; 2]) -> Self {
        Self::new(position[0], position[1])
    }
}

/// Convert a Cartesian point to longitude/latitude
///
/// At the poles (and for the zero vector) longitude is pinned to 0 instead of
/// carrying an arbitrary azimuth.
pub fn to_geo(p: DVec3) -> GeoCoordinate {
    let radius = p.length();
    if radius == 0.0 {
        return GeoCoordinate::new(0.0, 0.0);
    }

    let phi = (p.y / radius).clamp(-1.0, 1.0).acos();
    let latitude = -(phi / TAU * 360.0) + 90.0;

    let horizontal = (p.x * p.x + p.z * p.z).sqrt();
    if horizontal < EPSILON * radius {
        return GeoCoordinate::new(0.0, latitude);
    }

    let theta = p.x.atan2(p.z);
    let mut longitude = (theta / TAU * 360.0 + 180.0) % 360.0 - 180.0;
    if longitude <= -180.0 {
        longitude += 360.0;
    }

    GeoCoordinate::new(longitude, latitude)
}

/// Convert a longitude/latitude pair back to a point on a sphere of `radius`
pub fn to_point3d(g: GeoCoordinate, radius: f64) -> DVec3 {
    let theta = (g.longitude % 360.0) / 360.0 * TAU;
    let phi = -(g.latitude - 90.0) / 360.0 * TAU;

    from_spherical(radius, phi, theta)
}

/// Cartesian point for spherical coordinates (inclination from +Y, azimuth from +Z)
pub(crate) fn from_spherical(radius: f64, phi: f64, theta: f64) -> DVec3 {
    let sin_phi_radius = phi.sin() * radius;
    DVec3::new(
        sin_phi_radius * theta.sin(),
        phi.cos() * radius,
        sin_phi_radius * theta.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn longitude_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn test_axes() {
        let g = to_geo(DVec3::new(0.0, 0.0, 5.0));
        assert!(g.longitude.abs() < 1e-9);
        assert!(g.latitude.abs() < 1e-9);

        let g = to_geo(DVec3::new(5.0, 0.0, 0.0));
        assert!((g.longitude - 90.0).abs() < 1e-9);

        let g = to_geo(DVec3::new(0.0, 0.0, -5.0));
        assert!((g.longitude - 180.0).abs() < 1e-9, "got {}", g.longitude);
    }

    #[test]
    fn test_poles_pin_longitude() {
        let north = to_geo(DVec3::new(0.0, 3.0, 0.0));
        assert_eq!(north.longitude, 0.0);
        assert!((north.latitude - 90.0).abs() < 1e-9);
        assert!(north.is_pole());

        let south = to_geo(DVec3::new(0.0, -3.0, 0.0));
        assert_eq!(south.longitude, 0.0);
        assert!((south.latitude + 90.0).abs() < 1e-9);

        let origin = to_geo(DVec3::ZERO);
        assert!(!origin.longitude.is_nan());
        assert!(!origin.latitude.is_nan());
    }

    #[test]
    fn test_point_round_trip() {
        let radius = 5.0;
        let points = [
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(-4.0, 0.5, -1.0),
            DVec3::new(0.3, -2.0, -0.1),
            DVec3::new(-1.0, -1.0, 1.0),
            DVec3::new(0.0, 0.2, -1.0),
        ];

        for p in points {
            let p = p.normalize() * radius;
            let back = to_point3d(to_geo(p), radius);
            assert!((back - p).abs().max_element() < 1e-6, "{p:?} -> {back:?}");
        }
    }

    #[test]
    fn test_geo_round_trip() {
        for lon in [-179.5, -120.0, -45.0, 0.0, 33.3, 90.0, 179.9, 180.0] {
            for lat in [-89.0, -45.0, 0.0, 12.5, 60.0, 89.5] {
                let g = GeoCoordinate::new(lon, lat);
                let back = to_geo(to_point3d(g, 7.5));
                assert!(longitude_diff(back.longitude, lon) < 1e-6, "{g:?} -> {back:?}");
                assert!((back.latitude - lat).abs() < 1e-6, "{g:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn test_longitude_range() {
        let g = to_geo(DVec3::new(-0.0, 0.0, -1.0));
        assert!(g.longitude > -180.0 && g.longitude <= 180.0);

        let g = to_geo(DVec3::new(-1e-3, 0.0, -1.0));
        assert!(g.longitude > -180.0 && g.longitude < -179.0);
    }

    #[test]
    fn test_angle_to() {
        let a = GeoCoordinate::new(0.0, 0.0);
        let b = GeoCoordinate::new(90.0, 0.0);
        assert!((a.angle_to(&b) - 90.0).abs() < 1e-9);

        let pole = GeoCoordinate::new(0.0, 90.0);
        assert!((a.angle_to(&pole) - 90.0).abs() < 1e-9);
    }
}
