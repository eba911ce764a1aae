//! Uniform random site sampling on a sphere
//!
//! Candidates are drawn with a uniform azimuth and an inclination of
//! `acos(2u - 1)`. Drawing the inclination uniformly would crowd the poles.
//! See <http://mathworld.wolfram.com/SpherePointPicking.html>.

use glam::DVec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::{PI, TAU};

use crate::geo::from_spherical;

/// Number of candidates drawn for a sphere of `radius` at `density`
///
/// This is `⌈4π·radius²·density⌉`, or 0 when either parameter is non-positive
/// or non-finite.
pub fn candidate_count(radius: f64, density: f64) -> usize {
    if !(radius.is_finite() && density.is_finite()) || radius <= 0.0 || density <= 0.0 {
        return 0;
    }
    (4.0 * PI * radius * radius * density).ceil() as usize
}

/// Sample sites on a sphere, keeping them at least `min_distance` apart
///
/// Never fails: degenerate parameters give an empty result and a
/// non-positive `min_distance` disables filtering.
pub fn sample_sphere_points<R: Rng + ?Sized>(
    rng: &mut R,
    radius: f64,
    density: f64,
    min_distance: f64,
) -> Vec<DVec3> {
    let count = candidate_count(radius, density);

    let candidates: Vec<DVec3> = (0..count)
        .map(|_| {
            let theta = rng.gen::<f64>() * TAU;
            let phi = (2.0 * rng.gen::<f64>() - 1.0).clamp(-1.0, 1.0).acos();
            from_spherical(radius, phi, theta)
        })
        .collect();

    let points = filter_min_distance(candidates, min_distance);
    tracing::debug!(
        candidates = count,
        survivors = points.len(),
        "sampled sphere points"
    );
    points
}

/// Seeded variant of [`sample_sphere_points`] for reproducible planets
pub fn sample_sphere_points_seeded(
    seed: u64,
    radius: f64,
    density: f64,
    min_distance: f64,
) -> Vec<DVec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    sample_sphere_points(&mut rng, radius, density, min_distance)
}

/// Drop every candidate closer than `min_distance` to an earlier accepted one
///
/// Candidates are scanned in order, so the first point of a close pair wins.
pub fn filter_min_distance(candidates: Vec<DVec3>, min_distance: f64) -> Vec<DVec3> {
    if min_distance.is_nan() || min_distance <= 0.0 {
        return candidates;
    }

    let min_distance_sq = min_distance * min_distance;
    let mut accepted: Vec<DVec3> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if accepted
            .iter()
            .all(|p| p.distance_squared(candidate) >= min_distance_sq)
        {
            accepted.push(candidate);
        }
    }
    accepted
}
