//! Scene component lifecycle for a spinning planet
//!
//! The host owns the render loop and the scene graph. It calls `init` once to
//! attach the planet, `tick` every frame and `remove` on teardown.

use std::f64::consts::TAU;

use crate::cell_sphere::CellSphere;
use crate::config::PlanetConfig;
use crate::generation::{build_cell_sphere, sample_sphere_points_seeded};
use crate::render::{PlanetVisual, RenderStyle};

/// Name under which the planet visual is attached to the host node
pub const PLANET: &str = "planet";

/// Milliseconds per full revolution
pub const ROTATION_PERIOD_MS: f64 = 3000.0;

/// Scene graph operations the planet component needs from its host
pub trait SceneHost {
    /// Attach `visual` under `name`, replacing anything already there
    fn set_object(&mut self, name: &str, visual: PlanetVisual);

    /// Detach and return the object under `name`
    fn remove_object(&mut self, name: &str) -> Option<PlanetVisual>;

    /// Set the rotation of the object under `name` about the +Y axis
    fn set_rotation_y(&mut self, name: &str, radians: f64);
}

/// Rotation about +Y at wall-clock `time_ms`
///
/// A pure function of time rather than an accumulation of frame deltas, so it
/// never drifts.
pub fn rotation_for_time(time_ms: f64) -> f64 {
    time_ms.rem_euclid(ROTATION_PERIOD_MS) / ROTATION_PERIOD_MS * TAU
}

/// A planet attached to a host scene node
#[derive(Debug, Clone)]
pub struct PlanetComponent {
    config: PlanetConfig,
    style: RenderStyle,
    cell_sphere: Option<CellSphere>,
    attached: bool,
}

impl PlanetComponent {
    pub fn new(config: PlanetConfig) -> Self {
        Self::with_style(config, RenderStyle::default())
    }

    pub fn with_style(config: PlanetConfig, style: RenderStyle) -> Self {
        Self {
            config,
            style,
            cell_sphere: None,
            attached: false,
        }
    }

    /// Generate the planet and attach it to the host
    ///
    /// If the sampled sites cannot be tessellated the component still attaches
    /// the bare sites instead of failing.
    pub fn init<H: SceneHost + ?Sized>(&mut self, host: &mut H) {
        let points = sample_sphere_points_seeded(
            self.config.seed,
            self.config.radius,
            self.config.density,
            self.config.min_distance,
        );

        let visual = match build_cell_sphere(&points) {
            Ok(sphere) => {
                let visual = PlanetVisual::from_cell_sphere(&sphere, &self.style);
                self.cell_sphere = Some(sphere);
                visual
            }
            Err(e) => {
                tracing::warn!(error = %e, sites = points.len(), "rendering sites without cells");
                self.cell_sphere = None;
                PlanetVisual::points_only(&points, &self.style)
            }
        };

        host.set_object(PLANET, visual);
        self.attached = true;
    }

    /// React to configuration changes
    ///
    /// The component exposes no live options, so this does nothing.
    pub fn update(&mut self) {}

    /// Detach the planet from the host and drop the generated cells
    pub fn remove<H: SceneHost + ?Sized>(&mut self, host: &mut H) {
        host.remove_object(PLANET);
        self.cell_sphere = None;
        self.attached = false;
    }

    /// Advance the rotation for the frame at `time_ms`
    ///
    /// Only touches the rotation; the planet is never regenerated here.
    pub fn tick<H: SceneHost + ?Sized>(&mut self, host: &mut H, time_ms: f64, _delta_ms: f64) {
        if self.attached {
            host.set_rotation_y(PLANET, rotation_for_time(time_ms));
        }
    }

    /// The generated cells, if `init` succeeded in tessellating them
    pub fn cell_sphere(&self) -> Option<&CellSphere> {
        self.cell_sphere.as_ref()
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlanetConfigBuilder;
    use std::collections::HashMap;

    #[derive(Default)]
    struct RecordingHost {
        objects: HashMap<String, PlanetVisual>,
        rotations: HashMap<String, f64>,
        set_calls: usize,
    }

    impl SceneHost for RecordingHost {
        fn set_object(&mut self, name: &str, visual: PlanetVisual) {
            self.set_calls += 1;
            self.objects.insert(name.to_string(), visual);
        }

        fn remove_object(&mut self, name: &str) -> Option<PlanetVisual> {
            self.objects.remove(name)
        }

        fn set_rotation_y(&mut self, name: &str, radians: f64) {
            self.rotations.insert(name.to_string(), radians);
        }
    }

    fn config() -> PlanetConfig {
        PlanetConfigBuilder::new().seed(42).build().unwrap()
    }

    #[test]
    fn test_rotation_for_time() {
        assert_eq!(rotation_for_time(0.0), 0.0);
        assert!((rotation_for_time(750.0) - TAU / 4.0).abs() < 1e-12);
        assert!((rotation_for_time(1500.0) - TAU / 2.0).abs() < 1e-12);
        assert!(rotation_for_time(3000.0).abs() < 1e-12);
        assert!((rotation_for_time(4500.0) - rotation_for_time(1500.0)).abs() < 1e-12);
        assert!(rotation_for_time(-750.0) >= 0.0);
    }

    #[test]
    fn test_lifecycle() {
        let mut host = RecordingHost::default();
        let mut component = PlanetComponent::new(config());

        component.init(&mut host);
        assert!(component.is_attached());
        assert!(host.objects.contains_key(PLANET));
        let sphere = component.cell_sphere().unwrap();
        assert_eq!(host.objects[PLANET].outlines.len(), sphere.len());

        component.update();

        component.remove(&mut host);
        assert!(!component.is_attached());
        assert!(host.objects.is_empty());
        assert!(component.cell_sphere().is_none());
    }

    #[test]
    fn test_tick_only_rotates() {
        let mut host = RecordingHost::default();
        let mut component = PlanetComponent::new(config());
        component.init(&mut host);

        component.tick(&mut host, 750.0, 16.0);
        component.tick(&mut host, 1500.0, 16.0);

        assert_eq!(host.set_calls, 1);
        assert!((host.rotations[PLANET] - TAU / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_tick_ignores_delta() {
        let mut a = RecordingHost::default();
        let mut b = RecordingHost::default();
        let mut component = PlanetComponent::new(config());
        component.init(&mut a);
        component.init(&mut b);

        component.tick(&mut a, 2000.0, 1.0);
        component.tick(&mut b, 2000.0, 500.0);
        assert_eq!(a.rotations[PLANET], b.rotations[PLANET]);
    }

    #[test]
    fn test_tick_before_init_does_nothing() {
        let mut host = RecordingHost::default();
        let mut component = PlanetComponent::new(config());
        component.tick(&mut host, 100.0, 16.0);
        assert!(host.rotations.is_empty());
    }

    #[test]
    fn test_falls_back_to_points() {
        // Density so low that fewer than four sites are sampled
        let config = PlanetConfigBuilder::new()
            .seed(1)
            .radius(1.0)
            .unwrap()
            .density(0.1)
            .unwrap()
            .min_distance(0.0)
            .unwrap()
            .build()
            .unwrap();
        let mut host = RecordingHost::default();
        let mut component = PlanetComponent::new(config);

        component.init(&mut host);

        let visual = &host.objects[PLANET];
        assert_eq!(visual.sites.positions.len(), 2);
        assert!(visual.outlines.is_empty());
        assert!(component.cell_sphere().is_none());
    }
}
