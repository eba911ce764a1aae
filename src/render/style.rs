//! Colors and sizes for the planet visual

/// RGBA color type
pub type Rgba = [f32; 4];

/// Convert a `0xRRGGBB` color and an alpha in [0, 1] to RGBA
pub fn hex_color(rgb: u32, alpha: f32) -> Rgba {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Appearance of the generated visual
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Color of the site point cloud
    pub site_color: Rgba,
    /// Point size of the site point cloud
    pub site_size: f32,
    /// Color of the cell outlines
    pub outline_color: Rgba,
    /// Line width of the cell outlines
    pub outline_width: f32,
    /// Color of the backing sphere
    pub sphere_color: Rgba,
    /// Backing sphere radius as a fraction of the cell sphere radius
    ///
    /// Kept just below 1 so outlines are not hidden inside the mesh.
    pub sphere_scale: f64,
    /// Longitudinal segments of the backing sphere
    pub sphere_width_segments: u32,
    /// Latitudinal segments of the backing sphere
    pub sphere_height_segments: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            site_color: hex_color(0xdd00dd, 1.0),
            site_size: 0.2,
            outline_color: hex_color(0x0000dd, 0x33 as f32 / 255.0),
            outline_width: 5.0,
            sphere_color: hex_color(0x777777, 1.0),
            sphere_scale: 0.99,
            sphere_width_segments: 20,
            sphere_height_segments: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex_color(0x00ff00, 0.5), [0.0, 1.0, 0.0, 0.5]);
        assert_eq!(hex_color(0x0000ff, 0.0), [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_default_style() {
        let style = RenderStyle::default();
        assert_eq!(style.site_color[3], 1.0);
        assert!(style.outline_color[2] > 0.8); // Blue outlines
        assert!(style.outline_color[3] < 0.5); // Mostly transparent
        assert!(style.sphere_scale < 1.0);
    }
}
