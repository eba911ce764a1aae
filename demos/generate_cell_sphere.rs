//! Generate a cell sphere, print some statistics and spin it in a stub host

use std::collections::BTreeMap;
use voronoi_cell_sphere::*;

/// Host that just logs what the component asks of it
struct ConsoleHost;

impl SceneHost for ConsoleHost {
    fn set_object(&mut self, name: &str, visual: PlanetVisual) {
        println!(
            "attach '{}': {} sites, {} outlines, backing sphere: {}",
            name,
            visual.sites.positions.len(),
            visual.outlines.len(),
            visual.backing_sphere.is_some()
        );
    }

    fn remove_object(&mut self, name: &str) -> Option<PlanetVisual> {
        println!("detach '{}'", name);
        None
    }

    fn set_rotation_y(&mut self, name: &str, radians: f64) {
        println!("rotate '{}' to {:.3} rad", name, radians);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = PlanetConfigBuilder::new()
        .seed(42)
        .radius(5.0)?
        .density(0.25)?
        .min_distance(1.4)?
        .build()?;

    let sphere = generate_cell_sphere(&config)?;
    println!("Generated {} cells on radius {}", sphere.len(), sphere.radius());

    let mut histogram = BTreeMap::new();
    for cell in &sphere {
        *histogram.entry(cell.neighbor_count()).or_insert(0usize) += 1;
    }
    println!("\nNeighbor count distribution:");
    for (neighbors, count) in &histogram {
        println!("  {} neighbors: {} cells", neighbors, count);
    }

    let total_area: f64 = sphere.iter().map(|c| c.approximate_area()).sum();
    let sphere_area = 4.0 * std::f64::consts::PI * sphere.radius().powi(2);
    println!(
        "\nFlat cell area {:.2} vs sphere area {:.2}",
        total_area, sphere_area
    );

    #[cfg(feature = "spatial-index")]
    {
        let position = DVec3::new(0.0, sphere.radius(), 0.0);
        let cell = sphere.find_cell_at(position);
        println!("North pole lies in cell {}", cell);
        println!(
            "{} cells within 2 hops of it",
            sphere.cells_within_hops(cell, 2).len()
        );
    }

    println!();
    let mut host = ConsoleHost;
    let mut component = PlanetComponent::new(config);
    component.init(&mut host);
    for frame in 0..4 {
        let time_ms = frame as f64 * 16.0 * 50.0;
        component.tick(&mut host, time_ms, 16.0);
    }
    component.remove(&mut host);

    Ok(())
}
