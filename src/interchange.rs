//! Geographic feature types exchanged with a spherical Voronoi engine
//!
//! Sites go in as point features, cells come back as polygon features that
//! carry a back-reference to their site, and adjacency comes back as link
//! features between site indices. With the `serde` feature a site serialises
//! as a geographic point geometry (`type`, `coordinates`).

use crate::geo::GeoCoordinate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An input site as a point feature
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename = "Point"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteFeature {
    /// Position of the site as `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl SiteFeature {
    pub fn new(coordinate: GeoCoordinate) -> Self {
        Self {
            coordinates: coordinate.to_position(),
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::from(self.coordinates)
    }
}

/// Back-reference from a polygon to the site that generated it
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteRef {
    /// Index of the site in the input collection
    pub index: usize,
    /// The site itself
    pub site: SiteFeature,
}

/// One Voronoi cell as a polygon feature
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFeature {
    /// Closed ring: the last position repeats the first
    pub ring: Vec<[f64; 2]>,
    pub properties: SiteRef,
}

impl PolygonFeature {
    /// Ring positions without the closing repeat of the first position
    pub fn open_ring(&self) -> &[[f64; 2]] {
        match (self.ring.first(), self.ring.last()) {
            (Some(first), Some(last)) if self.ring.len() > 1 && first == last => {
                &self.ring[..self.ring.len() - 1]
            }
            _ => &self.ring,
        }
    }
}

/// Two sites whose cells share a boundary edge
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkFeature {
    pub source: usize,
    pub target: usize,
}

/// Everything a spherical Voronoi engine returns for one set of sites
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoronoiFeatures {
    pub polygons: Vec<PolygonFeature>,
    pub links: Vec<LinkFeature>,
}

/// Wrap geographic coordinates as site features, preserving order
pub fn site_collection(coordinates: &[GeoCoordinate]) -> Vec<SiteFeature> {
    coordinates.iter().copied().map(SiteFeature::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_ring_strips_closing_position() {
        let site = SiteFeature::new(GeoCoordinate::new(0.0, 0.0));
        let polygon = PolygonFeature {
            ring: vec![[0.0, 1.0], [1.0, 0.0], [0.0, -1.0], [0.0, 1.0]],
            properties: SiteRef { index: 0, site },
        };
        assert_eq!(polygon.open_ring().len(), 3);

        let open = PolygonFeature {
            ring: vec![[0.0, 1.0], [1.0, 0.0], [0.0, -1.0]],
            properties: SiteRef { index: 0, site },
        };
        assert_eq!(open.open_ring().len(), 3);
    }

    #[test]
    fn test_site_collection_preserves_order() {
        let coords = [GeoCoordinate::new(10.0, 20.0), GeoCoordinate::new(-5.0, 1.0)];
        let sites = site_collection(&coords);
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[1].coordinate(), coords[1]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_site_serializes_as_point_feature() {
        let site = SiteFeature::new(GeoCoordinate::new(12.0, -3.5));
        let json = serde_json::to_value(site).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"][0], 12.0);

        let restored: SiteFeature = serde_json::from_value(json).unwrap();
        assert_eq!(restored, site);
    }
}
