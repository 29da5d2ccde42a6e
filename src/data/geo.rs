use serde::Serialize;

use super::model::{DeploymentType, ExplosionRecord};

/// Origin country shown on the map page.
pub const DEFAULT_MAP_ORIGIN: &str = "USA";

/// Initial map centre: the Nevada Test Site, as (lat, lon).
pub const NEVADA_TEST_SITE: (f64, f64) = (37.04, -116.16);

/// Half extent of the opening map view in degrees, as (lat, lon).
pub const MAP_VIEW_HALF_EXTENT: (f64, f64) = (1.5, 2.0);

/// Opening map view around `center` (lat, lon), as `[lon, lat]` min and
/// max corners.
pub fn map_view_bounds(center: (f64, f64)) -> ([f64; 2], [f64; 2]) {
    let (lat, lon) = center;
    let (half_lat, half_lon) = MAP_VIEW_HALF_EXTENT;
    ([lon - half_lon, lat - half_lat], [lon + half_lon, lat + half_lat])
}

/// A map-ready point. Coordinates stay optional; the renderer decides
/// what to do with points it cannot place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub magnitude_body: Option<f64>,
    pub deployment_type: DeploymentType,
}

impl MapPoint {
    /// `[lon, lat]` for plotting, if both are known.
    pub fn position(&self) -> Option<[f64; 2]> {
        Some([self.lon?, self.lat?])
    }
}

/// Every record whose source country is exactly `country`, in dataset order.
pub fn extract_by_origin(records: &[ExplosionRecord], country: &str) -> Vec<MapPoint> {
    records
        .iter()
        .filter(|r| r.source_country == country)
        .map(|r| MapPoint {
            name: r.name.clone(),
            lat: r.latitude,
            lon: r.longitude,
            magnitude_body: r.magnitude_body,
            deployment_type: r.deployment_type.clone(),
        })
        .collect()
}
