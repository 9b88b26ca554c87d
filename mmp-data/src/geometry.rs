use mmp_api::prediction::MigrationPoint;
use mmp_api::request::PredictionRequest;
use serde::{Deserialize, Serialize};

/// Span in degrees shown around the first predicted position.
pub const PATH_REGION_SPAN_DEGREES: f64 = 10.0;

/// Span in degrees of the world-scale view used when there is no path.
pub const WORLD_REGION_SPAN_DEGREES: f64 = 60.0;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<&MigrationPoint> for Coordinate {
    fn from(point: &MigrationPoint) -> Self {
        Self::new(point.predicted_latitude, point.predicted_longitude)
    }
}

/// Map viewport: a centre and the latitude/longitude extent around it.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct MapRegion {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn centered(center: Coordinate, span: f64) -> Self {
        Self {
            center_latitude: center.latitude,
            center_longitude: center.longitude,
            latitude_delta: span,
            longitude_delta: span,
        }
    }

    pub fn world() -> Self {
        Self::centered(Coordinate::new(0.0, 0.0), WORLD_REGION_SPAN_DEGREES)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.center_latitude, self.center_longitude)
    }
}

/// One coordinate per migration point, in prediction order.
pub fn compute_path(migration: Option<&[MigrationPoint]>) -> Vec<Coordinate> {
    migration
        .unwrap_or_default()
        .iter()
        .map(Coordinate::from)
        .collect()
}

/// Viewport for a migration path.
///
/// Centred on the first prediction with a fixed 10° span; with no path it
/// falls back to a 60° view of (0, 0). The region is never fitted to the
/// whole path.
pub fn compute_map_region(migration: Option<&[MigrationPoint]>) -> MapRegion {
    match migration.and_then(|points| points.first()) {
        Some(first) => MapRegion::centered(first.into(), PATH_REGION_SPAN_DEGREES),
        None => MapRegion::world(),
    }
}

/// Viewport for the temperature-only view: the requested position itself.
pub fn temperature_map_region(request: &PredictionRequest) -> MapRegion {
    MapRegion::centered(
        Coordinate::new(request.latitude(), request.longitude()),
        PATH_REGION_SPAN_DEGREES,
    )
}
