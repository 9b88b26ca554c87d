use crate::anomaly::{anomaly_color, average_anomaly, AnomalyColor};
use crate::geometry::{
    compute_map_region, compute_path, temperature_map_region, Coordinate, MapRegion,
};
use mmp_api::prediction::{MigrationPoint, TemperaturePoint};
use mmp_api::request::PredictionRequest;
use serde::Serialize;

pub const PATH_STROKE_COLOR: &str = "#008888";
pub const PATH_STROKE_WIDTH: u32 = 1;

/// The anomaly circle covers 100 km around the requested position.
pub const ANOMALY_RADIUS_METERS: f64 = 100_000.0;
pub const ANOMALY_STROKE_WIDTH: u32 = 4;
/// Alpha applied to the anomaly colour for the circle fill.
pub const ANOMALY_FILL_ALPHA: u8 = 0x50;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinColor {
    Green,
    Red,
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub pin_color: PinColor,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Polyline {
    pub coordinates: Vec<Coordinate>,
    pub stroke_color: &'static str,
    pub stroke_width: u32,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct AnomalyCircle {
    pub center: Coordinate,
    pub radius_meters: f64,
    pub average_anomaly: f64,
    pub color: AnomalyColor,
    pub stroke_color: String,
    pub fill_color: String,
    pub stroke_width: u32,
}

impl AnomalyCircle {
    fn around(center: Coordinate, anomalies: &[TemperaturePoint]) -> Self {
        let average = average_anomaly(Some(anomalies));
        let color = anomaly_color(average);
        Self {
            center,
            radius_meters: ANOMALY_RADIUS_METERS,
            average_anomaly: average,
            color,
            stroke_color: color.hex(),
            fill_color: color.hex_with_alpha(ANOMALY_FILL_ALPHA),
            stroke_width: ANOMALY_STROKE_WIDTH,
        }
    }
}

/// Everything a map view draws for one settled result.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MapOverlay {
    pub region: MapRegion,
    pub path: Option<Polyline>,
    pub start_marker: Option<Marker>,
    pub end_marker: Option<Marker>,
    pub anomaly_circle: Option<AnomalyCircle>,
}

impl MapOverlay {
    /// Path polyline with green start and red end markers.
    pub fn for_migration(migration: &[MigrationPoint]) -> Self {
        let coordinates = compute_path(Some(migration));
        let start_marker = coordinates.first().map(|&coordinate| Marker {
            coordinate,
            pin_color: PinColor::Green,
        });
        let end_marker = coordinates.last().map(|&coordinate| Marker {
            coordinate,
            pin_color: PinColor::Red,
        });
        Self {
            region: compute_map_region(Some(migration)),
            path: Some(Polyline {
                coordinates,
                stroke_color: PATH_STROKE_COLOR,
                stroke_width: PATH_STROKE_WIDTH,
            }),
            start_marker,
            end_marker,
            anomaly_circle: None,
        }
    }

    /// Anomaly circle around the requested position.
    pub fn for_temperature(request: &PredictionRequest, anomalies: &[TemperaturePoint]) -> Self {
        Self {
            region: temperature_map_region(request),
            path: None,
            start_marker: None,
            end_marker: None,
            anomaly_circle: Some(AnomalyCircle::around(requested_position(request), anomalies)),
        }
    }

    /// Migration path and markers plus the anomaly circle, framed on the path.
    pub fn for_combined(
        request: &PredictionRequest,
        migration: &[MigrationPoint],
        anomalies: &[TemperaturePoint],
    ) -> Self {
        Self {
            anomaly_circle: Some(AnomalyCircle::around(requested_position(request), anomalies)),
            ..Self::for_migration(migration)
        }
    }
}

fn requested_position(request: &PredictionRequest) -> Coordinate {
    Coordinate::new(request.latitude(), request.longitude())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> PredictionRequest {
        PredictionRequest::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            41.0,
            -70.0,
            3,
        )
        .unwrap()
    }

    fn migration() -> Vec<MigrationPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        [(41.0, -70.0), (41.5, -69.5), (42.0, -69.0)]
            .iter()
            .zip(start.iter_days())
            .map(|(&(lat, lon), date)| MigrationPoint {
                date,
                predicted_latitude: lat,
                predicted_longitude: lon,
                predicted_anomaly: 0.5,
            })
            .collect()
    }

    fn anomalies(values: &[f64]) -> Vec<TemperaturePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        values
            .iter()
            .zip(start.iter_days())
            .map(|(&temperature_anomaly, date)| TemperaturePoint {
                date,
                temperature_anomaly,
            })
            .collect()
    }

    #[test]
    fn test_migration_overlay_marks_both_ends() {
        let overlay = MapOverlay::for_migration(&migration());
        let path = overlay.path.unwrap();
        assert_eq!(path.coordinates.len(), 3);
        assert_eq!(path.stroke_color, "#008888");
        let start = overlay.start_marker.unwrap();
        let end = overlay.end_marker.unwrap();
        assert_eq!(start.coordinate, Coordinate::new(41.0, -70.0));
        assert_eq!(start.pin_color, PinColor::Green);
        assert_eq!(end.coordinate, Coordinate::new(42.0, -69.0));
        assert_eq!(end.pin_color, PinColor::Red);
        assert!(overlay.anomaly_circle.is_none());
    }

    #[test]
    fn test_empty_migration_overlay_has_no_markers() {
        let overlay = MapOverlay::for_migration(&[]);
        assert!(overlay.start_marker.is_none());
        assert!(overlay.end_marker.is_none());
        assert_eq!(overlay.region, MapRegion::world());
    }

    #[test]
    fn test_temperature_overlay_colors_circle_by_average() {
        let overlay = MapOverlay::for_temperature(&request(), &anomalies(&[0.535, 0.545]));
        let circle = overlay.anomaly_circle.unwrap();
        assert_eq!(circle.center, Coordinate::new(41.0, -70.0));
        assert_eq!(circle.color, AnomalyColor::Orange);
        assert_eq!(circle.stroke_color, "#FF9900");
        assert_eq!(circle.fill_color, "#FF990050");
        assert_eq!(circle.radius_meters, 100_000.0);
        assert!(overlay.path.is_none());
        assert_eq!(overlay.region.center(), Coordinate::new(41.0, -70.0));
    }

    #[test]
    fn test_combined_overlay_keeps_path_region() {
        let overlay =
            MapOverlay::for_combined(&request(), &migration(), &anomalies(&[0.40, 0.42]));
        assert!(overlay.path.is_some());
        assert_eq!(overlay.region.latitude_delta, 10.0);
        assert_eq!(overlay.anomaly_circle.unwrap().color, AnomalyColor::Blue);
    }
}
