use mmp_api::prediction::TemperaturePoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-level stepped scale for temperature anomalies.
///
/// The cut-offs sit in the narrow 0.48–0.55 band the anomaly metric
/// actually moves in; anything outside it collapses onto the end buckets.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyColor {
    Red,
    Orange,
    YellowGreen,
    Green,
    Blue,
}

/// Lower bounds (exclusive), checked top-down; first match wins.
const ANOMALY_THRESHOLDS: [(f64, AnomalyColor); 4] = [
    (0.55, AnomalyColor::Red),
    (0.53, AnomalyColor::Orange),
    (0.50, AnomalyColor::YellowGreen),
    (0.48, AnomalyColor::Green),
];

impl AnomalyColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            AnomalyColor::Red => (255, 0, 0),
            AnomalyColor::Orange => (255, 153, 0),
            AnomalyColor::YellowGreen => (229, 255, 0),
            AnomalyColor::Green => (0, 255, 85),
            AnomalyColor::Blue => (0, 0, 255),
        }
    }

    /// CSS functional notation, e.g. `rgb(255, 153, 0)`.
    pub fn css(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("rgb({}, {}, {})", r, g, b)
    }

    /// `#RRGGBB`
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// `#RRGGBBAA`
    pub fn hex_with_alpha(&self, alpha: u8) -> String {
        format!("{}{:02X}", self.hex(), alpha)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnomalyColor::Red => "red",
            AnomalyColor::Orange => "orange",
            AnomalyColor::YellowGreen => "yellow-green",
            AnomalyColor::Green => "green",
            AnomalyColor::Blue => "blue",
        }
    }
}

impl fmt::Display for AnomalyColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bucket an anomaly value. NaN lands in the bottom bucket.
pub fn anomaly_color(value: f64) -> AnomalyColor {
    ANOMALY_THRESHOLDS
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map(|(_, color)| *color)
        .unwrap_or(AnomalyColor::Blue)
}

/// Arithmetic mean of the anomaly series; 0 when there is nothing to average.
pub fn average_anomaly(anomalies: Option<&[TemperaturePoint]>) -> f64 {
    match anomalies {
        Some(points) if !points.is_empty() => {
            let sum: f64 = points.iter().map(|p| p.temperature_anomaly).sum();
            sum / points.len() as f64
        }
        _ => 0.0,
    }
}
