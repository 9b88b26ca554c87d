use crate::anomaly::{anomaly_color, AnomalyColor};
use mmp_api::prediction::{MigrationPoint, TemperaturePoint};
use mmp_utils::dates::format_date;
use serde::Serialize;

/// Decimal places shown for coordinates and anomalies.
pub const TABLE_PRECISION: usize = 4;

pub const MIGRATION_HEADERS: [&str; 4] = [
    "Date",
    "Latitude",
    "Longitude",
    "Temperature Anomaly (°C)",
];
pub const TEMPERATURE_HEADERS: [&str; 2] = ["Date", "Temperature Anomaly (°C)"];

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct MigrationRow {
    pub date: String,
    pub latitude: String,
    pub longitude: String,
    pub anomaly: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct TemperatureRow {
    pub date: String,
    pub anomaly: String,
    pub color: AnomalyColor,
}

fn fixed(value: f64) -> String {
    format!("{:.*}", TABLE_PRECISION, value)
}

pub fn migration_rows(migration: &[MigrationPoint]) -> Vec<MigrationRow> {
    migration
        .iter()
        .map(|point| MigrationRow {
            date: format_date(&point.date),
            latitude: fixed(point.predicted_latitude),
            longitude: fixed(point.predicted_longitude),
            anomaly: fixed(point.predicted_anomaly),
        })
        .collect()
}

/// Temperature rows, each tagged with the colour bucket of its own value.
pub fn temperature_rows(anomalies: &[TemperaturePoint]) -> Vec<TemperatureRow> {
    anomalies
        .iter()
        .map(|point| TemperatureRow {
            date: format_date(&point.date),
            anomaly: fixed(point.temperature_anomaly),
            color: anomaly_color(point.temperature_anomaly),
        })
        .collect()
}
