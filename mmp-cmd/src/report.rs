//! Text, JSON and CSV renderings of settled predictions.

use clap::ValueEnum;
use mmp_api::prediction::{MigrationPoint, TemperaturePoint};
use mmp_api::request::PredictionRequest;
use mmp_api::result::ErrorState;
use mmp_data::anomaly::{anomaly_color, average_anomaly, AnomalyColor};
use mmp_data::overlay::MapOverlay;
use mmp_data::table::{
    migration_rows, temperature_rows, MigrationRow, TemperatureRow, MIGRATION_HEADERS,
    TEMPERATURE_HEADERS,
};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables plus a map summary
    #[default]
    Table,
    /// The full report as JSON
    Json,
    /// Table rows only, as CSV
    Csv,
}

/// Average anomaly with its colour bucket.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct AnomalySummary {
    pub average: f64,
    pub color: AnomalyColor,
}

impl AnomalySummary {
    fn of(anomalies: &[TemperaturePoint]) -> Self {
        let average = average_anomaly(Some(anomalies));
        Self {
            average,
            color: anomaly_color(average),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub overlay: MapOverlay,
    pub migration: Vec<MigrationRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemperatureReport {
    pub overlay: MapOverlay,
    pub summary: AnomalySummary,
    pub temperature: Vec<TemperatureRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CombinedReport {
    pub overlay: MapOverlay,
    pub summary: AnomalySummary,
    pub migration: Vec<MigrationRow>,
    pub temperature: Vec<TemperatureRow>,
}

impl MigrationReport {
    pub fn new(migration: &[MigrationPoint]) -> Self {
        Self {
            overlay: MapOverlay::for_migration(migration),
            migration: migration_rows(migration),
        }
    }
}

impl TemperatureReport {
    pub fn new(request: &PredictionRequest, anomalies: &[TemperaturePoint]) -> Self {
        Self {
            overlay: MapOverlay::for_temperature(request, anomalies),
            summary: AnomalySummary::of(anomalies),
            temperature: temperature_rows(anomalies),
        }
    }
}

impl CombinedReport {
    pub fn new(
        request: &PredictionRequest,
        migration: &[MigrationPoint],
        anomalies: &[TemperaturePoint],
    ) -> Self {
        Self {
            overlay: MapOverlay::for_combined(request, migration, anomalies),
            summary: AnomalySummary::of(anomalies),
            migration: migration_rows(migration),
            temperature: temperature_rows(anomalies),
        }
    }
}

/// A settled view that can be written out in any [`OutputFormat`].
pub trait Report: Serialize {
    fn title(&self) -> &'static str;
    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()>;
    fn write_csv(&self, out: &mut dyn Write) -> anyhow::Result<()>;
}

pub fn write_report<R: Report>(
    report: &R,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", report.title())?;
            report.write_text(out)
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => report.write_csv(out),
    }
}

pub fn write_error(
    error: &ErrorState,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &serde_json::json!({ "error": error }))?;
            writeln!(out)?;
        }
        OutputFormat::Table | OutputFormat::Csv => {
            writeln!(out, "Error ({}): {}", error.failed_stage, error.message)?;
        }
    }
    Ok(())
}

fn write_overlay(overlay: &MapOverlay, out: &mut dyn Write) -> anyhow::Result<()> {
    let region = &overlay.region;
    writeln!(
        out,
        "Map: centre ({:.4}, {:.4}), span {}° x {}°",
        region.center_latitude,
        region.center_longitude,
        region.latitude_delta,
        region.longitude_delta
    )?;
    if let Some(path) = &overlay.path {
        writeln!(out, "Path: {} points", path.coordinates.len())?;
    }
    if let (Some(start), Some(end)) = (&overlay.start_marker, &overlay.end_marker) {
        writeln!(
            out,
            "Start: ({:.4}, {:.4})  End: ({:.4}, {:.4})",
            start.coordinate.latitude,
            start.coordinate.longitude,
            end.coordinate.latitude,
            end.coordinate.longitude
        )?;
    }
    if let Some(circle) = &overlay.anomaly_circle {
        writeln!(
            out,
            "Anomaly: average {:.4} ({}, {}) within {} km of ({:.4}, {:.4})",
            circle.average_anomaly,
            circle.color,
            circle.stroke_color,
            circle.radius_meters / 1000.0,
            circle.center.latitude,
            circle.center.longitude
        )?;
    }
    Ok(())
}

fn write_migration_table(rows: &[MigrationRow], out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(
        out,
        "{:<12}{:>12}{:>12}{:>26}",
        MIGRATION_HEADERS[0], MIGRATION_HEADERS[1], MIGRATION_HEADERS[2], MIGRATION_HEADERS[3]
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<12}{:>12}{:>12}{:>26}",
            row.date, row.latitude, row.longitude, row.anomaly
        )?;
    }
    Ok(())
}

fn write_temperature_table(rows: &[TemperatureRow], out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(
        out,
        "{:<12}{:>26}  Colour",
        TEMPERATURE_HEADERS[0], TEMPERATURE_HEADERS[1]
    )?;
    for row in rows {
        writeln!(out, "{:<12}{:>26}  {}", row.date, row.anomaly, row.color)?;
    }
    Ok(())
}

fn write_csv_rows<T: Serialize>(rows: &[T], out: &mut dyn Write) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

impl Report for MigrationReport {
    fn title(&self) -> &'static str {
        "Migration Prediction Results"
    }

    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        write_overlay(&self.overlay, out)?;
        writeln!(out)?;
        write_migration_table(&self.migration, out)
    }

    fn write_csv(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        write_csv_rows(&self.migration, out)
    }
}

impl Report for TemperatureReport {
    fn title(&self) -> &'static str {
        "Temperature Anomaly Prediction Results"
    }

    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        write_overlay(&self.overlay, out)?;
        writeln!(out)?;
        write_temperature_table(&self.temperature, out)
    }

    fn write_csv(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        write_csv_rows(&self.temperature, out)
    }
}

impl Report for CombinedReport {
    fn title(&self) -> &'static str {
        "Combined Prediction Results"
    }

    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        write_overlay(&self.overlay, out)?;
        writeln!(out)?;
        write_migration_table(&self.migration, out)?;
        writeln!(out)?;
        write_temperature_table(&self.temperature, out)
    }

    /// Two CSV blocks separated by a blank line: migration, then temperature.
    fn write_csv(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        write_csv_rows(&self.migration, out)?;
        writeln!(out)?;
        write_csv_rows(&self.temperature, out)
    }
}
