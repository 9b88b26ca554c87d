//! Canned prediction service for exercising the command layer offline.

use async_trait::async_trait;
use chrono::NaiveDate;
use mmp_api::error::ServiceError;
use mmp_api::prediction::{MigrationPoint, TemperaturePoint};
use mmp_api::request::PredictionRequest;
use mmp_api::service::PredictionService;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct StubService {
    migration: Result<Vec<MigrationPoint>, ServiceError>,
    temperature: Result<Vec<TemperaturePoint>, ServiceError>,
    migration_calls: AtomicUsize,
    temperature_calls: AtomicUsize,
}

impl StubService {
    pub fn new(
        migration: Result<Vec<MigrationPoint>, ServiceError>,
        temperature: Result<Vec<TemperaturePoint>, ServiceError>,
    ) -> Self {
        Self {
            migration,
            temperature,
            migration_calls: AtomicUsize::new(0),
            temperature_calls: AtomicUsize::new(0),
        }
    }

    /// `count` daily points heading north-east from (41.0, -70.0), from 2024-01-01.
    pub fn migration(count: usize) -> Vec<MigrationPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        start
            .iter_days()
            .take(count)
            .enumerate()
            .map(|(i, date)| MigrationPoint {
                date,
                predicted_latitude: 41.0 + 0.5 * i as f64,
                predicted_longitude: -70.0 + 0.25 * i as f64,
                predicted_anomaly: 0.5 + 0.01 * i as f64,
            })
            .collect()
    }

    /// One daily point per value, from 2024-01-01.
    pub fn anomalies(values: &[f64]) -> Vec<TemperaturePoint> {
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

    pub fn migration_calls(&self) -> usize {
        self.migration_calls.load(Ordering::SeqCst)
    }

    pub fn temperature_calls(&self) -> usize {
        self.temperature_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PredictionService for StubService {
    async fn predict_migration(
        &self,
        _request: &PredictionRequest,
    ) -> Result<Vec<MigrationPoint>, ServiceError> {
        self.migration_calls.fetch_add(1, Ordering::SeqCst);
        self.migration.clone()
    }

    async fn predict_temperature(
        &self,
        _request: &PredictionRequest,
    ) -> Result<Vec<TemperaturePoint>, ServiceError> {
        self.temperature_calls.fetch_add(1, Ordering::SeqCst);
        self.temperature.clone()
    }
}
