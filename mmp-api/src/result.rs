use crate::error::{ServiceError, Stage};
use crate::prediction::{MigrationPoint, TemperaturePoint};
use serde::{Deserialize, Serialize};

/// The single consolidated error a failed run reports.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ErrorState {
    pub message: String,
    pub failed_stage: Stage,
}

impl ErrorState {
    /// Charge `err` to the call made for `stage`, using `fallback` when the
    /// service gave no reason.
    pub fn from_service(stage: Stage, err: &ServiceError, fallback: &str) -> Self {
        Self {
            message: err.message_or(fallback).to_string(),
            failed_stage: stage,
        }
    }
}

/// Outcome of one combined run.
///
/// Either both series are present or the error is; the constructors are the
/// only way to build one, so a half-populated result cannot exist.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct CombinedResult {
    migration: Option<Vec<MigrationPoint>>,
    anomalies: Option<Vec<TemperaturePoint>>,
    error: Option<ErrorState>,
}

impl CombinedResult {
    pub fn success(migration: Vec<MigrationPoint>, anomalies: Vec<TemperaturePoint>) -> Self {
        Self {
            migration: Some(migration),
            anomalies: Some(anomalies),
            error: None,
        }
    }

    pub fn failure(error: ErrorState) -> Self {
        Self {
            migration: None,
            anomalies: None,
            error: Some(error),
        }
    }

    pub fn migration(&self) -> Option<&[MigrationPoint]> {
        self.migration.as_deref()
    }

    pub fn anomalies(&self) -> Option<&[TemperaturePoint]> {
        self.anomalies.as_deref()
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn failure_exposes_no_series() {
        let err = ServiceError::new(Stage::Temperature, "boom");
        let result =
            CombinedResult::failure(ErrorState::from_service(Stage::Temperature, &err, "unused"));
        assert!(!result.is_success());
        assert!(result.migration().is_none());
        assert!(result.anomalies().is_none());
        assert_eq!(result.error().unwrap().failed_stage, Stage::Temperature);
        assert_eq!(result.error().unwrap().message, "boom");
    }

    #[test]
    fn error_state_falls_back_when_service_is_silent() {
        let err = ServiceError::unexplained(Stage::Migration);
        let state = ErrorState::from_service(Stage::Migration, &err, "Something went wrong");
        assert_eq!(state.message, "Something went wrong");
        assert_eq!(state.failed_stage, Stage::Migration);
    }

    #[test]
    fn success_exposes_both_series() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let result = CombinedResult::success(
            vec![MigrationPoint {
                date,
                predicted_latitude: 1.0,
                predicted_longitude: 2.0,
                predicted_anomaly: 0.5,
            }],
            Vec::new(),
        );
        assert!(result.is_success());
        assert_eq!(result.migration().unwrap().len(), 1);
        assert_eq!(result.anomalies().unwrap().len(), 0);
        assert!(result.error().is_none());
    }

    #[test]
    fn serializes_error_with_stage_name() {
        let result = CombinedResult::failure(ErrorState {
            message: "timeout".to_string(),
            failed_stage: Stage::Migration,
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "migration": null,
                "anomalies": null,
                "error": {"message": "timeout", "failed_stage": "migration"}
            })
        );
    }
}
