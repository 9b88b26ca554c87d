use crate::error::ServiceError;
use crate::prediction::{MigrationPoint, TemperaturePoint};
use crate::request::PredictionRequest;
use async_trait::async_trait;

/// Remote prediction operations.
///
/// Each call is one request/response exchange and a pure function of the
/// request, so implementations never retry.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict_migration(
        &self,
        request: &PredictionRequest,
    ) -> Result<Vec<MigrationPoint>, ServiceError>;

    async fn predict_temperature(
        &self,
        request: &PredictionRequest,
    ) -> Result<Vec<TemperaturePoint>, ServiceError>;
}
