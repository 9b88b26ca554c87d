//! Migration-only and temperature-only predictions.

use log::warn;
use mmp_api::error::Stage;
use mmp_api::prediction::{MigrationPoint, TemperaturePoint};
use mmp_api::request::PredictionRequest;
use mmp_api::result::ErrorState;
use mmp_api::service::PredictionService;

const FALLBACK: &str = "Something went wrong";

pub async fn run_migration<S>(
    service: &S,
    request: &PredictionRequest,
) -> Result<Vec<MigrationPoint>, ErrorState>
where
    S: PredictionService + ?Sized,
{
    service.predict_migration(request).await.map_err(|err| {
        warn!("Migration prediction failed: {}", err);
        ErrorState::from_service(Stage::Migration, &err, FALLBACK)
    })
}

pub async fn run_temperature<S>(
    service: &S,
    request: &PredictionRequest,
) -> Result<Vec<TemperaturePoint>, ErrorState>
where
    S: PredictionService + ?Sized,
{
    service.predict_temperature(request).await.map_err(|err| {
        warn!("Temperature prediction failed: {}", err);
        ErrorState::from_service(Stage::Temperature, &err, FALLBACK)
    })
}
