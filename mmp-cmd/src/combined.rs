//! Combined migration + temperature prediction.

use log::{info, warn};
use mmp_api::error::Stage;
use mmp_api::request::PredictionRequest;
use mmp_api::result::{CombinedResult, ErrorState};
use mmp_api::service::PredictionService;

const MIGRATION_FALLBACK: &str = "Error predicting migration";
const TEMPERATURE_FALLBACK: &str = "Error predicting temperature anomalies";

/// Run the migration prediction, then the temperature prediction.
///
/// Every failure is charged to the call that hit it, transport errors
/// included. A migration failure ends the run before the temperature call
/// is made. A temperature failure drops the migration series that already arrived:
/// the caller gets both series or an error, never one of each.
pub async fn run_combined<S>(service: &S, request: &PredictionRequest) -> CombinedResult
where
    S: PredictionService + ?Sized,
{
    let migration = match service.predict_migration(request).await {
        Ok(points) => points,
        Err(err) => {
            warn!("Migration prediction failed: {}", err);
            return CombinedResult::failure(ErrorState::from_service(
                Stage::Migration,
                &err,
                MIGRATION_FALLBACK,
            ));
        }
    };

    let anomalies = match service.predict_temperature(request).await {
        Ok(points) => points,
        Err(err) => {
            warn!(
                "Temperature prediction failed: {}; discarding {} migration points",
                err,
                migration.len()
            );
            return CombinedResult::failure(ErrorState::from_service(
                Stage::Temperature,
                &err,
                TEMPERATURE_FALLBACK,
            ));
        }
    };

    info!(
        "Combined prediction settled: {} migration points, {} temperature points",
        migration.len(),
        anomalies.len()
    );
    CombinedResult::success(migration, anomalies)
}
