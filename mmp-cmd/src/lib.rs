//! Command implementations for MMP CLI.
//!
//! Provides subcommands for the migration-only, temperature-only and
//! combined prediction views. Each one validates its input, runs its
//! predictions against the service and renders the settled view.

use anyhow::bail;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use log::info;
use mmp_api::client::HttpPredictionClient;
use mmp_api::request::{PredictionRequest, RawRequest, DEFAULT_POINT_COUNT};
use mmp_api::result::ErrorState;
use mmp_api::service::PredictionService;
use mmp_utils::dates::default_window;
use std::io::Write;

pub use mmp_api::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub mod combined;
pub mod report;
pub mod session;
pub mod single;

#[cfg(test)]
mod testing;

use report::{
    write_error, write_report, CombinedReport, MigrationReport, OutputFormat, TemperatureReport,
};
use session::PredictionSession;

/// Position and date window shared by every prediction.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Starting latitude in decimal degrees (e.g. 41.0293)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub latitude: String,

    /// Starting longitude in decimal degrees (e.g. -69.1234)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub longitude: String,

    /// First day to predict (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start_date: Option<String>,

    /// Last day to predict (defaults to one week from today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end_date: Option<String>,
}

impl QueryArgs {
    fn to_raw(&self, today: NaiveDate, num_points: Option<&str>) -> RawRequest {
        let (default_start, default_end) = default_window(today);
        RawRequest {
            start_date: self
                .start_date
                .clone()
                .unwrap_or_else(|| default_start.to_string()),
            end_date: self
                .end_date
                .clone()
                .unwrap_or_else(|| default_end.to_string()),
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
            num_points: num_points.map(str::to_string),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict a marine-life migration path
    Migration {
        #[command(flatten)]
        query: QueryArgs,

        /// Number of prediction points (days to predict for)
        #[arg(short = 'n', long, default_value_t = DEFAULT_POINT_COUNT.to_string())]
        num_points: String,
    },

    /// Predict sea-surface temperature anomalies around a position
    Temperature {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Predict the migration path, then the temperature anomalies, and show both
    Combined {
        #[command(flatten)]
        query: QueryArgs,

        /// Number of prediction points (days to predict for)
        #[arg(short = 'n', long, default_value_t = DEFAULT_POINT_COUNT.to_string())]
        num_points: String,
    },
}

/// What a view shows once its submission settles.
#[derive(Debug, Clone)]
pub enum ViewOutcome {
    Migration(MigrationReport),
    Temperature(TemperatureReport),
    Combined(CombinedReport),
    Failed(ErrorState),
}

impl ViewOutcome {
    pub fn write(&self, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
        match self {
            ViewOutcome::Migration(report) => write_report(report, format, out),
            ViewOutcome::Temperature(report) => write_report(report, format, out),
            ViewOutcome::Combined(report) => write_report(report, format, out),
            ViewOutcome::Failed(error) => write_error(error, format, out),
        }
    }

    pub fn error(&self) -> Option<&ErrorState> {
        match self {
            ViewOutcome::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Validate the command's input and run its predictions.
///
/// Invalid input is returned as an error before the service is contacted;
/// service failures settle the view as [`ViewOutcome::Failed`].
pub async fn submit<S>(
    service: &S,
    command: &Command,
    today: NaiveDate,
) -> anyhow::Result<ViewOutcome>
where
    S: PredictionService + ?Sized,
{
    let outcome = match command {
        Command::Migration { query, num_points } => {
            let request = PredictionRequest::parse(&query.to_raw(today, Some(num_points.as_str())))?;
            info!(
                "Requesting {} migration points from ({}, {})",
                request.point_count(),
                request.latitude(),
                request.longitude()
            );
            match single::run_migration(service, &request).await {
                Ok(points) => ViewOutcome::Migration(MigrationReport::new(&points)),
                Err(error) => ViewOutcome::Failed(error),
            }
        }
        Command::Temperature { query } => {
            let request = PredictionRequest::parse_without_points(&query.to_raw(today, None))?;
            info!(
                "Requesting temperature anomalies at ({}, {}) from {} to {}",
                request.latitude(),
                request.longitude(),
                request.start_date(),
                request.end_date()
            );
            match single::run_temperature(service, &request).await {
                Ok(points) => ViewOutcome::Temperature(TemperatureReport::new(&request, &points)),
                Err(error) => ViewOutcome::Failed(error),
            }
        }
        Command::Combined { query, num_points } => {
            let request = PredictionRequest::parse(&query.to_raw(today, Some(num_points.as_str())))?;
            info!(
                "Requesting combined prediction at ({}, {}) from {} to {}",
                request.latitude(),
                request.longitude(),
                request.start_date(),
                request.end_date()
            );
            let result = combined::run_combined(service, &request).await;
            match (result.migration(), result.anomalies(), result.error()) {
                (Some(migration), Some(anomalies), None) => {
                    ViewOutcome::Combined(CombinedReport::new(&request, migration, anomalies))
                }
                (_, _, Some(error)) => ViewOutcome::Failed(error.clone()),
                _ => bail!("combined prediction settled without data or error"),
            }
        }
    };
    Ok(outcome)
}

pub async fn run(
    command: Command,
    config: &ClientConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let client = HttpPredictionClient::new(config)?;
    info!("Using prediction service at {}", client.base_url());

    let mut session = PredictionSession::new();
    let ticket = session.begin();
    let today = Local::now().naive_local().date();
    let outcome = submit(&client, &command, today).await?;
    session.settle(ticket, outcome);

    let Some(outcome) = session.settled() else {
        bail!("prediction did not settle");
    };
    let stdout = std::io::stdout();
    outcome.write(format, &mut stdout.lock())?;
    if let Some(error) = outcome.error() {
        bail!("{} stage failed", error.failed_stage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubService;
    use clap::Parser;
    use mmp_api::error::{ServiceError, Stage};

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn parse(args: &[&str]) -> Command {
        TestCli::try_parse_from(std::iter::once("mmp").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_defaults_mirror_a_fresh_view() {
        let Command::Combined { query, num_points } = parse(&["combined"]) else {
            panic!("expected combined");
        };
        assert_eq!(num_points, "30");
        let raw = query.to_raw(today(), Some(num_points.as_str()));
        assert_eq!(raw.start_date, "2024-01-01");
        assert_eq!(raw.end_date, "2024-01-08");
        assert_eq!(raw.latitude, "0");
        assert_eq!(raw.longitude, "0");
    }

    #[test]
    fn test_negative_coordinates_parse_as_values() {
        let Command::Temperature { query } =
            parse(&["temperature", "--latitude", "-33.9", "--longitude", "-70.5"])
        else {
            panic!("expected temperature");
        };
        assert_eq!(query.latitude, "-33.9");
        assert_eq!(query.longitude, "-70.5");
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_service() {
        let service = StubService::new(Ok(StubService::migration(3)), Ok(Vec::new()));
        let command = parse(&["combined", "--latitude", "95", "--num-points", "3"]);
        let err = submit(&service, &command, today()).await.unwrap_err();
        assert!(err.to_string().contains("latitude"));
        assert_eq!(service.migration_calls(), 0);
        assert_eq!(service.temperature_calls(), 0);
    }

    #[tokio::test]
    async fn test_combined_submission_settles_report() {
        let service = StubService::new(
            Ok(StubService::migration(7)),
            Ok(StubService::anomalies(&[0.5; 7])),
        );
        let command = parse(&[
            "combined",
            "--latitude",
            "41.0",
            "--longitude",
            "-70.0",
            "--start-date",
            "2024-01-01",
            "--end-date",
            "2024-01-08",
            "-n",
            "7",
        ]);
        let outcome = submit(&service, &command, today()).await.unwrap();
        let ViewOutcome::Combined(report) = &outcome else {
            panic!("expected combined report, got {:?}", outcome);
        };
        assert_eq!(report.migration.len(), 7);
        assert_eq!(report.temperature.len(), 7);

        let mut out = Vec::new();
        outcome.write(OutputFormat::Csv, &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert!(csv.starts_with("date,latitude,longitude,anomaly\n"));
        assert!(csv.contains("\n\ndate,anomaly,color\n"));
    }

    #[tokio::test]
    async fn test_failed_submission_settles_error() {
        let service = StubService::new(
            Ok(StubService::migration(3)),
            Err(ServiceError::new(Stage::Temperature, "model offline")),
        );
        let command = parse(&["combined"]);
        let outcome = submit(&service, &command, today()).await.unwrap();
        let error = outcome.error().unwrap();
        assert_eq!(error.failed_stage, Stage::Temperature);
        assert_eq!(error.message, "model offline");
    }
}
