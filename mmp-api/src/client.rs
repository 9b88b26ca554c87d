//! HTTP client for the prediction service.

use crate::error::{ServiceError, Stage};
use crate::prediction::{MigrationPoint, PredictionResponse, TemperaturePoint};
use crate::request::PredictionRequest;
use crate::service::PredictionService;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const MIGRATION_PATH: &str = "predict_migration";
pub const TEMPERATURE_PATH: &str = "predict_temperature";

/// Where the prediction service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// [`PredictionService`] backed by the model-serving HTTP API.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: Client,
    base_url: String,
}

impl HttpPredictionClient {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Reuse an existing reqwest client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post<B, T>(
        &self,
        stage: Stage,
        path: &str,
        body: &B,
    ) -> Result<Vec<T>, ServiceError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::connection(stage, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::connection(stage, e))?;
        debug!("{} responded {} ({} bytes)", url, status, text.len());
        PredictionResponse::<T>::decode(stage, status.as_u16(), &text)
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict_migration(
        &self,
        request: &PredictionRequest,
    ) -> Result<Vec<MigrationPoint>, ServiceError> {
        let points: Vec<MigrationPoint> = self
            .post(Stage::Migration, MIGRATION_PATH, &request.migration_body())
            .await?;
        info!("Received {} migration predictions", points.len());
        Ok(points)
    }

    async fn predict_temperature(
        &self,
        request: &PredictionRequest,
    ) -> Result<Vec<TemperaturePoint>, ServiceError> {
        let points: Vec<TemperaturePoint> = self
            .post(Stage::Temperature, TEMPERATURE_PATH, &request.temperature_body())
            .await?;
        info!("Received {} temperature predictions", points.len());
        Ok(points)
    }
}
