use crate::error::{ServiceError, Stage};
use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

/// Status string the service uses for a successful prediction.
pub const STATUS_SUCCESS: &str = "success";

/// One step of a predicted migration path. Order within a response is the
/// chronological order of the predictions.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MigrationPoint {
    #[serde(deserialize_with = "lenient_date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "lenient_f64")]
    pub predicted_latitude: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub predicted_longitude: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub predicted_anomaly: f64,
}

/// One day of predicted sea-surface temperature anomaly.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TemperaturePoint {
    #[serde(deserialize_with = "lenient_date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "lenient_f64")]
    pub temperature_anomaly: f64,
}

/// Envelope shared by both prediction endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse<T> {
    pub status: String,
    pub message: Option<String>,
    pub predictions: Option<Vec<T>>,
}

/// The service is not strict about numeric fields; numbers may arrive as
/// JSON numbers or as numeric strings.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("'{}' is not a number", s))),
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    mmp_utils::dates::parse_date_prefix(&s)
        .map_err(|_| de::Error::custom(format!("'{}' is not a date", s)))
}

impl<T: DeserializeOwned> PredictionResponse<T> {
    /// Decode a response body and unwrap its predictions.
    ///
    /// `http_status` is only used to enrich the message when the body
    /// cannot be decoded; the service reports failures through `status`.
    pub fn decode(stage: Stage, http_status: u16, body: &str) -> Result<Vec<T>, ServiceError> {
        let response: PredictionResponse<T> = serde_json::from_str(body).map_err(|e| {
            ServiceError::new(
                stage,
                format!("Malformed response (HTTP {}): {}", http_status, e),
            )
        })?;
        response.into_predictions(stage)
    }
}

impl<T> PredictionResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn into_predictions(self, stage: Stage) -> Result<Vec<T>, ServiceError> {
        if !self.is_success() {
            return Err(match self.message.filter(|m| !m.trim().is_empty()) {
                Some(message) => ServiceError::new(stage, message),
                None => ServiceError::unexplained(stage),
            });
        }
        self.predictions.ok_or_else(|| {
            ServiceError::new(stage, "Malformed response: missing predictions")
        })
    }
}
