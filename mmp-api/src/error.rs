/// Error types for prediction requests
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The part of the pipeline a failure is attributed to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Migration,
    Temperature,
    /// Not tied to either prediction call.
    Network,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Migration => "migration",
            Stage::Temperature => "temperature",
            Stage::Network => "network",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-entered value was rejected before any request was sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {reason}")]
pub struct InvalidParameter {
    /// Wire name of the offending field, e.g. "latitude" or "num_points"
    pub field: &'static str,
    pub reason: String,
}

impl InvalidParameter {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// A remote prediction call failed or returned a non-success status.
///
/// `message` is `None` when the service rejected the call without saying
/// why; callers pick their own wording for that case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{stage} prediction failed: {}", .message.as_deref().unwrap_or("no message from the service"))]
pub struct ServiceError {
    pub stage: Stage,
    pub message: Option<String>,
}

impl ServiceError {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: Some(message.into()),
        }
    }

    pub fn unexplained(stage: Stage) -> Self {
        Self {
            stage,
            message: None,
        }
    }

    /// Transport-level failure: unreachable host, timeout, broken body stream.
    pub fn connection(stage: Stage, cause: impl fmt::Display) -> Self {
        Self::new(stage, format!("Connection error: {}", cause))
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}
