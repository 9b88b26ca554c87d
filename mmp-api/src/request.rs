use crate::error::InvalidParameter;
use chrono::NaiveDate;
use log::warn;
use mmp_utils::dates::{format_date, parse_date};
use serde::Serialize;

/// Number of prediction points used when the caller does not ask for one.
pub const DEFAULT_POINT_COUNT: u32 = 30;

/// Query parameters exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    pub start_date: String,
    pub end_date: String,
    pub latitude: String,
    pub longitude: String,
    pub num_points: Option<String>,
}

/// A validated prediction query. Built once per submitted run and never
/// modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRequest {
    start_date: NaiveDate,
    end_date: NaiveDate,
    latitude: f64,
    longitude: f64,
    point_count: u32,
}

/// Body of `POST /predict_migration`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationRequestBody {
    pub start_date: String,
    pub end_date: String,
    pub latitude: f64,
    pub longitude: f64,
    pub num_points: u32,
}

/// Body of `POST /predict_temperature`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureRequestBody {
    pub start_date: String,
    pub end_date: String,
    pub latitude: f64,
    pub longitude: f64,
}

fn parse_coordinate(
    field: &'static str,
    raw: &str,
    limit: f64,
) -> Result<f64, InvalidParameter> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidParameter::new(field, "value is empty"));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| InvalidParameter::new(field, format!("'{}' is not a number", trimmed)))?;
    check_coordinate(field, value, limit)
}

fn check_coordinate(field: &'static str, value: f64, limit: f64) -> Result<f64, InvalidParameter> {
    if !value.is_finite() {
        return Err(InvalidParameter::new(field, "must be a finite number"));
    }
    if value < -limit || value > limit {
        return Err(InvalidParameter::new(
            field,
            format!("{} is outside [-{}, {}]", value, limit, limit),
        ));
    }
    Ok(value)
}

fn parse_point_count(raw: &str) -> Result<u32, InvalidParameter> {
    let trimmed = raw.trim();
    let count = trimmed.parse::<u32>().map_err(|_| {
        InvalidParameter::new("num_points", format!("'{}' is not a positive integer", trimmed))
    })?;
    check_point_count(count)
}

fn check_point_count(count: u32) -> Result<u32, InvalidParameter> {
    if count == 0 {
        return Err(InvalidParameter::new("num_points", "must be at least 1"));
    }
    Ok(count)
}

fn parse_day(field: &'static str, raw: &str) -> Result<NaiveDate, InvalidParameter> {
    parse_date(raw).map_err(|_| {
        InvalidParameter::new(field, format!("'{}' is not a YYYY-MM-DD date", raw.trim()))
    })
}

impl PredictionRequest {
    /// Validate already-typed parameters.
    ///
    /// A start date after the end date is accepted; the service decides
    /// what such a window means.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        latitude: f64,
        longitude: f64,
        point_count: u32,
    ) -> Result<Self, InvalidParameter> {
        let latitude = check_coordinate("latitude", latitude, 90.0)?;
        let longitude = check_coordinate("longitude", longitude, 180.0)?;
        let point_count = check_point_count(point_count)?;
        if start_date > end_date {
            warn!(
                "start date {} is after end date {}; sending as entered",
                start_date, end_date
            );
        }
        Ok(Self {
            start_date,
            end_date,
            latitude,
            longitude,
            point_count,
        })
    }

    /// Validate raw input for a flow that needs a point count.
    pub fn parse(raw: &RawRequest) -> Result<Self, InvalidParameter> {
        let num_points = raw
            .num_points
            .as_deref()
            .ok_or_else(|| InvalidParameter::new("num_points", "value is missing"))?;
        let point_count = parse_point_count(num_points)?;
        Self::parse_with_count(raw, point_count)
    }

    /// Validate raw input for the temperature-only flow, where the point
    /// count is optional and falls back to [`DEFAULT_POINT_COUNT`].
    pub fn parse_without_points(raw: &RawRequest) -> Result<Self, InvalidParameter> {
        let point_count = match raw.num_points.as_deref() {
            Some(s) if !s.trim().is_empty() => parse_point_count(s)?,
            _ => DEFAULT_POINT_COUNT,
        };
        Self::parse_with_count(raw, point_count)
    }

    fn parse_with_count(raw: &RawRequest, point_count: u32) -> Result<Self, InvalidParameter> {
        let latitude = parse_coordinate("latitude", &raw.latitude, 90.0)?;
        let longitude = parse_coordinate("longitude", &raw.longitude, 180.0)?;
        let start_date = parse_day("start_date", &raw.start_date)?;
        let end_date = parse_day("end_date", &raw.end_date)?;
        Self::new(start_date, end_date, latitude, longitude, point_count)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn point_count(&self) -> u32 {
        self.point_count
    }

    pub fn migration_body(&self) -> MigrationRequestBody {
        MigrationRequestBody {
            start_date: format_date(&self.start_date),
            end_date: format_date(&self.end_date),
            latitude: self.latitude,
            longitude: self.longitude,
            num_points: self.point_count,
        }
    }

    pub fn temperature_body(&self) -> TemperatureRequestBody {
        TemperatureRequestBody {
            start_date: format_date(&self.start_date),
            end_date: format_date(&self.end_date),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
