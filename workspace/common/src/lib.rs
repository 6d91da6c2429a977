//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the forecast endpoint's request/response payloads
//! so the frontend can deserialize API responses without duplicating shapes.

mod forecast;
mod sample;

pub use forecast::{ForecastHorizon, ForecastResponse, MonthRecord, ParseHorizonError};
pub use sample::{SAMPLE_CSV, SAMPLE_CSV_FILE_NAME};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by the forecast service.
/// The frontend only relies on `error`; the other fields are informative.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    /// Human readable error message
    pub error: String,
    /// Error code
    #[serde(default)]
    pub code: String,
    /// Success status (always false for errors)
    #[serde(default)]
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            success: false,
        }
    }
}

/// Multipart field names understood by `POST /api/forecast`.
pub mod fields {
    pub const SALARY: &str = "salary";
    pub const CSV_FILE: &str = "csv_file";
    pub const FORECAST_MONTHS: &str = "forecast_months";
}
