use common::ForecastResponse;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::config::ServerConfig;

pub use common::ErrorResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Resolved server configuration
    pub config: Arc<ServerConfig>,
}

/// Multipart form accepted by the forecast endpoint
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ForecastForm {
    /// Monthly salary, positive number
    #[schema(example = "5000")]
    pub salary: String,
    /// CSV file with header `month,category,amount`
    #[schema(value_type = String, format = Binary)]
    pub csv_file: Vec<u8>,
    /// Number of months to project (defaults to 3)
    #[schema(example = "6")]
    pub forecast_months: Option<String>,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::forecast::create_forecast,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ForecastForm,
            ForecastResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forecast", description = "Expense and savings forecasting"),
    ),
    info(
        title = "Expense Forecast API",
        description = "Projects monthly expenses per category and the resulting savings from a CSV history",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
