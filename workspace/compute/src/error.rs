use thiserror::Error;

/// Error types for the forecast computation.
///
/// The display strings are the messages returned to API clients.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Monthly salary is required")]
    MissingSalary,

    #[error("Salary must be a valid number")]
    InvalidSalary,

    #[error("Salary must be a positive number")]
    NonPositiveSalary,

    #[error("CSV file is required")]
    MissingFile,

    #[error("No file selected")]
    EmptyFileName,

    #[error("Forecast months must be a valid number")]
    InvalidForecastMonths,

    #[error("Forecast months must be a positive number")]
    NonPositiveForecastMonths,

    #[error("Forecast months must be at most {max}")]
    ForecastMonthsTooLarge { max: usize },

    #[error("CSV file must have headers: month,category,amount")]
    InvalidHeader,

    #[error("Invalid month or amount for category {category}: {month}, {amount}")]
    InvalidRow {
        category: String,
        month: String,
        amount: String,
    },

    #[error("No valid data found in CSV file")]
    NoData,

    #[error("At least {required} months of data required, but only {found} months found")]
    NotEnoughMonths { required: usize, found: usize },

    /// Unreadable upload (bad encoding, broken multipart stream, CSV reader failure)
    #[error("Error processing CSV file: {0}")]
    Processing(String),
}

impl ForecastError {
    /// Machine readable code placed next to the message in error responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingSalary
            | Self::InvalidSalary
            | Self::NonPositiveSalary
            | Self::MissingFile
            | Self::EmptyFileName
            | Self::InvalidForecastMonths
            | Self::NonPositiveForecastMonths
            | Self::ForecastMonthsTooLarge { .. } => "VALIDATION_ERROR",
            Self::InvalidHeader
            | Self::InvalidRow { .. }
            | Self::NoData
            | Self::NotEnoughMonths { .. }
            | Self::Processing(_) => "CSV_ERROR",
        }
    }
}

/// Type alias for Result with ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;
