pub mod error;
pub mod forecast;
pub mod history;
pub mod input;
pub mod regression;

pub use error::{ForecastError, Result};
pub use forecast::generate_forecast;
pub use history::{parse_history, ExpenseEntry, ExpenseHistory, MIN_HISTORY_MONTHS};
pub use input::{parse_forecast_months, parse_salary, DEFAULT_FORECAST_MONTHS, MAX_FORECAST_MONTHS};
