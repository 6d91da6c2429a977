//! Validation of the scalar form fields sent along with the expense CSV.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::error::{ForecastError, Result};

/// Horizon used when the request does not name one.
pub const DEFAULT_FORECAST_MONTHS: usize = 3;

/// Upper bound on the projected months accepted from a request.
pub const MAX_FORECAST_MONTHS: usize = 120;

/// Parses the monthly salary. Missing, non-numeric and non-positive values are rejected.
pub fn parse_salary(raw: Option<&str>) -> Result<Decimal> {
    let raw = raw.ok_or(ForecastError::MissingSalary)?.trim();

    let salary = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| {
            debug!("Rejected salary '{}': {}", raw, e);
            ForecastError::InvalidSalary
        })?;

    if salary <= Decimal::ZERO {
        return Err(ForecastError::NonPositiveSalary);
    }
    Ok(salary)
}

/// Parses the number of months to project, defaulting to three when absent.
pub fn parse_forecast_months(raw: Option<&str>) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_FORECAST_MONTHS);
    };

    let months = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ForecastError::InvalidForecastMonths)?;

    if months <= 0 {
        return Err(ForecastError::NonPositiveForecastMonths);
    }
    let months = months as usize;
    if months > MAX_FORECAST_MONTHS {
        return Err(ForecastError::ForecastMonthsTooLarge {
            max: MAX_FORECAST_MONTHS,
        });
    }
    Ok(months)
}
