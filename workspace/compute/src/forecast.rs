use common::{ForecastResponse, MonthRecord};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tracing::{debug, instrument, trace};

use crate::error::{ForecastError, Result};
use crate::history::ExpenseHistory;
use crate::regression::LinearTrend;

fn out_of_range(what: String) -> ForecastError {
    ForecastError::Processing(format!("{} is out of range", what))
}

fn add(total: Decimal, amount: Decimal, month: u32) -> Result<Decimal> {
    total
        .checked_add(amount)
        .ok_or_else(|| out_of_range(format!("total expense for month {}", month)))
}

fn savings(salary: Decimal, total_expense: Decimal, month: u32) -> Result<Decimal> {
    salary
        .checked_sub(total_expense)
        .ok_or_else(|| out_of_range(format!("savings for month {}", month)))
}

/// Builds the forecast payload for `history`.
///
/// The result contains every historical month (ascending) followed by
/// `forecast_months` projected months. Historical records only carry the
/// categories that have entries in that month. Projected amounts follow a
/// per-category linear trend, never go below zero and are rounded to cents.
/// Savings are `salary` minus the month's total expenses. Totals that do not
/// fit a `Decimal` are reported as processing errors.
#[instrument(skip(history), fields(categories = history.categories().len()))]
pub fn generate_forecast(
    history: &ExpenseHistory,
    salary: Decimal,
    forecast_months: usize,
) -> Result<ForecastResponse> {
    let totals = history.monthly_totals()?;
    let mut forecast = Vec::new();

    for month in history.months() {
        let mut record = MonthRecord::new(month, Decimal::ZERO);
        let mut total_expense = Decimal::ZERO;

        for category in history.categories() {
            if let Some(amount) = totals
                .get(category.as_str())
                .and_then(|by_month| by_month.get(&month))
            {
                record.amounts.insert(category.clone(), *amount);
                total_expense = add(total_expense, *amount, month)?;
            }
        }

        record.savings = savings(salary, total_expense, month)?;
        forecast.push(record);
    }

    let trends: Vec<(&String, Option<LinearTrend>)> = history
        .categories()
        .iter()
        .map(|category| {
            let points: Vec<(f64, f64)> = totals
                .get(category.as_str())
                .map(|by_month| {
                    by_month
                        .iter()
                        .map(|(month, amount)| (*month as f64, amount.to_f64().unwrap_or(0.0)))
                        .collect()
                })
                .unwrap_or_default();
            let trend = LinearTrend::fit(&points);
            trace!(category = %category, ?trend, "Fitted category trend");
            (category, trend)
        })
        .collect();

    let last_month = history.last_month();
    let horizon_end = u32::try_from(forecast_months)
        .ok()
        .and_then(|months| last_month.checked_add(months))
        .ok_or_else(|| {
            out_of_range(format!(
                "a {} month forecast after month {}",
                forecast_months, last_month
            ))
        })?;

    for month in (last_month..horizon_end).map(|m| m + 1) {
        let mut record = MonthRecord::new(month, Decimal::ZERO);
        let mut total_expense = Decimal::ZERO;

        for (category, trend) in &trends {
            let Some(trend) = trend else { continue };
            let predicted = trend.predict(month as f64).max(0.0);
            let amount = Decimal::from_f64(predicted)
                .ok_or_else(|| {
                    out_of_range(format!("projected amount for category {} in month {}", category, month))
                })?
                .round_dp(2);
            record.amounts.insert((*category).clone(), amount);
            total_expense = add(total_expense, amount, month)?;
        }

        record.savings = savings(salary, total_expense, month)?;
        forecast.push(record);
    }

    debug!(
        "Generated {} month records ({} projected)",
        forecast.len(),
        forecast_months
    );

    Ok(ForecastResponse {
        categories: history.categories().to_vec(),
        forecast,
    })
}
