use common::ForecastResponse;
use rust_decimal::{Decimal, RoundingStrategy};

pub const MONTH_COLUMN: &str = "Month";
pub const TOTAL_COLUMN: &str = "Total";
pub const SAVINGS_COLUMN: &str = "Savings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Historical,
    Forecast,
}

impl RowKind {
    pub fn suffix(self) -> &'static str {
        match self {
            RowKind::Historical => "Historical",
            RowKind::Forecast => "Forecast",
        }
    }
}

/// Styling hint for the savings cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsTone {
    Positive,
    Negative,
}

impl SavingsTone {
    /// Tone of `savings` as displayed, i.e. after rounding to cents.
    pub fn of(savings: Decimal) -> Self {
        if round_cents(savings) < Decimal::ZERO {
            SavingsTone::Negative
        } else {
            SavingsTone::Positive
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            SavingsTone::Positive => "text-success",
            SavingsTone::Negative => "text-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub month: u32,
    pub label: String,
    pub kind: RowKind,
    /// Raw amounts, one per category column
    pub amounts: Vec<Decimal>,
    pub total: Decimal,
    pub savings: Decimal,
}

impl TableRow {
    pub fn is_historical(&self) -> bool {
        self.kind == RowKind::Historical
    }

    pub fn amount_cells(&self) -> Vec<String> {
        self.amounts.iter().copied().map(format_currency).collect()
    }

    pub fn total_cell(&self) -> String {
        format_currency(self.total)
    }

    pub fn savings_cell(&self) -> String {
        format_currency(self.savings)
    }

    pub fn savings_tone(&self) -> SavingsTone {
        SavingsTone::of(self.savings)
    }
}

/// Table description: headers plus one row per month record.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableModel {
    /// Headers between `Month` and `Total`.
    pub fn category_columns(&self) -> &[String] {
        let end = self.columns.len().saturating_sub(2);
        self.columns.get(1..end).unwrap_or(&[])
    }
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as dollars with two decimals, e.g. `$1200.00` or `-$42.10`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    if rounded < Decimal::ZERO {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

pub(crate) fn build_table(response: &ForecastResponse, forecast_months: usize) -> TableModel {
    let historical_count = response.historical_count(forecast_months);

    let mut columns = Vec::with_capacity(response.categories.len() + 3);
    columns.push(MONTH_COLUMN.to_string());
    columns.extend(response.categories.iter().cloned());
    columns.push(TOTAL_COLUMN.to_string());
    columns.push(SAVINGS_COLUMN.to_string());

    let rows = response
        .forecast
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let kind = if index < historical_count {
                RowKind::Historical
            } else {
                RowKind::Forecast
            };
            let amounts: Vec<Decimal> = response
                .categories
                .iter()
                .map(|category| record.amount(category))
                .collect();
            let total = amounts.iter().copied().sum();

            TableRow {
                month: record.month,
                label: format!("Month {} ({})", record.month, kind.suffix()),
                kind,
                amounts,
                total,
                savings: record.savings,
            }
        })
        .collect();

    TableModel { columns, rows }
}
