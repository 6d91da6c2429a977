//! Parsing of the uploaded expense history.
//!
//! The CSV must start with the header `month,category,amount` (case
//! insensitive). Rows with a different column count, or with an empty month or
//! category, are skipped. Any other malformed row rejects the whole upload.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use tracing::{debug, instrument, trace};

use crate::error::{ForecastError, Result};
use crate::input::MAX_FORECAST_MONTHS;

/// Minimum number of distinct months needed to fit a trend.
pub const MIN_HISTORY_MONTHS: usize = 3;

const EXPECTED_HEADERS: [&str; 3] = ["month", "category", "amount"];

/// One line of the uploaded CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseEntry {
    pub month: u32,
    pub category: String,
    pub amount: Decimal,
}

/// Validated expense history.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseHistory {
    entries: Vec<ExpenseEntry>,
    categories: Vec<String>,
    months: BTreeSet<u32>,
}

impl ExpenseHistory {
    /// Builds a history from already parsed entries.
    ///
    /// Categories keep the order of their first appearance.
    pub fn from_entries(entries: Vec<ExpenseEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ForecastError::NoData);
        }

        let mut categories: Vec<String> = Vec::new();
        let mut months = BTreeSet::new();
        for entry in &entries {
            if !categories.contains(&entry.category) {
                categories.push(entry.category.clone());
            }
            months.insert(entry.month);
        }

        if months.len() < MIN_HISTORY_MONTHS {
            return Err(ForecastError::NotEnoughMonths {
                required: MIN_HISTORY_MONTHS,
                found: months.len(),
            });
        }

        Ok(Self {
            entries,
            categories,
            months,
        })
    }

    pub fn entries(&self) -> &[ExpenseEntry] {
        &self.entries
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distinct months in ascending order.
    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        self.months.iter().copied()
    }

    pub fn last_month(&self) -> u32 {
        self.months.iter().next_back().copied().unwrap_or_default()
    }

    /// Per-category totals keyed by month. Duplicate rows for the same month are summed.
    pub fn monthly_totals(&self) -> Result<BTreeMap<&str, BTreeMap<u32, Decimal>>> {
        let mut totals: BTreeMap<&str, BTreeMap<u32, Decimal>> = BTreeMap::new();
        for entry in &self.entries {
            let total = totals
                .entry(entry.category.as_str())
                .or_default()
                .entry(entry.month)
                .or_insert(Decimal::ZERO);
            *total = total.checked_add(entry.amount).ok_or_else(|| {
                ForecastError::Processing(format!(
                    "total for category {} in month {} is out of range",
                    entry.category, entry.month
                ))
            })?;
        }
        Ok(totals)
    }
}

/// Parses and validates the CSV text of an upload.
#[instrument(skip(content), fields(bytes = content.len()))]
pub fn parse_history(content: &str) -> Result<ExpenseHistory> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| ForecastError::Processing(e.to_string()))?,
        None => return Err(ForecastError::InvalidHeader),
    };
    let header_matches = header.len() == EXPECTED_HEADERS.len()
        && header
            .iter()
            .zip(EXPECTED_HEADERS)
            .all(|(found, expected)| found.eq_ignore_ascii_case(expected));
    if !header_matches {
        debug!("Rejected CSV header: {:?}", header);
        return Err(ForecastError::InvalidHeader);
    }

    let mut entries = Vec::new();
    for record in records {
        let record = record.map_err(|e| ForecastError::Processing(e.to_string()))?;
        if record.len() != 3 {
            trace!("Skipping row with {} columns", record.len());
            continue;
        }

        let (month, category, amount) = (&record[0], &record[1], &record[2]);
        if month.is_empty() || category.is_empty() {
            trace!("Skipping row with empty month or category");
            continue;
        }

        let invalid_row = || ForecastError::InvalidRow {
            category: category.to_string(),
            month: month.to_string(),
            amount: amount.to_string(),
        };
        let month = month
            .parse::<u32>()
            .ok()
            .filter(|m| *m > 0 && m.checked_add(MAX_FORECAST_MONTHS as u32).is_some())
            .ok_or_else(invalid_row)?;
        let amount = Decimal::from_str(amount)
            .or_else(|_| Decimal::from_scientific(amount))
            .map_err(|_| invalid_row())?;

        entries.push(ExpenseEntry {
            month,
            category: category.to_string(),
            amount,
        });
    }

    debug!("Parsed {} expense entries", entries.len());
    ExpenseHistory::from_entries(entries)
}
