use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Number of future months the forecast service is asked to project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForecastHorizon {
    #[default]
    Three,
    Six,
    Twelve,
}

impl ForecastHorizon {
    /// Every selectable horizon, in display order.
    pub const ALL: [ForecastHorizon; 3] = [Self::Three, Self::Six, Self::Twelve];

    pub fn months(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Six => 6,
            Self::Twelve => 12,
        }
    }

    /// Value sent in the `forecast_months` form field.
    pub fn as_form_value(self) -> &'static str {
        match self {
            Self::Three => "3",
            Self::Six => "6",
            Self::Twelve => "12",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Three => "3 Months",
            Self::Six => "6 Months",
            Self::Twelve => "12 Months",
        }
    }
}

impl fmt::Display for ForecastHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_form_value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHorizonError(pub String);

impl fmt::Display for ParseHorizonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported forecast horizon '{}', expected 3, 6 or 12", self.0)
    }
}

impl std::error::Error for ParseHorizonError {}

impl FromStr for ForecastHorizon {
    type Err = ParseHorizonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "3" => Ok(Self::Three),
            "6" => Ok(Self::Six),
            "12" => Ok(Self::Twelve),
            other => Err(ParseHorizonError(other.to_string())),
        }
    }
}

/// One month of the forecast payload.
///
/// On the wire this is a flat JSON object: `month`, `savings` and one key per
/// category that has an amount for this month, e.g.
/// `{"month": 4, "savings": 1830.5, "Rent": 1200, "Food": 525}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    pub month: u32,
    /// Salary minus total expenses, as computed by the service
    pub savings: Decimal,
    #[serde(flatten)]
    pub amounts: BTreeMap<String, Decimal>,
}

impl MonthRecord {
    pub fn new(month: u32, savings: Decimal) -> Self {
        Self {
            month,
            savings,
            amounts: BTreeMap::new(),
        }
    }

    pub fn with_amount(mut self, category: impl Into<String>, amount: Decimal) -> Self {
        self.amounts.insert(category.into(), amount);
        self
    }

    /// Amount spent on `category`, zero when the month has no entry for it.
    pub fn amount(&self, category: &str) -> Decimal {
        self.amounts.get(category).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Response body of `POST /api/forecast`.
///
/// `categories` fixes the column order of the table and the series order of
/// the chart. `forecast` holds the historical months followed by the
/// projected ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastResponse {
    /// Expense categories in display order
    pub categories: Vec<String>,
    /// Month records, historical first
    #[schema(value_type = Vec<Object>)]
    pub forecast: Vec<MonthRecord>,
}

impl ForecastResponse {
    /// Number of leading records that hold observed data rather than projections.
    pub fn historical_count(&self, forecast_months: usize) -> usize {
        self.forecast.len().saturating_sub(forecast_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_parsing_accepts_only_supported_values() {
        assert_eq!("3".parse::<ForecastHorizon>(), Ok(ForecastHorizon::Three));
        assert_eq!(" 6 ".parse::<ForecastHorizon>(), Ok(ForecastHorizon::Six));
        assert_eq!("12".parse::<ForecastHorizon>(), Ok(ForecastHorizon::Twelve));
        assert!("4".parse::<ForecastHorizon>().is_err());
        assert!("".parse::<ForecastHorizon>().is_err());
    }

    #[test]
    fn test_horizon_form_value_matches_months() {
        for horizon in ForecastHorizon::ALL {
            assert_eq!(horizon.as_form_value(), horizon.months().to_string());
        }
        assert_eq!(ForecastHorizon::default(), ForecastHorizon::Three);
    }

    #[test]
    fn test_month_record_deserializes_flat_categories() {
        let json = r#"{"month": 4, "savings": 1830.5, "Rent": 1200, "Food": 525.25}"#;
        let record: MonthRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.month, 4);
        assert_eq!(record.savings, Decimal::new(18305, 1));
        assert_eq!(record.amount("Rent"), Decimal::from(1200));
        assert_eq!(record.amount("Food"), Decimal::new(52525, 2));
        assert_eq!(record.amounts.len(), 2);
    }

    #[test]
    fn test_missing_category_amount_is_zero() {
        let record = MonthRecord::new(1, Decimal::from(500)).with_amount("Rent", Decimal::from(1000));
        assert_eq!(record.amount("Food"), Decimal::ZERO);
    }

    #[test]
    fn test_month_record_serializes_amounts_as_numbers() {
        let record = MonthRecord::new(2, Decimal::new(-255, 1)).with_amount("Rent", Decimal::from(1200));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["month"], 2);
        assert_eq!(value["savings"].as_f64(), Some(-25.5));
        assert_eq!(value["Rent"].as_f64(), Some(1200.0));
    }

    #[test]
    fn test_response_requires_categories_and_forecast() {
        assert!(serde_json::from_str::<ForecastResponse>(r#"{"forecast": []}"#).is_err());
        assert!(serde_json::from_str::<ForecastResponse>(r#"{"categories": []}"#).is_err());
        assert!(serde_json::from_str::<ForecastResponse>(r#"{"categories": [], "forecast": {}}"#).is_err());
    }

    #[test]
    fn test_historical_count_saturates() {
        let response = ForecastResponse {
            categories: vec![],
            forecast: (1..=4).map(|m| MonthRecord::new(m, Decimal::ZERO)).collect(),
        };
        assert_eq!(response.historical_count(3), 1);
        assert_eq!(response.historical_count(4), 0);
        assert_eq!(response.historical_count(12), 0);
    }
}
