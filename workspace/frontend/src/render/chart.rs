use common::ForecastResponse;
use rust_decimal::Decimal;

use super::palette::{color_for, color_with_alpha, Rgba, SAVINGS_COLOR};

pub const SAVINGS_SERIES: &str = "Savings";

/// Stroke weight of a series line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineWeight {
    Normal,
    Emphasized,
}

impl LineWeight {
    pub fn width(self) -> f64 {
        match self {
            LineWeight::Normal => 2.0,
            LineWeight::Emphasized => 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<Decimal>,
    pub stroke: Rgba,
    pub fill: Rgba,
    pub weight: LineWeight,
}

/// Line chart description: shared x-axis labels and the series drawn over them.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

pub(crate) fn build_chart(response: &ForecastResponse) -> ChartModel {
    let labels = response
        .forecast
        .iter()
        .map(|record| format!("Month {}", record.month))
        .collect();

    let mut series: Vec<ChartSeries> = response
        .categories
        .iter()
        .enumerate()
        .map(|(index, category)| ChartSeries {
            label: category.clone(),
            data: response
                .forecast
                .iter()
                .map(|record| record.amount(category))
                .collect(),
            stroke: color_for(index),
            fill: color_with_alpha(index, 0.1),
            weight: LineWeight::Normal,
        })
        .collect();

    series.push(ChartSeries {
        label: SAVINGS_SERIES.to_string(),
        data: response.forecast.iter().map(|record| record.savings).collect(),
        stroke: SAVINGS_COLOR,
        fill: SAVINGS_COLOR.with_alpha(0.1),
        weight: LineWeight::Emphasized,
    });

    ChartModel { labels, series }
}
