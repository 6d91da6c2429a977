//! Pure transformation of a forecast response into the table and chart the
//! page displays.

mod chart;
mod palette;
mod table;

pub use chart::{ChartModel, ChartSeries, LineWeight, SAVINGS_SERIES};
pub use palette::{color_for, color_with_alpha, Rgba, PALETTE_SIZE, SAVINGS_COLOR};
pub use table::{format_currency, RowKind, SavingsTone, TableModel, TableRow};

use common::ForecastResponse;

/// Builds both views of `response`.
///
/// The last `forecast_months` records are projections, everything before them
/// is historical. When the response holds fewer records than that, every row
/// is a projection.
pub fn render(response: &ForecastResponse, forecast_months: usize) -> (TableModel, ChartModel) {
    log::trace!(
        "Rendering {} records for {} categories",
        response.forecast.len(),
        response.categories.len()
    );
    (
        table::build_table(response, forecast_months),
        chart::build_chart(response),
    )
}
