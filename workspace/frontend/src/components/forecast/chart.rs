use plotly::common::{Fill, Line, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Scatter};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

use crate::controller::{ChartHandle, ChartRenderer};
use crate::render::ChartModel;

/// Id of the element the forecast chart is drawn into.
pub const CHART_CONTAINER_ID: &str = "forecast-chart";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);

    #[wasm_bindgen(js_namespace = Plotly)]
    fn purge(div_id: &str);
}

pub(crate) fn plot_traces(model: &ChartModel) -> Vec<Box<Scatter<String, f64>>> {
    model
        .series
        .iter()
        .map(|series| {
            let values = series
                .data
                .iter()
                .map(|v| v.to_f64().unwrap_or(0.0))
                .collect();

            Scatter::new(model.labels.clone(), values)
                .mode(Mode::LinesMarkers)
                .name(&series.label)
                .line(
                    Line::new()
                        .color(series.stroke.to_string())
                        .width(series.weight.width()),
                )
                .fill(Fill::ToZeroY)
                .fill_color(series.fill.to_string())
        })
        .collect()
}

fn plot_layout() -> Layout {
    Layout::new()
        .title(Title::with_text("Expense and Savings Forecast"))
        .x_axis(Axis::new().title(Title::with_text("Month")))
        .y_axis(Axis::new().title(Title::with_text("Amount ($)")))
        .height(400)
}

/// Draws charts with Plotly into a fixed container element.
#[derive(Debug)]
pub struct PlotlyRenderer {
    target: String,
}

impl PlotlyRenderer {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl ChartRenderer for PlotlyRenderer {
    fn draw(&mut self, model: &ChartModel) -> ChartHandle {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let data = plot_traces(model).serialize(&serializer);
        let layout = plot_layout().serialize(&serializer);

        match (data, layout) {
            (Ok(data), Ok(layout)) => newPlot(&self.target, data, layout),
            (Err(e), _) | (_, Err(e)) => {
                log::error!("Failed to convert chart for Plotly: {}", e)
            }
        }

        ChartHandle::new(self.target.clone())
    }

    fn release(&mut self, handle: ChartHandle) {
        purge(handle.target());
    }
}

/// Container the controller draws into. Stays mounted so the chart can be
/// drawn right after the results become visible.
#[function_component(ForecastChart)]
pub fn forecast_chart() -> Html {
    html! {
        <div id={CHART_CONTAINER_ID} style="width:100%; height:400px;"></div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, SAVINGS_COLOR};
    use common::{ForecastResponse, MonthRecord};
    use rust_decimal::Decimal;

    #[test]
    fn test_traces_carry_series_styling() {
        let response = ForecastResponse {
            categories: vec!["Rent".into()],
            forecast: vec![
                MonthRecord::new(1, Decimal::new(1505, 1)).with_amount("Rent", Decimal::from(900)),
            ],
        };
        let (_, chart) = render(&response, 0);

        let traces = serde_json::to_value(plot_traces(&chart)).unwrap();

        assert_eq!(traces[0]["name"], "Rent");
        assert_eq!(traces[0]["x"][0], "Month 1");
        assert_eq!(traces[0]["y"][0], 900.0);
        assert_eq!(traces[1]["name"], "Savings");
        assert_eq!(traces[1]["y"][0], 150.5);
        assert_eq!(traces[1]["line"]["color"], SAVINGS_COLOR.to_string());
        assert_eq!(traces[1]["line"]["width"], 3.0);
    }
}
