use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::chart::{ForecastChart, PlotlyRenderer, CHART_CONTAINER_ID};
use super::form::{ForecastForm, ForecastSubmission};
use super::sample::download_sample;
use super::table::ForecastTable;
use crate::api_client::submit_forecast;
use crate::common::error::ErrorDisplay;
use crate::common::loading::Loading;
use crate::controller::{ForecastController, UiState};

#[function_component(ForecastPage)]
pub fn forecast_page() -> Html {
    let controller =
        use_mut_ref(|| ForecastController::new(PlotlyRenderer::new(CHART_CONTAINER_ID)));
    let force_update = use_force_update();

    // Draw a freshly rendered chart once its container is visible.
    {
        let controller = controller.clone();
        use_effect(move || {
            controller.borrow_mut().sync_chart();
            || ()
        });
    }

    let on_submit = {
        let controller = controller.clone();
        let force_update = force_update.clone();

        Callback::from(move |submission: ForecastSubmission| {
            let ticket = match controller.borrow_mut().submit(submission.horizon) {
                Ok(ticket) => ticket,
                Err(e) => {
                    log::warn!("{}", e);
                    return;
                }
            };
            force_update.force_update();

            let controller = controller.clone();
            let force_update = force_update.clone();
            spawn_local(async move {
                let outcome = match submission.form_data {
                    Ok(form_data) => submit_forecast(form_data).await,
                    Err(e) => Err(e),
                };
                if controller.borrow_mut().resolve(ticket, outcome) {
                    force_update.force_update();
                }
            });
        })
    };

    let on_sample = Callback::from(|_: ()| {
        if let Err(e) = download_sample() {
            log::error!("Failed to download sample CSV: {:?}", e);
        }
    });

    let state = controller.borrow().state().clone();
    let busy = matches!(state, UiState::Submitting { .. });

    let status = match &state {
        UiState::Submitting { .. } => html! {
            <Loading text={"Generating forecast..."} />
        },
        UiState::Error { message } => html! { <ErrorDisplay message={message.clone()} /> },
        UiState::Idle | UiState::Success { .. } => html! {},
    };

    let (table, heading) = match &state {
        UiState::Success { table, horizon, .. } => (
            html! { <ForecastTable table={table.clone()} /> },
            format!("Forecast Results ({})", horizon.label()),
        ),
        _ => (html! {}, String::new()),
    };
    let results_class = classes!(
        "card",
        "bg-base-100",
        "shadow",
        (!matches!(state, UiState::Success { .. })).then_some("hidden")
    );

    html! {
        <div class="flex flex-col gap-6">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Expense Forecast"}</h2>
                    <p class="text-sm text-gray-500">
                        {"Upload your monthly expenses as CSV with the columns month, category and amount."}
                    </p>
                    <ForecastForm {busy} {on_submit} {on_sample} />
                </div>
            </div>
            {status}
            <div class={results_class}>
                <div class="card-body">
                    <h3 class="card-title">{heading}</h3>
                    {table}
                    <ForecastChart />
                </div>
            </div>
        </div>
    }
}
