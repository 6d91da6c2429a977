use common::{fields, ForecastHorizon};
use web_sys::{FormData, HtmlFormElement, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api_client::ForecastError;

/// What the form hands to the page when submitted.
pub struct ForecastSubmission {
    pub horizon: ForecastHorizon,
    pub form_data: Result<FormData, ForecastError>,
}

#[derive(Properties, PartialEq)]
pub struct ForecastFormProps {
    pub busy: bool,
    pub on_submit: Callback<ForecastSubmission>,
    pub on_sample: Callback<()>,
}

fn read_form(form: &HtmlFormElement, file_ref: &NodeRef) -> Result<FormData, ForecastError> {
    let has_file = file_ref
        .cast::<HtmlInputElement>()
        .and_then(|input| input.files())
        .map(|files| files.length() > 0)
        .unwrap_or(false);
    if !has_file {
        return Err(ForecastError::Form(
            "Please choose a CSV file with your expense history.".to_string(),
        ));
    }

    FormData::new_with_form(form).map_err(|e| {
        log::error!("Failed to read forecast form: {:?}", e);
        ForecastError::Form("The form could not be read.".to_string())
    })
}

#[function_component(ForecastForm)]
pub fn forecast_form(props: &ForecastFormProps) -> Html {
    let file_ref = use_node_ref();
    let horizon_ref = use_node_ref();

    let onsubmit = {
        let file_ref = file_ref.clone();
        let horizon_ref = horizon_ref.clone();
        let on_submit = props.on_submit.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(form) = e.target_dyn_into::<HtmlFormElement>() else {
                log::error!("Submit event did not come from a form");
                return;
            };

            let horizon = horizon_ref
                .cast::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<ForecastHorizon>().ok())
                .unwrap_or_default();
            log::debug!("Forecast form submitted with horizon {}", horizon);

            on_submit.emit(ForecastSubmission {
                horizon,
                form_data: read_form(&form, &file_ref),
            });
        })
    };

    let on_sample_click = {
        let on_sample = props.on_sample.clone();
        Callback::from(move |_: MouseEvent| on_sample.emit(()))
    };

    html! {
        <form class="flex flex-col gap-4" {onsubmit}>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Monthly Salary ($)"}</span></label>
                    <input
                        type="number"
                        name={fields::SALARY}
                        class="input input-bordered"
                        min="0.01"
                        step="0.01"
                        placeholder="5000"
                        required=true
                    />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Expense History (CSV)"}</span></label>
                    <input
                        type="file"
                        name={fields::CSV_FILE}
                        class="file-input file-input-bordered"
                        accept=".csv,text/csv"
                        required=true
                        ref={file_ref}
                    />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">{"Forecast Period"}</span></label>
                    <select name={fields::FORECAST_MONTHS} class="select select-bordered" ref={horizon_ref}>
                        { for ForecastHorizon::ALL.iter().map(|horizon| html! {
                            <option
                                value={horizon.as_form_value()}
                                selected={*horizon == ForecastHorizon::default()}
                            >
                                {horizon.label()}
                            </option>
                        })}
                    </select>
                </div>
            </div>
            <div class="flex gap-2 justify-end">
                <button type="button" class="btn btn-ghost" onclick={on_sample_click}>
                    <i class="fas fa-download"></i>
                    {" Download Sample CSV"}
                </button>
                <button type="submit" class="btn btn-primary" disabled={props.busy}>
                    if props.busy {
                        <span class="loading loading-spinner loading-sm"></span>
                    }
                    {"Generate Forecast"}
                </button>
            </div>
        </form>
    }
}
