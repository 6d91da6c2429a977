use yew::prelude::*;

use crate::render::TableModel;

#[derive(Properties, PartialEq)]
pub struct ForecastTableProps {
    pub table: TableModel,
}

#[function_component(ForecastTable)]
pub fn forecast_table(props: &ForecastTableProps) -> Html {
    let table = &props.table;

    html! {
        <div class="overflow-x-auto">
            <table class="table table-zebra table-sm">
                <thead>
                    <tr>
                        { for table.columns.iter().map(|column| html! { <th>{column}</th> }) }
                    </tr>
                </thead>
                <tbody>
                    { for table.rows.iter().map(|row| {
                        let row_class = if row.is_historical() { "bg-base-200 font-medium" } else { "" };
                        html! {
                            <tr key={row.month.to_string()} class={row_class}>
                                <td>{&row.label}</td>
                                { for row.amount_cells().into_iter().map(|cell| html! { <td>{cell}</td> }) }
                                <td class="font-semibold">{row.total_cell()}</td>
                                <td class={classes!("font-semibold", row.savings_tone().class())}>
                                    {row.savings_cell()}
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
