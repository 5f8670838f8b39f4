use yew::prelude::*;
use web_sys::MouseEvent;
use shared::Standard;

#[derive(Properties, PartialEq)]
pub struct StandardsTableProps {
    pub standards: Vec<Standard>,
    pub loading: bool,
    pub on_edit: Callback<Standard>,
}

pub fn format_fee(amount: f64) -> String {
    format!("{:.2}", amount)
}

#[function_component(StandardsTable)]
pub fn standards_table(props: &StandardsTableProps) -> Html {
    html! {
        <section class="standards-section">
            <h2>{"Standards"}</h2>

            {if props.loading {
                html! { <div class="loading">{"Loading standards..."}</div> }
            } else if props.standards.is_empty() {
                html! { <div class="empty">{"No standards configured"}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="standards-table">
                            <thead>
                                <tr>
                                    <th>{"Standard"}</th>
                                    <th>{"Program Fee"}</th>
                                    <th>{"Fee Due Day"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.standards.iter().map(|standard| {
                                    let on_edit = {
                                        let on_edit = props.on_edit.clone();
                                        let standard = standard.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            on_edit.emit(standard.clone());
                                        })
                                    };

                                    // Grey out days that fall back to the default
                                    let day_class = if standard.has_fee_due_day() {
                                        "fee-due-day"
                                    } else {
                                        "fee-due-day default"
                                    };

                                    html! {
                                        <tr key={standard.standard.clone()}>
                                            <td class="standard">{&standard.standard}</td>
                                            <td class="program-fee">{format_fee(standard.program_fee)}</td>
                                            <td class={day_class}>{standard.effective_fee_due_day().to_string()}</td>
                                            <td>
                                                <button type="button" class="btn btn-link" onclick={on_edit}>
                                                    {"Edit"}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}
