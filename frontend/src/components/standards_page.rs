use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use shared::{Standard, StandardForm, UpdateStandardRequest};
use super::edit_standard_modal::{EditStandardModal, SelectedStandard};
use super::standards_table::StandardsTable;
use crate::hooks::use_standards::use_standards;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "StandardsPage";

/// Outcome of the most recent save, shown above the table
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Success(String),
    Error(String),
}

impl StatusMessage {
    pub fn class(&self) -> &'static str {
        match self {
            StatusMessage::Success(_) => "status-message success",
            StatusMessage::Error(_) => "status-message error",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Success(text) | StatusMessage::Error(text) => text,
        }
    }
}

#[function_component(StandardsPage)]
pub fn standards_page() -> Html {
    let api_client = ApiClient::new();
    let standards = use_standards(&api_client);
    let is_modal_open = use_state(|| false);
    let selected_standard = use_state(|| Option::<SelectedStandard>::None);
    let status = use_state(|| Option::<StatusMessage>::None);

    let on_edit = {
        let is_modal_open = is_modal_open.clone();
        let selected_standard = selected_standard.clone();
        let status = status.clone();
        Callback::from(move |standard: Standard| {
            Logger::debug_with_component(COMPONENT, &format!("Editing {}", standard.standard));
            // Fresh identity so the modal re-seeds even for the same row
            selected_standard.set(Some(SelectedStandard::new(standard)));
            status.set(None);
            is_modal_open.set(true);
        })
    };

    let on_close = {
        let is_modal_open = is_modal_open.clone();
        Callback::from(move |_: ()| {
            is_modal_open.set(false);
        })
    };

    let on_save = {
        let status = status.clone();
        let refresh = standards.refresh.clone();
        let api_client = api_client.clone();

        Callback::from(move |form: StandardForm| {
            let request = match UpdateStandardRequest::try_from(&form) {
                Ok(request) => request,
                Err(e) => {
                    Logger::warn_with_component(
                        COMPONENT,
                        &format!("Rejected update for {}: {}", form.standard, e),
                    );
                    status.set(Some(StatusMessage::Error(e.to_string())));
                    return;
                }
            };

            let status = status.clone();
            let refresh = refresh.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                match api_client.update_standard(request).await {
                    Ok(response) => {
                        Logger::info_with_component(
                            COMPONENT,
                            &format!("Updated standard {}", response.standard.standard),
                        );
                        status.set(Some(StatusMessage::Success(response.success_message)));
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to save standard {}: {}", form.standard, e),
                        );
                        status.set(Some(StatusMessage::Error(format!(
                            "Failed to save standard: {}",
                            e
                        ))));
                    }
                }
            });
        })
    };

    html! {
        <div class="standards-page">
            <header class="header">
                <div class="container">
                    <h1>{"Fee Configuration"}</h1>
                </div>
            </header>

            <main class="container">
                {if let Some(message) = (*status).clone() {
                    html! {
                        <div class={message.class()}>{message.text().to_string()}</div>
                    }
                } else {
                    html! {}
                }}

                {if let Some(error) = standards.state.error.clone() {
                    html! { <div class="standards-error">{error}</div> }
                } else {
                    html! {}
                }}

                <StandardsTable
                    standards={standards.state.standards.clone()}
                    loading={standards.state.loading}
                    on_edit={on_edit}
                />
            </main>

            <EditStandardModal
                is_open={*is_modal_open}
                on_close={on_close}
                on_save={on_save}
                selected_standard={(*selected_standard).clone()}
            />
        </div>
    }
}
