use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use shared::Standard;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct StandardsState {
    pub standards: Vec<Standard>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseStandardsResult {
    pub state: StandardsState,
    pub refresh: Callback<()>,
}

/// Hook for loading the standards list. Fetches on mount.
#[hook]
pub fn use_standards(api_client: &ApiClient) -> UseStandardsResult {
    let standards = use_state(Vec::<Standard>::new);
    // Loading from the first render, before the mount effect fires
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    let refresh = {
        let api_client = api_client.clone();
        let standards = standards.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_: (), _: &()| {
            let api_client = api_client.clone();
            let standards = standards.clone();
            let loading = loading.clone();
            let error = error.clone();

            loading.set(true);
            spawn_local(async move {
                match api_client.list_standards().await {
                    Ok(response) => {
                        Logger::debug_with_component(
                            "use_standards",
                            &format!("Loaded {} standards", response.standards.len()),
                        );
                        standards.set(response.standards);
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_standards",
                            &format!("Failed to load standards: {}", e),
                        );
                        error.set(Some(format!("Failed to load standards: {}", e)));
                    }
                }

                loading.set(false);
            });
        })
    };

    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    UseStandardsResult {
        state: StandardsState {
            standards: (*standards).clone(),
            loading: *loading,
            error: (*error).clone(),
        },
        refresh,
    }
}
