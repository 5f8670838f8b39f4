use gloo::net::http::Request;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;

use super::api::configured_base_url;

#[derive(Debug, Serialize)]
struct LogRequest {
    level: String,
    message: String,
    component: Option<String>,
}

/// Echoes to the browser console and forwards the entry to the backend log endpoint
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        gloo::console::debug!(format!("[{}] {}", component, message));
        Self::log("debug", message, Some(component.to_string()));
    }

    pub fn info_with_component(component: &str, message: &str) {
        gloo::console::info!(format!("[{}] {}", component, message));
        Self::log("info", message, Some(component.to_string()));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        gloo::console::warn!(format!("[{}] {}", component, message));
        Self::log("warn", message, Some(component.to_string()));
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(format!("[{}] {}", component, message));
        Self::log("error", message, Some(component.to_string()));
    }

    fn log(level: &str, message: &str, component: Option<String>) {
        let request = LogRequest {
            level: level.to_string(),
            message: message.to_string(),
            component,
        };
        let url = format!("{}/api/logs", configured_base_url());

        // Fire and forget
        spawn_local(async move {
            match Request::post(&url).json(&request) {
                Ok(request) => {
                    let _ = request.send().await;
                }
                Err(e) => {
                    gloo::console::warn!("Failed to serialize log entry:", e.to_string());
                }
            }
        });
    }
}
