use std::cell::RefCell;

use gloo::net::http::Request;
use shared::LogEntry;
use wasm_bindgen_futures::spawn_local;

use crate::services::api::ApiClient;

thread_local! {
    static LOG_ENDPOINT: RefCell<String> = RefCell::new(ApiClient::default().log_url());
}

/// Component-tagged logger. Lines go to the browser console and are shipped
/// to the backend log sink so they show up next to the server logs.
pub struct Logger;

impl Logger {
    /// Ship logs to the backend `api_client` talks to
    pub fn init(api_client: &ApiClient) {
        LOG_ENDPOINT.with(|endpoint| *endpoint.borrow_mut() = api_client.log_url());
    }

    pub fn endpoint() -> String {
        LOG_ENDPOINT.with(|endpoint| endpoint.borrow().clone())
    }

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
        let entry = LogEntry {
            level: level.to_string(),
            message: message.to_string(),
            component,
        };
        let endpoint = Self::endpoint();

        // Send log asynchronously without blocking; a lost line is not worth a retry
        spawn_local(async move {
            if let Ok(request) = Request::post(&endpoint).json(&entry) {
                let _ = request.send().await;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_endpoint_follows_api_client() {
        assert_eq!(Logger::endpoint(), "http://localhost:3000/api/logs");

        Logger::init(&ApiClient::with_base_url("https://staging.example.com/".to_string()));
        assert_eq!(Logger::endpoint(), "https://staging.example.com/api/logs");

        Logger::init(&ApiClient::default());
    }
}
