//! Test utilities for integration tests
use std::sync::Arc;

use axum::{Router, body::Body};

use parley::api::AppState;
use parley::api::app;
use parley::core::AppConfig;
use parley::gemini::GeminiClient;
use parley::session::Coordinator;

/// Creates a test application router pointed at the given endpoint
/// hostname (usually a `mockito` server). Each call builds a fresh
/// session, so tests are independent.
pub fn test_app(api_hostname: &str, api_key: Option<&str>) -> Router {
    let config = AppConfig {
        api_hostname: api_hostname.to_string(),
        api_key: api_key.map(String::from),
        model: String::from("gemini-2.0-flash"),
        system_message: String::from("You are a helpful assistant."),
    };

    let generator = GeminiClient::new(
        &config.api_hostname,
        config.api_key.as_deref().unwrap_or_default(),
        &config.model,
    );
    let coordinator = Coordinator::new(
        Arc::new(generator),
        &config.system_message,
        config.api_key.is_some(),
    );

    let app_state = AppState::new(coordinator, config);
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body was not utf-8")
}
