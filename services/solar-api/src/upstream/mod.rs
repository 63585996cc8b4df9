//! Outbound HTTP clients.

pub mod backend;
pub mod places;
pub mod provider;
pub mod schema;

pub use backend::BackendClient;
pub use places::{PlaceDetails, PlaceSuggestion, PlacesClient};
pub use provider::{GoogleSolarClient, SolarDataProvider};
pub use schema::{BuildingInsightsView, DataLayersView};

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use solar_common::{SolarError, SolarResult};

/// Shared HTTP client for all upstream calls.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(8)
        .tcp_nodelay(true)
        .build()
}

/// Map a reqwest failure to a transport error.
pub fn transport_error(err: reqwest::Error) -> SolarError {
    // reqwest includes the full URL, which carries the key
    SolarError::Transport(err.without_url().to_string())
}

/// Body as JSON when it parses, else as a JSON string. Empty bodies are null.
pub fn body_to_value(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

/// Read a JSON response, turning non-success statuses into `Upstream` errors.
pub async fn read_json(service: &'static str, response: Response) -> SolarResult<Value> {
    let status = response.status();
    let text = response.text().await.map_err(transport_error)?;
    let body = body_to_value(text);

    if !status.is_success() {
        return Err(SolarError::upstream(service, status.as_u16(), body));
    }
    Ok(body)
}

/// Human-readable message from a Google-style error payload.
pub fn upstream_error_message(body: &Value) -> Option<String> {
    body.pointer("/error/message")
        .or_else(|| body.get("errorMessage"))
        .and_then(Value::as_str)
        .map(String::from)
}
