//! Client for the financial report backend.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use solar_common::{SolarError, SolarResult};
use tracing::instrument;

use super::{body_to_value, transport_error};

/// Request forwarded to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcMoneyRequest {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the request to the backend root.
    ///
    /// A non-JSON success body is returned as null.
    #[instrument(skip(self), fields(backend = %self.base_url))]
    pub async fn calc_money(&self, request: &CalcMoneyRequest) -> SolarResult<Value> {
        let response = self
            .client
            .post(&self.base_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(SolarError::upstream("Backend", status.as_u16(), body_to_value(text)));
        }

        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }
}
