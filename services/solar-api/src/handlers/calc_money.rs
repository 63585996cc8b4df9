//! Financial report proxy handler.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use solar_common::SolarError;

use super::{failure, ErrorResponse};
use crate::state::AppState;
use crate::upstream::backend::CalcMoneyRequest;

#[derive(Debug, Serialize)]
pub struct CalcMoneyResponse {
    pub success: bool,
    pub data: Value,
}

/// Numeric value of a JSON number or numeric string.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// Build the backend request from a raw body.
pub fn parse_request(body: &[u8]) -> Result<CalcMoneyRequest, &'static str> {
    let parsed: Value = serde_json::from_slice(body).map_err(|_| "Invalid JSON body")?;

    let field = |primary: &str, alias: &str| {
        parsed
            .get(primary)
            .filter(|v| !v.is_null())
            .or_else(|| parsed.get(alias))
    };
    let latitude = coerce_number(field("latitude", "lat"));
    let longitude = coerce_number(field("longitude", "lng"));
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err("Latitude and longitude must be valid numbers");
    };

    let address = parsed
        .get("address")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Ok(CalcMoneyRequest {
        address,
        latitude,
        longitude,
    })
}

/// POST /api/calc-money
pub async fn calc_money_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(message) => return failure(StatusCode::BAD_REQUEST, ErrorResponse::new(message)),
    };

    match state.backend.calc_money(&request).await {
        Ok(data) => Json(CalcMoneyResponse {
            success: true,
            data,
        })
        .into_response(),
        Err(SolarError::Upstream { status, .. }) => {
            tracing::warn!(status, backend = %state.backend.base_url(), "Backend rejected report request");
            failure(
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new(format!("Backend responded with status {}", status)),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Backend request failed");
            failure(StatusCode::BAD_GATEWAY, ErrorResponse::new(e.to_string()))
        }
    }
}
