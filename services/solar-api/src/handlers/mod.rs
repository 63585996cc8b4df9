//! HTTP request handlers for the solar API.

pub mod building_insights;
pub mod calc_money;
pub mod health;
pub mod places;
pub mod savings;
pub mod solar_layout;
pub mod tariffs;
pub mod tiff;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use solar_common::{GeoPoint, SolarError};

/// Failure envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            status: None,
            details: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Respond with the failure envelope and the given status.
pub fn failure(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

/// Map a pipeline error onto the failure envelope.
pub fn error_response(err: &SolarError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::debug!(error = %err, "Request rejected");
    }

    let mut body = ErrorResponse::new(err.to_string());
    if let Some(upstream) = err.upstream_status() {
        body = body.with_status(upstream);
    }
    if let Some(details) = err.details() {
        body = body.with_details(details.clone());
    }
    failure(status, body)
}

/// Parse a query coordinate, preferring the short name.
///
/// Takes the longest numeric prefix, so `"37.5abc"` reads as 37.5. Missing
/// or non-numeric values yield NaN so validation rejects them.
pub fn query_coordinate(short: Option<&str>, long: Option<&str>) -> f64 {
    short.or(long).map_or(f64::NAN, leading_float)
}

fn leading_float(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if !text[digits_start..end].bytes().any(|b| b.is_ascii_digit()) {
        return f64::NAN;
    }
    // Exponent only counts when digits follow it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Query point from `lat|latitude` and `lng|longitude`.
pub fn query_point(
    lat: Option<&str>,
    latitude: Option<&str>,
    lng: Option<&str>,
    longitude: Option<&str>,
) -> GeoPoint {
    GeoPoint::new(query_coordinate(lat, latitude), query_coordinate(lng, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_point_aliases() {
        let point = query_point(None, Some("37.5"), Some("-122.1"), Some("0"));
        assert_eq!(point.latitude, 37.5);
        assert_eq!(point.longitude, -122.1);
        assert!(point.is_valid());

        assert!(!query_point(Some("abc"), None, Some("1"), None).is_valid());
        assert!(!query_point(None, None, Some("1"), None).is_valid());
    }

    #[test]
    fn test_query_coordinate_numeric_prefix() {
        assert_eq!(query_coordinate(Some("37.5abc"), None), 37.5);
        assert_eq!(query_coordinate(Some(" -122.25 "), None), -122.25);
        assert_eq!(query_coordinate(Some(".5"), None), 0.5);
        assert_eq!(query_coordinate(Some("1e2x"), None), 100.0);
        assert_eq!(query_coordinate(Some("4e"), None), 4.0);
        assert!(query_coordinate(Some("abc"), None).is_nan());
        assert!(query_coordinate(Some("-."), None).is_nan());
        assert!(query_coordinate(Some(""), None).is_nan());
    }

    #[test]
    fn test_error_envelope_fields() {
        let body = ErrorResponse::new("Data layers request failed (403)")
            .with_status(403)
            .with_details(json!({"error": "denied"}));
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["status"], 403);
        assert_eq!(value["details"]["error"], "denied");

        let value = serde_json::to_value(ErrorResponse::new("bad")).unwrap();
        assert!(value.get("status").is_none());
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_error_response_status() {
        let response = error_response(&SolarError::upstream("Building insights", 404, Value::Null));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = error_response(&SolarError::invalid_input("bad"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
