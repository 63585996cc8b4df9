//! Solar layout handler.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{error_response, query_point};
use crate::pipeline::{run_solar_layout, LayoutRequest, PipelineOutcome};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarLayoutParams {
    pub lat: Option<String>,
    pub latitude: Option<String>,
    pub lng: Option<String>,
    pub longitude: Option<String>,
    /// Absent or unparseable uses the configured default; 0 means no limit
    pub max_panels: Option<String>,
    pub radius: Option<String>,
}

impl SolarLayoutParams {
    pub fn to_request(&self, default_max_panels: usize, default_radius: f64) -> LayoutRequest {
        let max_panels = self
            .max_panels
            .as_deref()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(default_max_panels);
        let radius_meters = self
            .radius
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(default_radius);

        LayoutRequest {
            point: query_point(
                self.lat.as_deref(),
                self.latitude.as_deref(),
                self.lng.as_deref(),
                self.longitude.as_deref(),
            ),
            max_panels,
            radius_meters,
        }
    }
}

/// GET /api/solar-layout
pub async fn solar_layout_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SolarLayoutParams>,
) -> Response {
    let request = params.to_request(
        state.config.default_max_panels,
        state.config.default_radius_meters,
    );

    match run_solar_layout(state.solar.clone(), request, state.config.panel_geometry).await {
        Ok(PipelineOutcome::Layout(body)) => Json(body).into_response(),
        Ok(PipelineOutcome::NoViableSegments(report)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(report)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max_panels: Option<&str>, radius: Option<&str>) -> SolarLayoutParams {
        SolarLayoutParams {
            lat: Some("37.4".into()),
            lng: Some("-122.1".into()),
            max_panels: max_panels.map(String::from),
            radius: radius.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_apply() {
        let request = params(None, None).to_request(25, 50.0);
        assert_eq!(request.max_panels, 25);
        assert_eq!(request.radius_meters, 50.0);

        let request = params(Some("many"), Some("-3")).to_request(25, 50.0);
        assert_eq!(request.max_panels, 25);
        assert_eq!(request.radius_meters, 50.0);
    }

    #[test]
    fn test_explicit_zero_is_unbounded() {
        let request = params(Some("0"), None).to_request(25, 50.0);
        assert_eq!(request.max_panels, 0);
        assert_eq!(request.radius_meters, 50.0);
    }

    #[test]
    fn test_explicit_values() {
        let request = params(Some("12"), Some("80")).to_request(0, 50.0);
        assert_eq!(request.max_panels, 12);
        assert_eq!(request.radius_meters, 80.0);
        assert_eq!(request.point.latitude, 37.4);
    }
}
