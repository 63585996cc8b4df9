//! Building insights proxy handler.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use solar_common::SolarError;

use super::{error_response, query_point};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BuildingInsightsParams {
    pub lat: Option<String>,
    pub latitude: Option<String>,
    pub lng: Option<String>,
    pub longitude: Option<String>,
}

/// GET /api/building-insights
pub async fn building_insights_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<BuildingInsightsParams>,
) -> Response {
    let point = query_point(
        params.lat.as_deref(),
        params.latitude.as_deref(),
        params.lng.as_deref(),
        params.longitude.as_deref(),
    );
    if !point.is_valid() {
        return error_response(&SolarError::invalid_input(
            "Invalid or missing latitude/longitude",
        ));
    }

    let result = match state.solar.ensure_configured() {
        Ok(()) => state.solar.building_insights(point).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => error_response(&e),
    }
}
