//! Places autocomplete and details proxy handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use solar_common::{GeoPoint, SolarError};

use super::{error_response, failure, ErrorResponse};
use crate::state::AppState;
use crate::upstream::{upstream_error_message, PlaceDetails, PlaceSuggestion};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteParams {
    pub input: Option<String>,
    pub session_token: Option<String>,
    pub origin_lat: Option<String>,
    pub origin_lng: Option<String>,
}

impl AutocompleteParams {
    /// Bias origin, only when both coordinates parse to a valid point.
    pub fn origin(&self) -> Option<GeoPoint> {
        let lat = self.origin_lat.as_deref()?.trim().parse().ok()?;
        let lng = self.origin_lng.as_deref()?.trim().parse().ok()?;
        GeoPoint::checked(lat, lng)
    }
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<PlaceSuggestion>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsParams {
    pub place_id: Option<String>,
    pub session_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    pub place: PlaceDetails,
}

/// Upstream Places failures carry Google's own message when there is one.
fn places_error(err: SolarError, default_message: &str) -> Response {
    match err {
        SolarError::Upstream { status, body, .. } => {
            let message =
                upstream_error_message(&body).unwrap_or_else(|| default_message.to_string());
            let code = StatusCode::from_u16(status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            tracing::warn!(status, %message, "Places request failed");
            failure(
                code,
                ErrorResponse::new(message).with_status(status).with_details(body),
            )
        }
        other => error_response(&other),
    }
}

/// GET /api/places/autocomplete
pub async fn autocomplete_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<AutocompleteParams>,
) -> Response {
    let input = params.input.as_deref().map(str::trim).unwrap_or_default();
    if input.is_empty() {
        return Json(AutocompleteResponse {
            suggestions: Vec::new(),
        })
        .into_response();
    }

    let Some(session_token) = params.session_token.as_deref().filter(|t| !t.is_empty()) else {
        return failure(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("Missing sessionToken"),
        );
    };

    match state
        .places
        .autocomplete(input, session_token, params.origin())
        .await
    {
        Ok(suggestions) => Json(AutocompleteResponse { suggestions }).into_response(),
        Err(e) => places_error(e, "Places autocomplete request failed"),
    }
}

/// GET /api/places/details
pub async fn details_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<DetailsParams>,
) -> Response {
    let Some(place_id) = params.place_id.as_deref().map(str::trim).filter(|p| !p.is_empty())
    else {
        return failure(StatusCode::BAD_REQUEST, ErrorResponse::new("Missing placeId"));
    };

    let session_token = params.session_token.as_deref().filter(|t| !t.is_empty());
    match state.places.details(place_id, session_token).await {
        Ok(place) => Json(DetailsResponse { place }).into_response(),
        Err(e) => places_error(e, "Places details request failed"),
    }
}
