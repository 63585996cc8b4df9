//! Utility rate lookup handler.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{error_response, failure, ErrorResponse};
use crate::billing::{RatePlan, RegionTariffs};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityRateParams {
    pub monthly_kwh: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedPlan {
    #[serde(flatten)]
    pub plan: RatePlan,
    /// Absent when no usage was given or the plan lacks prices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_cost_usd: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityRatesResponse {
    pub success: bool,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_kwh: Option<f64>,
    pub plans: Vec<PricedPlan>,
}

/// Price every plan of a region for the given usage.
pub fn price_region(region: &str, tariffs: &RegionTariffs, monthly_kwh: Option<f64>) -> UtilityRatesResponse {
    let plans = tariffs
        .plans
        .iter()
        .map(|plan| PricedPlan {
            plan: plan.clone(),
            monthly_cost_usd: monthly_kwh.and_then(|kwh| plan.monthly_cost(kwh)),
        })
        .collect();

    UtilityRatesResponse {
        success: true,
        region: region.to_lowercase(),
        name: tariffs.name.clone(),
        currency_code: tariffs.currency_code.clone(),
        monthly_kwh,
        plans,
    }
}

/// GET /api/utility-rates/:region
pub async fn utility_rates_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(region): Path<String>,
    Query(params): Query<UtilityRateParams>,
) -> Response {
    let monthly_kwh = match params.monthly_kwh.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<f64>() {
            Ok(kwh) if kwh.is_finite() && kwh >= 0.0 => Some(kwh),
            _ => {
                return failure(
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("monthlyKwh must be a non-negative number"),
                )
            }
        },
    };

    let table = match state.tariffs.table().await {
        Ok(table) => table,
        Err(e) => return error_response(&e),
    };

    match table.region(&region) {
        Some(tariffs) => Json(price_region(&region, tariffs, monthly_kwh)).into_response(),
        None => failure(
            StatusCode::NOT_FOUND,
            ErrorResponse::new(format!("No tariffs for region {}", region)),
        ),
    }
}
