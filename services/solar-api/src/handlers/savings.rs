//! Solar savings handler.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::{failure, ErrorResponse};
use crate::billing::{calculate_savings, SavingsError, SolarPotentialInput};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavingsRequest {
    pub solar_potential: SolarPotentialInput,
    pub monthly_bill_usd: Option<f64>,
    pub monthly_kwh: Option<f64>,
}

fn savings_failure(err: SavingsError) -> Response {
    let details = match &err {
        SavingsError::MissingUsage {
            have_monthly_bill,
            have_monthly_kwh,
        } => json!({
            "have_monthly_bill": have_monthly_bill,
            "have_monthly_kwh": have_monthly_kwh,
        }),
        SavingsError::CannotSynthesize {
            have_max_array_panels_count,
            have_max_sunshine_hours_per_year,
        } => json!({
            "have_maxArrayPanelsCount": have_max_array_panels_count,
            "have_maxSunshineHoursPerYear": have_max_sunshine_hours_per_year,
        }),
    };
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    failure(status, ErrorResponse::new(err.to_string()).with_details(details))
}

/// POST /api/solar-savings
pub async fn solar_savings_handler(
    payload: Result<Json<SavingsRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            return failure(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(format!("Invalid JSON body: {}", rejection.body_text())),
            )
        }
    };

    match calculate_savings(
        &request.solar_potential,
        request.monthly_bill_usd,
        request.monthly_kwh,
    ) {
        Ok(report) => Json(json!({ "success": true, "savings": report })).into_response(),
        Err(e) => savings_failure(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request: SavingsRequest = serde_json::from_value(json!({
            "solarPotential": { "maxArrayPanelsCount": 10 },
            "monthlyBillUsd": 120.0
        }))
        .unwrap();
        assert_eq!(request.solar_potential.max_array_panels_count, Some(10.0));
        assert_eq!(request.monthly_bill_usd, Some(120.0));
        assert!(request.monthly_kwh.is_none());
    }

    #[test]
    fn test_failure_status() {
        let response = savings_failure(SavingsError::CannotSynthesize {
            have_max_array_panels_count: false,
            have_max_sunshine_hours_per_year: true,
        });
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
