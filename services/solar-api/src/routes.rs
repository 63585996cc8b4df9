//! HTTP routing for the solar API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Layout pipeline
        .route(
            "/api/solar-layout",
            get(handlers::solar_layout::solar_layout_handler),
        )
        .route(
            "/api/building-insights",
            get(handlers::building_insights::building_insights_handler),
        )
        // Address search
        .route(
            "/api/places/autocomplete",
            get(handlers::places::autocomplete_handler),
        )
        .route(
            "/api/places/details",
            get(handlers::places::details_handler),
        )
        // Billing
        .route(
            "/api/calc-money",
            post(handlers::calc_money::calc_money_handler),
        )
        .route(
            "/api/utility-rates/:region",
            get(handlers::tariffs::utility_rates_handler),
        )
        .route(
            "/api/solar-savings",
            post(handlers::savings::solar_savings_handler),
        )
        // Diagnostics
        .route("/api/tiff", get(handlers::tiff::tiff_handler))
        .route("/health", get(handlers::health::health_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
