//! The solar layout request pipeline.
//!
//! validate -> credential check -> insights and data layers concurrently ->
//! mask URL -> mask bytes -> decode + layout on the blocking pool.
//!
//! Nothing is retried. The first failure ends the request.

use std::sync::Arc;

use geotiff_parser::decode_geotiff;
use panel_layout::{generate_layout, LayoutMetadata, LayoutOutcome, PanelGeometry, PanelLocation};
use serde::Serialize;
use serde_json::Value;
use solar_common::{GeoPoint, SolarError, SolarResult};
use tracing::{info, instrument};

use crate::upstream::schema::segment_index;
use crate::upstream::{BuildingInsightsView, DataLayersView, SolarDataProvider};

/// One layout request after query parsing.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest {
    pub point: GeoPoint,
    /// 0 means unbounded
    pub max_panels: usize,
    pub radius_meters: f64,
}

/// Successful layout, with the upstream payloads for diagnostics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarLayoutResponse {
    pub success: bool,
    pub panel_locations: Vec<PanelLocation>,
    pub metadata: LayoutMetadata,
    pub building_insights: Value,
    pub data_layers: Value,
    pub max_array_panels_count: Option<u64>,
    pub center: GeoPoint,
}

/// Decode succeeded but neither sampling path produced a location.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoViableSegmentsReport {
    pub success: bool,
    pub error: String,
    pub metadata: LayoutMetadata,
    pub building_insights: Value,
    pub data_layers: Value,
    pub max_array_panels_count: Option<u64>,
    pub center: GeoPoint,
}

#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    Layout(SolarLayoutResponse),
    NoViableSegments(NoViableSegmentsReport),
}

/// Run the full pipeline for one request.
#[instrument(skip(provider, geometry), fields(lat = request.point.latitude, lng = request.point.longitude))]
pub async fn run_solar_layout(
    provider: Arc<dyn SolarDataProvider>,
    request: LayoutRequest,
    geometry: PanelGeometry,
) -> SolarResult<PipelineOutcome> {
    let point = request.point;
    if !point.is_valid() {
        return Err(SolarError::invalid_input("Invalid or missing latitude/longitude"));
    }
    provider.ensure_configured()?;

    let (insights, layers) = tokio::join!(
        provider.building_insights(point),
        provider.data_layers(point, request.radius_meters)
    );
    let insights_raw = insights?;
    let layers_raw = layers?;

    let insights = BuildingInsightsView::from_raw(&insights_raw);
    let layers = DataLayersView::from_raw(&layers_raw);

    let Some(mask_url) = layers.mask_url().map(String::from) else {
        return Err(SolarError::MaskUnavailable {
            response: layers_raw,
        });
    };
    let mask = provider.fetch_mask(&mask_url).await?;

    let segments = segment_index(&insights, &layers);
    let stats = insights.roof_segment_stats();
    let max_panels = request.max_panels;

    let outcome = tokio::task::spawn_blocking(move || -> SolarResult<LayoutOutcome> {
        let raster = decode_geotiff(&mask)?;
        Ok(generate_layout(&raster, &segments, &stats, point, max_panels, &geometry))
    })
    .await
    .map_err(|e| SolarError::Internal(format!("Layout task failed: {}", e)))??;

    let center = insights.center().unwrap_or(point);
    let max_array_panels_count = insights.max_array_panels_count();

    Ok(match outcome {
        LayoutOutcome::Placed {
            locations,
            metadata,
        } => {
            info!(
                panels = locations.len(),
                source = ?metadata.source,
                "Generated panel layout"
            );
            PipelineOutcome::Layout(SolarLayoutResponse {
                success: true,
                panel_locations: locations,
                metadata,
                building_insights: insights_raw,
                data_layers: layers_raw,
                max_array_panels_count,
                center,
            })
        }
        LayoutOutcome::NoViableSegments { metadata } => {
            info!("No viable roof segments in mask or segment bounding boxes");
            PipelineOutcome::NoViableSegments(NoViableSegmentsReport {
                success: false,
                error: "No viable roof segments found".to_string(),
                metadata,
                building_insights: insights_raw,
                data_layers: layers_raw,
                max_array_panels_count,
                center,
            })
        }
    })
}
