//! Layout pipeline tests against a canned provider.

mod common;

use std::sync::Arc;

use panel_layout::{LayoutSource, PanelGeometry};
use serde_json::json;
use solar_api::pipeline::{run_solar_layout, LayoutRequest, PipelineOutcome};
use solar_common::{GeoPoint, SolarError};
use test_utils::{data_layers_without_mask, points, segment_stats};

use common::{query_point, MockProvider};

fn request(point: GeoPoint, max_panels: usize) -> LayoutRequest {
    LayoutRequest {
        point,
        max_panels,
        radius_meters: 50.0,
    }
}

async fn run(provider: &Arc<MockProvider>, req: LayoutRequest) -> Result<PipelineOutcome, SolarError> {
    run_solar_layout(provider.clone(), req, PanelGeometry::default()).await
}

#[tokio::test]
async fn test_layout_from_mask() {
    let provider = Arc::new(MockProvider::roof());
    let outcome = run(&provider, request(query_point(), 0)).await.unwrap();

    let PipelineOutcome::Layout(response) = outcome else {
        panic!("expected a layout");
    };
    assert!(response.success);
    assert_eq!(response.panel_locations.len(), 36);
    assert_eq!(response.metadata.source, Some(LayoutSource::Raster));
    assert_eq!(response.max_array_panels_count, Some(42));
    assert_eq!(response.center, query_point());
    assert_eq!(response.panel_locations[0].plane_index, Some(1));
    assert_eq!(response.panel_locations[0].pitch_degrees, Some(22.0));
    assert_eq!(provider.calls(), (1, 1, 1));

    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["metadata"]["crs"], "EPSG:3857");
    assert_eq!(body["metadata"]["strideX"], 8);
    assert!(body["panelLocations"][0]["position"]["latitude"].is_number());
    assert_eq!(body["dataLayers"]["maskUrl"], common::MASK_URL);
}

#[tokio::test]
async fn test_max_panels_limits_output() {
    let provider = Arc::new(MockProvider::roof());
    let outcome = run(&provider, request(query_point(), 5)).await.unwrap();
    let PipelineOutcome::Layout(response) = outcome else {
        panic!("expected a layout");
    };
    assert_eq!(response.panel_locations.len(), 5);
}

#[tokio::test]
async fn test_invalid_point_makes_no_calls() {
    let provider = Arc::new(MockProvider::roof());
    let point = GeoPoint::new(points::INVALID_LAT.0, points::INVALID_LAT.1);

    let err = run(&provider, request(point, 0)).await.unwrap_err();
    assert!(matches!(err, SolarError::InvalidInput(_)));
    assert_eq!(err.to_string(), "Invalid or missing latitude/longitude");
    assert_eq!(provider.calls(), (0, 0, 0));
}

#[tokio::test]
async fn test_missing_credential_makes_no_calls() {
    let provider = Arc::new(MockProvider::roof().unconfigured());
    let err = run(&provider, request(query_point(), 0)).await.unwrap_err();
    assert!(matches!(err, SolarError::Configuration(_)));
    assert_eq!(err.http_status_code(), 500);
    assert_eq!(provider.calls(), (0, 0, 0));
}

#[tokio::test]
async fn test_upstream_failure_keeps_status() {
    let mut provider = MockProvider::roof();
    provider.insights_status = Some(404);
    let provider = Arc::new(provider);

    let err = run(&provider, request(query_point(), 0)).await.unwrap_err();
    assert_eq!(err.upstream_status(), Some(404));
    assert_eq!(err.http_status_code(), 404);
    // both fetches are issued even when one fails
    assert_eq!(provider.calls().1, 1);
    assert_eq!(provider.calls().2, 0);
}

#[tokio::test]
async fn test_missing_mask_url_attaches_response() {
    let mut provider = MockProvider::roof();
    provider.layers = data_layers_without_mask();
    let provider = Arc::new(provider);

    let err = run(&provider, request(query_point(), 0)).await.unwrap_err();
    let SolarError::MaskUnavailable { response } = &err else {
        panic!("expected MaskUnavailable, got {err:?}");
    };
    assert_eq!(response["dsmUrl"], "https://solar.example.test/dsm");
    assert_eq!(err.http_status_code(), 502);
    assert_eq!(provider.calls().2, 0);
}

#[tokio::test]
async fn test_mask_download_failure() {
    let mut provider = MockProvider::roof();
    provider.mask_status = Some(403);
    let provider = Arc::new(provider);

    let err = run(&provider, request(query_point(), 0)).await.unwrap_err();
    assert_eq!(err.upstream_status(), Some(403));
}

#[tokio::test]
async fn test_undecodable_mask() {
    let mut provider = MockProvider::roof();
    provider.mask = bytes::Bytes::from_static(b"<html>not a tiff</html>");
    let provider = Arc::new(provider);

    let err = run(&provider, request(query_point(), 0)).await.unwrap_err();
    assert!(matches!(err, SolarError::Decode(_)));
}

#[tokio::test]
async fn test_bounding_box_fallback() {
    let stats = vec![segment_stats(points::MOUNTAIN_VIEW, 0.0001, 15.0, 90.0, 30.0)];
    let provider = Arc::new(MockProvider::empty_roof(stats));

    let outcome = run(&provider, request(query_point(), 0)).await.unwrap();
    let PipelineOutcome::Layout(response) = outcome else {
        panic!("expected a layout");
    };
    assert_eq!(response.metadata.source, Some(LayoutSource::BoundingBox));
    assert!(!response.panel_locations.is_empty());
    assert!(response
        .panel_locations
        .iter()
        .all(|l| l.plane_index == Some(0) && l.raster_value.is_none()));
}

#[tokio::test]
async fn test_no_viable_segments_report() {
    let provider = Arc::new(MockProvider::empty_roof(vec![]));

    let outcome = run(&provider, request(query_point(), 0)).await.unwrap();
    let PipelineOutcome::NoViableSegments(report) = outcome else {
        panic!("expected no viable segments");
    };
    assert!(!report.success);
    assert_eq!(report.error, "No viable roof segments found");
    assert_eq!(report.metadata.width, 80);

    let body = serde_json::to_value(&report).unwrap();
    assert_eq!(body["buildingInsights"]["solarPotential"]["maxArrayPanelsCount"], json!(42));
}
