//! Shared helpers for solar-api integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use solar_api::config::ApiConfig;
use solar_api::state::AppState;
use solar_api::upstream::SolarDataProvider;
use solar_common::{GeoPoint, SolarError, SolarResult};
use test_utils::{
    building_insights, create_mask, create_rect_mask, data_layers, mercator_origin_around, points,
    segment_summary, service_config_dir, MaskTiff,
};

pub const MASK_URL: &str = "https://solar.example.test/mask?id=1";

/// Canned upstream responses with call counters.
pub struct MockProvider {
    pub configured: bool,
    pub insights: Value,
    pub layers: Value,
    pub mask: Bytes,
    /// Fail building insights with this status
    pub insights_status: Option<u16>,
    /// Fail the mask download with this status
    pub mask_status: Option<u16>,
    pub insights_calls: AtomicUsize,
    pub layers_calls: AtomicUsize,
    pub mask_calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(insights: Value, layers: Value, mask: Vec<u8>) -> Self {
        Self {
            configured: true,
            insights,
            layers,
            mask: Bytes::from(mask),
            insights_status: None,
            mask_status: None,
            insights_calls: AtomicUsize::new(0),
            layers_calls: AtomicUsize::new(0),
            mask_calls: AtomicUsize::new(0),
        }
    }

    /// Roof rectangle in the middle of an 80 x 80 Web Mercator mask.
    pub fn roof() -> Self {
        let mask = mercator_mask(create_rect_mask(80, 80, 16..64, 16..64, 1));
        Self::new(
            building_insights(
                points::MOUNTAIN_VIEW,
                vec![segment_summary(1, 22.0, 180.0, 60.0)],
                vec![],
            ),
            data_layers(MASK_URL),
            mask,
        )
    }

    /// Mask with no roof pixels.
    pub fn empty_roof(stats: Vec<Value>) -> Self {
        let mask = mercator_mask(create_mask(80, 80, |_, _| 0));
        Self::new(
            building_insights(points::MOUNTAIN_VIEW, vec![], stats),
            data_layers(MASK_URL),
            mask,
        )
    }

    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.insights_calls.load(Ordering::SeqCst),
            self.layers_calls.load(Ordering::SeqCst),
            self.mask_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl SolarDataProvider for MockProvider {
    fn ensure_configured(&self) -> SolarResult<()> {
        if self.configured {
            Ok(())
        } else {
            Err(SolarError::configuration(
                "Missing GOOGLE_SOLAR_API_KEY environment variable",
            ))
        }
    }

    async fn building_insights(&self, _point: GeoPoint) -> SolarResult<Value> {
        self.insights_calls.fetch_add(1, Ordering::SeqCst);
        match self.insights_status {
            Some(status) => Err(SolarError::upstream(
                "Building insights",
                status,
                serde_json::json!({"error": {"message": "not found"}}),
            )),
            None => Ok(self.insights.clone()),
        }
    }

    async fn data_layers(&self, _point: GeoPoint, _radius_meters: f64) -> SolarResult<Value> {
        self.layers_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.layers.clone())
    }

    async fn fetch_mask(&self, url: &str) -> SolarResult<Bytes> {
        self.mask_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(url, MASK_URL);
        match self.mask_status {
            Some(status) => Err(SolarError::upstream("Mask download", status, Value::Null)),
            None => Ok(self.mask.clone()),
        }
    }
}

pub fn query_point() -> GeoPoint {
    GeoPoint::new(points::MOUNTAIN_VIEW.0, points::MOUNTAIN_VIEW.1)
}

/// 80 x 80 Web Mercator mask centred on the query point at 0.5 m pixels.
pub fn mercator_mask(data: Vec<u8>) -> Vec<u8> {
    let origin = mercator_origin_around(query_point(), 80, 80, 0.5);
    MaskTiff::web_mercator(80, 80, data, origin, 0.5).encode()
}

/// Configuration that never reaches the network.
pub fn test_config() -> ApiConfig {
    ApiConfig {
        solar_api_key: Some("test-key".to_string()),
        places_api_key: None,
        backend_base_url: "http://127.0.0.1:9/".to_string(),
        tariff_table_path: service_config_dir("solar-api").join("tariffs.yaml"),
        ..ApiConfig::default()
    }
}

pub fn app_state(config: ApiConfig, provider: MockProvider) -> (Arc<AppState>, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    let state = AppState::with_provider(config, provider.clone()).unwrap();
    (Arc::new(state), provider)
}
