//! Building insights, data layers and mask raster provider.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde_json::Value;
use solar_common::{GeoPoint, SolarError, SolarResult};
use tracing::{debug, instrument};

use super::{read_json, transport_error};
use crate::config::ApiConfig;

/// Source of the three upstream payloads the layout pipeline needs.
#[async_trait]
pub trait SolarDataProvider: Send + Sync {
    /// Fail with a configuration error when no credential is available.
    fn ensure_configured(&self) -> SolarResult<()>;

    /// Building insights record nearest to `point`, as raw JSON.
    async fn building_insights(&self, point: GeoPoint) -> SolarResult<Value>;

    /// Data layers around `point`, as raw JSON.
    async fn data_layers(&self, point: GeoPoint, radius_meters: f64) -> SolarResult<Value>;

    /// Mask raster bytes from a URL taken out of the data layers response.
    async fn fetch_mask(&self, url: &str) -> SolarResult<Bytes>;
}

/// Google Solar API client.
pub struct GoogleSolarClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    required_quality: String,
    pixel_size_meters: f64,
}

impl GoogleSolarClient {
    pub fn new(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.solar_api_base.clone(),
            api_key: config.solar_api_key.clone(),
            required_quality: config.required_quality.clone(),
            pixel_size_meters: config.pixel_size_meters,
        }
    }

    fn key(&self) -> SolarResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| SolarError::configuration("Missing GOOGLE_SOLAR_API_KEY environment variable"))
    }
}

#[async_trait]
impl SolarDataProvider for GoogleSolarClient {
    fn ensure_configured(&self) -> SolarResult<()> {
        self.key().map(|_| ())
    }

    #[instrument(skip(self), fields(lat = point.latitude, lng = point.longitude))]
    async fn building_insights(&self, point: GeoPoint) -> SolarResult<Value> {
        let url = format!("{}/buildingInsights:findClosest", self.base_url);
        debug!(url = %url, "Requesting building insights");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("location.latitude", point.latitude.to_string()),
                ("location.longitude", point.longitude.to_string()),
                ("requiredQuality", self.required_quality.clone()),
                ("key", self.key()?.to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        read_json("Building insights", response).await
    }

    #[instrument(skip(self), fields(lat = point.latitude, lng = point.longitude))]
    async fn data_layers(&self, point: GeoPoint, radius_meters: f64) -> SolarResult<Value> {
        let url = format!("{}/dataLayers:get", self.base_url);
        debug!(url = %url, radius_meters, "Requesting data layers");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("location.latitude", point.latitude.to_string()),
                ("location.longitude", point.longitude.to_string()),
                ("radiusMeters", radius_meters.to_string()),
                ("view", "FULL_LAYERS".to_string()),
                ("requiredQuality", self.required_quality.clone()),
                ("pixelSizeMeters", self.pixel_size_meters.to_string()),
                ("key", self.key()?.to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        read_json("Data layers", response).await
    }

    #[instrument(skip(self, url))]
    async fn fetch_mask(&self, url: &str) -> SolarResult<Bytes> {
        let response = self
            .client
            .get(url)
            .query(&[("key", self.key()?)])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = super::body_to_value(response.text().await.unwrap_or_default());
            return Err(SolarError::upstream("Mask download", status.as_u16(), body));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        debug!(bytes = bytes.len(), "Downloaded mask raster");
        Ok(bytes)
    }
}
