//! Application state for the solar API.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::ApiConfig;
use crate::tariff_cache::TariffCache;
use crate::upstream::{build_http_client, BackendClient, GoogleSolarClient, PlacesClient, SolarDataProvider};

/// Shared application state.
pub struct AppState {
    pub config: ApiConfig,

    /// Building insights, data layers and mask source.
    pub solar: Arc<dyn SolarDataProvider>,

    pub places: PlacesClient,

    pub backend: BackendClient,

    /// Tariff table, loaded on first use.
    pub tariffs: TariffCache,
}

impl AppState {
    /// Create state with the Google Solar API as the data provider.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = build_http_client(config.http_timeout).context("Failed to create HTTP client")?;
        let solar = Arc::new(GoogleSolarClient::new(client, &config));
        Self::with_provider(config, solar)
    }

    /// Create state around an arbitrary data provider.
    pub fn with_provider(config: ApiConfig, solar: Arc<dyn SolarDataProvider>) -> Result<Self> {
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid configuration")?;

        let client = build_http_client(config.http_timeout).context("Failed to create HTTP client")?;

        Ok(Self {
            places: PlacesClient::new(client.clone(), &config),
            backend: BackendClient::new(client, config.backend_base_url.clone()),
            tariffs: TariffCache::new(config.tariff_table_path.clone()),
            solar,
            config,
        })
    }
}
