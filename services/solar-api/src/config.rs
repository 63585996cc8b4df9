//! Service configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use panel_layout::PanelGeometry;

pub const DEFAULT_SOLAR_API_BASE: &str = "https://solar.googleapis.com/v1";
pub const DEFAULT_PLACES_API_BASE: &str = "https://places.googleapis.com/v1";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001/";

/// Runtime configuration for the solar API.
///
/// Credentials are optional here; their absence is reported per request.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Key for building insights, data layers and mask downloads
    pub solar_api_key: Option<String>,
    /// Key for the places proxy
    pub places_api_key: Option<String>,
    pub solar_api_base: String,
    pub places_api_base: String,
    /// Report backend, always ending in `/`
    pub backend_base_url: String,
    /// Imagery quality floor sent upstream (HIGH, MEDIUM, LOW)
    pub required_quality: String,
    pub pixel_size_meters: f64,
    pub default_radius_meters: f64,
    /// 0 means unbounded
    pub default_max_panels: usize,
    pub http_timeout: Duration,
    pub tiff_metadata_path: PathBuf,
    pub tariff_table_path: PathBuf,
    pub panel_geometry: PanelGeometry,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            solar_api_key: None,
            places_api_key: None,
            solar_api_base: DEFAULT_SOLAR_API_BASE.to_string(),
            places_api_base: DEFAULT_PLACES_API_BASE.to_string(),
            backend_base_url: DEFAULT_BACKEND_URL.to_string(),
            required_quality: "HIGH".to_string(),
            pixel_size_meters: 0.5,
            default_radius_meters: 50.0,
            default_max_panels: 0,
            http_timeout: Duration::from_secs(30),
            tiff_metadata_path: PathBuf::from("../test.tiff"),
            tariff_table_path: PathBuf::from("config/tariffs.yaml"),
            panel_geometry: PanelGeometry::default(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset. Unparseable numbers keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        config.solar_api_key =
            get("GOOGLE_SOLAR_API_KEY").or_else(|| get("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY"));
        config.places_api_key = get("GOOGLE_PLACES_API_KEY").or_else(|| config.solar_api_key.clone());

        if let Some(val) = get("SOLAR_API_BASE") {
            config.solar_api_base = val.trim_end_matches('/').to_string();
        }
        if let Some(val) = get("PLACES_API_BASE") {
            config.places_api_base = val.trim_end_matches('/').to_string();
        }
        if let Some(val) = get("BACKEND_BASE_URL").or_else(|| get("BACKEND_URL")) {
            config.backend_base_url = if val.ends_with('/') {
                val
            } else {
                format!("{}/", val)
            };
        }

        if let Some(val) = get("SOLAR_REQUIRED_QUALITY") {
            config.required_quality = val.to_uppercase();
        }
        if let Some(size) = get("SOLAR_PIXEL_SIZE_METERS").and_then(|v| v.parse().ok()) {
            config.pixel_size_meters = size;
        }
        if let Some(radius) = get("SOLAR_DEFAULT_RADIUS_METERS").and_then(|v| v.parse().ok()) {
            config.default_radius_meters = radius;
        }
        if let Some(max) = get("SOLAR_DEFAULT_MAX_PANELS").and_then(|v| v.parse().ok()) {
            config.default_max_panels = max;
        }
        if let Some(secs) = get("SOLAR_HTTP_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.http_timeout = Duration::from_secs(secs);
        }

        if let Some(path) = get("TIFF_METADATA_PATH") {
            config.tiff_metadata_path = PathBuf::from(path);
        }
        if let Some(path) = get("TARIFF_TABLE_PATH") {
            config.tariff_table_path = PathBuf::from(path);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.pixel_size_meters > 0.0) {
            return Err("SOLAR_PIXEL_SIZE_METERS must be > 0".to_string());
        }
        if !(self.default_radius_meters > 0.0) {
            return Err("SOLAR_DEFAULT_RADIUS_METERS must be > 0".to_string());
        }
        if self.http_timeout.is_zero() {
            return Err("SOLAR_HTTP_TIMEOUT_SECS must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[]));
        assert!(config.solar_api_key.is_none());
        assert!(config.places_api_key.is_none());
        assert_eq!(config.solar_api_base, DEFAULT_SOLAR_API_BASE);
        assert_eq!(config.backend_base_url, "http://localhost:3001/");
        assert_eq!(config.required_quality, "HIGH");
        assert_eq!(config.default_max_panels, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_credential_chains() {
        let config = ApiConfig::from_lookup(lookup(&[("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY", "maps")]));
        assert_eq!(config.solar_api_key.as_deref(), Some("maps"));
        assert_eq!(config.places_api_key.as_deref(), Some("maps"));

        let config = ApiConfig::from_lookup(lookup(&[
            ("GOOGLE_SOLAR_API_KEY", "solar"),
            ("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY", "maps"),
            ("GOOGLE_PLACES_API_KEY", "places"),
        ]));
        assert_eq!(config.solar_api_key.as_deref(), Some("solar"));
        assert_eq!(config.places_api_key.as_deref(), Some("places"));
    }

    #[test]
    fn test_empty_key_is_unset() {
        let config = ApiConfig::from_lookup(lookup(&[("GOOGLE_SOLAR_API_KEY", "  ")]));
        assert!(config.solar_api_key.is_none());
    }

    #[test]
    fn test_backend_url_normalized() {
        let config = ApiConfig::from_lookup(lookup(&[("BACKEND_URL", "http://backend:8000")]));
        assert_eq!(config.backend_base_url, "http://backend:8000/");

        let config = ApiConfig::from_lookup(lookup(&[
            ("BACKEND_BASE_URL", "http://primary/"),
            ("BACKEND_URL", "http://secondary"),
        ]));
        assert_eq!(config.backend_base_url, "http://primary/");
    }

    #[test]
    fn test_numeric_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("SOLAR_PIXEL_SIZE_METERS", "0.25"),
            ("SOLAR_DEFAULT_MAX_PANELS", "40"),
            ("SOLAR_DEFAULT_RADIUS_METERS", "not-a-number"),
            ("SOLAR_HTTP_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.pixel_size_meters, 0.25);
        assert_eq!(config.default_max_panels, 40);
        assert_eq!(config.default_radius_meters, 50.0);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_validate_rejects_zero_pixel_size() {
        let config = ApiConfig {
            pixel_size_meters: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
