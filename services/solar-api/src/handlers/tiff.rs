//! GeoTIFF metadata dump handler.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geotiff_parser::{decode_geotiff, FileDirectorySummary, GeoKeyDirectory};
use serde::Serialize;
use solar_common::{SolarError, SolarResult};

use super::{failure, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TiffMetadata {
    pub width: usize,
    pub height: usize,
    pub samples_per_pixel: usize,
    pub file_directory: FileDirectorySummary,
    pub geo_keys: GeoKeyDirectory,
    pub origin: [f64; 2],
    pub resolution: [f64; 2],
}

#[derive(Debug, Serialize)]
pub struct TiffResponse {
    pub success: bool,
    pub metadata: TiffMetadata,
}

/// Decode the metadata of a GeoTIFF held in memory.
pub fn read_metadata(bytes: &[u8]) -> SolarResult<TiffMetadata> {
    let file_directory = FileDirectorySummary::read(bytes)?;
    let raster = decode_geotiff(bytes)?;
    let georef = raster.georef();

    Ok(TiffMetadata {
        width: raster.width(),
        height: raster.height(),
        samples_per_pixel: raster.samples_per_pixel(),
        file_directory,
        geo_keys: raster.geo_keys().clone(),
        origin: [georef.origin.0, georef.origin.1],
        resolution: [georef.resolution.0, georef.resolution.1],
    })
}

async fn load_metadata(path: &Path) -> SolarResult<TiffMetadata> {
    let bytes = tokio::fs::read(path).await?;
    tokio::task::spawn_blocking(move || read_metadata(&bytes))
        .await
        .map_err(|e| SolarError::Internal(format!("Metadata task failed: {}", e)))?
}

/// GET /api/tiff
pub async fn tiff_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let path = &state.config.tiff_metadata_path;
    match load_metadata(path).await {
        Ok(metadata) => Json(TiffResponse {
            success: true,
            metadata,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read GeoTIFF");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(e.to_string()),
            )
        }
    }
}
