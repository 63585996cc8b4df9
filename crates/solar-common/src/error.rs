//! Error types for the solar layout services.

use serde_json::Value;
use thiserror::Error;

/// Result type alias using SolarError.
pub type SolarResult<T> = Result<T, SolarError>;

/// Primary error type for solar layout operations.
///
/// "No viable roof segments" is not listed here. Layout generation reports
/// it as an outcome.
#[derive(Debug, Error)]
pub enum SolarError {
    // === Request Errors ===
    #[error("{0}")]
    InvalidInput(String),

    // === Configuration Errors ===
    #[error("{0}")]
    Configuration(String),

    // === Upstream Errors ===
    #[error("{service} request failed ({status})")]
    Upstream {
        service: &'static str,
        status: u16,
        body: Value,
    },

    #[error("Data layer response did not include a mask URL")]
    MaskUnavailable { response: Value },

    #[error("Upstream transport error: {0}")]
    Transport(String),

    // === Data Errors ===
    #[error("Failed to decode raster: {0}")]
    Decode(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl SolarError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn upstream(service: &'static str, status: u16, body: Value) -> Self {
        Self::Upstream {
            service,
            status,
            body,
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Get the HTTP status code for this error.
    ///
    /// Upstream failures surface the upstream status when it is itself an
    /// error code.
    pub fn http_status_code(&self) -> u16 {
        match self {
            SolarError::InvalidInput(_) => 400,
            SolarError::Configuration(_) | SolarError::Internal(_) => 500,
            SolarError::Upstream { status, .. } if (400..=599).contains(status) => *status,
            SolarError::Upstream { .. }
            | SolarError::MaskUnavailable { .. }
            | SolarError::Transport(_)
            | SolarError::Decode(_) => 502,
        }
    }

    /// Upstream status code, when the failure originated upstream.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            SolarError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Diagnostic payload gathered before the failure point, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            SolarError::Upstream { body, .. } => Some(body),
            SolarError::MaskUnavailable { response } => Some(response),
            _ => None,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for SolarError {
    fn from(err: std::io::Error) -> Self {
        SolarError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for SolarError {
    fn from(err: serde_json::Error) -> Self {
        SolarError::Internal(format!("JSON error: {}", err))
    }
}
