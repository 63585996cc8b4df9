//! Path utilities for locating and staging test data files.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

/// Returns the workspace root directory.
///
/// The test-utils crate lives at `crates/test-utils`, two levels down.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Path to a service's bundled config directory, e.g. `services/solar-api/config`.
pub fn service_config_dir(service_name: &str) -> PathBuf {
    workspace_root()
        .join("services")
        .join(service_name)
        .join("config")
}

/// Writes `contents` to a fresh temporary file that is removed on drop.
///
/// Panics on I/O failure; this is test-only code.
pub fn temp_file_with(contents: &[u8], suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
