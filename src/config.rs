use std::path::PathBuf;
use std::sync::Arc;

use crate::schemas::AppState;

/// Default request body limit (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Server settings resolved from CLI flags and the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,
    /// Optional directory with the built frontend
    pub static_dir: Option<PathBuf>,
    /// Maximum accepted request body size
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            static_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Initialize application state
pub fn initialize_app_state(config: ServerConfig) -> AppState {
    tracing::info!(
        "Upload limit: {} bytes, static files: {:?}",
        config.max_upload_bytes,
        config.static_dir
    );
    AppState {
        config: Arc::new(config),
    }
}
