use crate::config::{initialize_app_state, ServerConfig};
use crate::router::create_router;
use crate::schemas::AppState;
use axum::Router;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Create AppState for testing
pub fn setup_test_app_state() -> AppState {
    initialize_app_state(ServerConfig::default())
}

/// Initialize tracing for tests, writing through the test harness capture.
///
/// The log level is determined by the RUST_LOG environment variable,
/// defaulting to WARN if not set. Only the first call installs a subscriber.
fn init_test_tracing() {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| match level.to_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        })
        .unwrap_or(Level::WARN);

    let _ = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_test_writer()
        .try_init();
}

/// Create axum app for testing
pub fn setup_test_app() -> Router {
    init_test_tracing();
    create_router(setup_test_app_state())
}

/// Create axum app with a custom configuration
pub fn setup_test_app_with_config(config: ServerConfig) -> Router {
    init_test_tracing();
    create_router(initialize_app_state(config))
}
