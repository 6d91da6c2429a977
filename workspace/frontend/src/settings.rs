use log::Level;
use std::cell::RefCell;
use web_sys::window;

const API_HOST_KEY: &str = "forecast_api_host";
const API_PORT_KEY: &str = "forecast_api_port";
const API_PATH_KEY: &str = "forecast_api_path";
const API_USE_HTTPS_KEY: &str = "forecast_api_use_https";
const LOG_LEVEL_KEY: &str = "forecast_log_level";

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Forecast service host (e.g., "localhost" or "api.example.com")
    pub api_host: String,

    /// Forecast service port (e.g., 3000)
    pub api_port: u16,

    /// API path prefix (e.g., "/api")
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 3000,
            api_path: "/api".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Create settings from the window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

                // In development, use more verbose logging
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            if let Ok(Some(storage)) = window.local_storage() {
                settings.apply_overrides(|key| storage.get_item(key).ok().flatten());
            }
        }

        settings
    }

    /// Applies stored overrides. Values that do not parse are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_host) = lookup(API_HOST_KEY) {
            self.api_host = api_host;
        }

        if let Some(port_val) = lookup(API_PORT_KEY).and_then(|p| p.parse::<u16>().ok()) {
            self.api_port = port_val;
        }

        if let Some(api_path) = lookup(API_PATH_KEY) {
            self.api_path = api_path;
        }

        if let Some(use_https) = lookup(API_USE_HTTPS_KEY) {
            self.api_use_https = use_https.to_lowercase() == "true";
        }

        if let Some(log_level) = lookup(LOG_LEVEL_KEY) {
            self.log_level = match log_level.to_lowercase().as_str() {
                "error" => Level::Error,
                "warn" => Level::Warn,
                "info" => Level::Info,
                "debug" => Level::Debug,
                "trace" => Level::Trace,
                _ => self.log_level,
            };
        }
    }

    /// Get the base API URL (protocol + host + port + path)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, self.api_path)
    }
}

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
