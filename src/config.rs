// ============================================================================
// CONFIG - Compile-time configuration (.env -> build.rs -> option_env!)
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server_url_development: String,
    pub server_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Pre-shared key sent on "weak" authorization (anonymous endpoints).
    pub api_key: String,
    pub countries_api_url: String,
    pub alert_config: AlertConfig,
    /// Delay before sending the user home after an expired session.
    pub redirect_delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    pub display_ms: u32,
    pub max_visible: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            display_ms: 2500,
            max_visible: 3,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url_development: "http://localhost:8000".to_string(),
            server_url_production: "https://www.wokeweekly.com".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            api_key: String::new(),
            countries_api_url: "https://restcountries.com/v2/all?fields=name,demonym,alpha2Code"
                .to_string(),
            alert_config: AlertConfig::default(),
            redirect_delay_ms: 2000,
        }
    }
}

impl AppConfig {
    /// Loads configuration from variables captured at compile time
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_url_development: option_env!("SERVER_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.server_url_development),
            server_url_production: option_env!("SERVER_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.server_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            api_key: option_env!("API_KEY")
                .map(str::to_string)
                .unwrap_or(defaults.api_key),
            countries_api_url: option_env!("COUNTRIES_API_URL")
                .map(str::to_string)
                .unwrap_or(defaults.countries_api_url),
            alert_config: AlertConfig {
                display_ms: option_env!("ALERT_DISPLAY_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.alert_config.display_ms),
                max_visible: option_env!("ALERT_MAX_VISIBLE")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.alert_config.max_visible),
            },
            redirect_delay_ms: option_env!("REDIRECT_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.redirect_delay_ms),
        }
    }

    /// Server base URL for the current environment
    pub fn server_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.server_url_production,
            _ => &self.server_url_development,
        }
    }

    /// Joins an API path onto the server base URL
    pub fn api_url(&self, path: &str) -> String {
        let base = self.server_url().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
