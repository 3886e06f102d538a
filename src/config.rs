//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the field analysis service
    pub analysis_api_url: String,
    /// Request timeout for analysis calls; `None` waits indefinitely
    pub analysis_timeout: Option<Duration>,
    /// Base URL of the Nominatim-compatible geocoder
    pub geocoder_url: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Crop type used when a request does not name one
    pub default_crop_type: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            analysis_api_url: "http://localhost:5000".to_string(),
            analysis_timeout: None,
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            default_crop_type: "wheat".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// local-development defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let analysis_timeout = match env::var("ANALYSIS_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or(ConfigError::Invalid("ANALYSIS_TIMEOUT_SECS", raw))?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => defaults.port,
        };

        let default_crop_type = env::var("DEFAULT_CROP_TYPE")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.default_crop_type);
        if default_crop_type.is_empty() {
            return Err(ConfigError::Invalid("DEFAULT_CROP_TYPE", default_crop_type));
        }

        Ok(Self {
            analysis_api_url: env::var("ANALYSIS_API_URL").unwrap_or(defaults.analysis_api_url),
            analysis_timeout,
            geocoder_url: env::var("GEOCODER_URL").unwrap_or(defaults.geocoder_url),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            default_crop_type,
            port,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: '{1}'")]
    Invalid(&'static str, String),
}
