//! Configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default Gemini model to use.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Default base URL for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Application configuration.
///
/// Both secrets are required; the process must refuse to start without them
/// rather than run with a broken model client or no dataset source.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API key for the Gemini model service.
    pub gemini_api_key: String,
    /// URL of the published stall-dataset CSV export.
    pub sheet_url: String,
    /// Model name (e.g., "gemini-2.5-flash-lite").
    pub model: String,
    /// Base URL for the model API.
    pub base_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`: API key for the Gemini model service
    /// - `SHEET_URL`: CSV export URL of the stall dataset
    ///
    /// Optional:
    /// - `FOODDOST_MODEL`: Model name (default: "gemini-2.5-flash-lite")
    /// - `FOODDOST_BASE_URL`: API base URL (default: Gemini v1beta endpoint)
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let sheet_url = env::var("SHEET_URL")
            .map_err(|_| ConfigError::MissingEnvVar("SHEET_URL".to_string()))?;

        let model = env::var("FOODDOST_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("FOODDOST_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            gemini_api_key,
            sheet_url,
            model,
            base_url,
        })
    }
}
