//! Configuration management for the Photomap client.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage the backend
//! address, third-party API keys and the base URLs of the public data providers.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8092";
pub const DEFAULT_RESTCOUNTRIES_URL: &str = "https://restcountries.com";
pub const DEFAULT_GEODB_URL: &str = "https://wft-geo-db.p.rapidapi.com";
pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://v6.exchangerate-api.com";
pub const DEFAULT_WORLDBANK_URL: &str = "https://api.worldbank.org";
pub const DEFAULT_FACTBOOK_URL: &str =
    "https://raw.githubusercontent.com/factbook/factbook.json/master";

/// Returns the directory holding all Photomap local data.
///
/// Resolves to the platform-specific local data directory:
/// - Linux: `~/.local/share/photomap`
/// - macOS: `~/Library/Application Support/photomap`
/// - Windows: `%LOCALAPPDATA%/photomap`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("photomap");
    path
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the data directory if it doesn't exist and loads variables from
/// `photomap/.env`. A missing `.env` file is not an error: every setting has
/// either a default or is optional, and variables may come from the process
/// environment instead.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or if the
/// `.env` file exists but cannot be parsed.
///
/// # Example
///
/// ```
/// use photomap::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

/// Returns the base URL of the Photomap backend.
///
/// Reads `PHOTOMAP_BACKEND_URL`, falling back to [`DEFAULT_BACKEND_URL`].
/// A trailing slash is removed so paths can be appended directly.
pub fn backend_url() -> String {
    url_var("PHOTOMAP_BACKEND_URL", DEFAULT_BACKEND_URL)
}

/// Returns the OpenWeatherMap API key, if configured.
///
/// Without a key the weather widget of the country details is skipped.
pub fn openweather_api_key() -> Option<String> {
    trimmed_var("OPENWEATHER_API_KEY")
}

/// Returns the ExchangeRate-API key, if configured.
pub fn exchange_rate_api_key() -> Option<String> {
    trimmed_var("EXCHANGE_RATE_API_KEY")
}

/// Returns the RapidAPI key used for the GeoDB fallback, if configured.
pub fn geodb_api_key() -> Option<String> {
    trimmed_var("GEODB_API_KEY")
}

/// Base URLs and keys of every third-party provider used for country facts.
///
/// Kept as one value so the enrichment pipeline can be pointed at other
/// hosts, which is what the integration tests do.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub restcountries_url: String,
    pub geodb_url: String,
    pub geodb_api_key: Option<String>,
    pub openweather_url: String,
    pub openweather_api_key: Option<String>,
    pub exchange_rate_url: String,
    pub exchange_rate_api_key: Option<String>,
    pub worldbank_url: String,
    pub factbook_url: String,
}

impl ProviderEndpoints {
    pub fn from_env() -> Self {
        Self {
            restcountries_url: url_var("RESTCOUNTRIES_URL", DEFAULT_RESTCOUNTRIES_URL),
            geodb_url: url_var("GEODB_URL", DEFAULT_GEODB_URL),
            geodb_api_key: geodb_api_key(),
            openweather_url: url_var("OPENWEATHER_URL", DEFAULT_OPENWEATHER_URL),
            openweather_api_key: openweather_api_key(),
            exchange_rate_url: url_var("EXCHANGE_RATE_URL", DEFAULT_EXCHANGE_RATE_URL),
            exchange_rate_api_key: exchange_rate_api_key(),
            worldbank_url: url_var("WORLDBANK_URL", DEFAULT_WORLDBANK_URL),
            factbook_url: url_var("FACTBOOK_URL", DEFAULT_FACTBOOK_URL),
        }
    }
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            restcountries_url: DEFAULT_RESTCOUNTRIES_URL.to_string(),
            geodb_url: DEFAULT_GEODB_URL.to_string(),
            geodb_api_key: None,
            openweather_url: DEFAULT_OPENWEATHER_URL.to_string(),
            openweather_api_key: None,
            exchange_rate_url: DEFAULT_EXCHANGE_RATE_URL.to_string(),
            exchange_rate_api_key: None,
            worldbank_url: DEFAULT_WORLDBANK_URL.to_string(),
            factbook_url: DEFAULT_FACTBOOK_URL.to_string(),
        }
    }
}

fn url_var(name: &str, default: &str) -> String {
    trimmed_var(name)
        .map(|v| v.trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn trimmed_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
