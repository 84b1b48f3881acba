use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;

pub const API_KEY_ENV: &str = "KEEPA_API_KEY";
pub const ASIN_ENV: &str = "KEEPA_ASIN";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub anchor_asin: String,
    /// Keepa marketplace selector (1 = amazon.com).
    #[serde(default = "default_domain")]
    pub domain: u8,
    /// Number of offers requested for current data.
    #[serde(default = "default_offers")]
    pub offers: u32,
    /// Trailing window used for the historical snapshot.
    #[serde(default = "default_history_days")]
    pub history_days: u32,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_domain() -> u8 {
    1
}

fn default_offers() -> u32 {
    20
}

fn default_history_days() -> u32 {
    30
}

fn default_base_url() -> String {
    "https://api.keepa.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Applies `KEEPA_API_KEY` / `KEEPA_ASIN` on top of the file values and
/// checks that both ended up set.
pub fn apply_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
        config.api_key = key;
    }
    if let Some(asin) = lookup(ASIN_ENV).filter(|v| !v.is_empty()) {
        config.anchor_asin = asin;
    }

    if config.api_key.trim().is_empty() {
        return Err(ConfigError::Missing("api_key"));
    }
    if config.anchor_asin.trim().is_empty() {
        return Err(ConfigError::Missing("anchor_asin"));
    }
    Ok(config)
}
