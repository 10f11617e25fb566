// Dashboard configuration, mirrors assets/config/default.json
use anyhow::Context;
use client::config::ClientSettings;
use serde::Deserialize;
use shared::models::{QueryConfig, DEFAULT_TICKER, DEFAULT_WATCHLIST};
use std::path::Path;

/// Optional user configuration looked up in the working directory.
pub const USER_CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    #[serde(default)]
    pub client: ClientSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DashboardVariant {
    /// One ticker at a time, SMA series over a chosen period.
    SingleTicker,
    /// Every watchlist symbol, SMA and EMA over the standard periods.
    Watchlist,
}

impl DashboardVariant {
    /// Watchlist used when nothing usable is persisted.
    pub fn seed(&self) -> &'static [&'static str] {
        match self {
            DashboardVariant::SingleTicker => &[],
            DashboardVariant::Watchlist => &DEFAULT_WATCHLIST,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub variant: DashboardVariant,
    #[serde(default = "default_ticker")]
    pub default_ticker: String,
    #[serde(default)]
    pub refresh_on_start: bool,
    #[serde(default)]
    pub query: QueryConfig,
}

fn default_ticker() -> String {
    DEFAULT_TICKER.to_string()
}

impl AppConfig {
    pub fn load_default() -> Result<Self, anyhow::Error> {
        let config_str = include_str!("../../assets/config/default.json");
        let config: AppConfig = serde_json::from_str(config_str)?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// The user file when present, the embedded defaults otherwise.
    pub fn load() -> Result<Self, anyhow::Error> {
        let user_path = Path::new(USER_CONFIG_FILE);
        if user_path.exists() {
            tracing::info!("Loading configuration from {}", user_path.display());
            Self::load_from_path(user_path)
        } else {
            Self::load_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Interval, SeriesType};

    #[test]
    fn test_embedded_default_config() {
        let config = AppConfig::load_default().unwrap();
        assert_eq!(config.dashboard.variant, DashboardVariant::Watchlist);
        assert_eq!(config.dashboard.default_ticker, "AAPL");
        assert_eq!(config.dashboard.query, QueryConfig::default());
        assert_eq!(config.client, ClientSettings::default());
    }

    #[test]
    fn test_user_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(USER_CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{
                "version": "0.2.0",
                "client": {"base_url": "http://10.0.0.5:5000"},
                "dashboard": {
                    "variant": "single_ticker",
                    "query": {"interval": "monthly", "series_type": "low", "time_period": 9}
                }
            }"#,
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.client.base_url, "http://10.0.0.5:5000");
        assert_eq!(config.client.endpoint, "/api/moving-averages");
        assert_eq!(config.dashboard.variant, DashboardVariant::SingleTicker);
        assert_eq!(config.dashboard.default_ticker, "AAPL");
        assert!(!config.dashboard.refresh_on_start);
        assert_eq!(config.dashboard.query.interval, Interval::Monthly);
        assert_eq!(config.dashboard.query.series_type, SeriesType::Low);
    }

    #[test]
    fn test_unreadable_user_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(USER_CONFIG_FILE);
        std::fs::write(&path, "{").unwrap();
        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration in"));
    }

    #[test]
    fn test_variant_seeds() {
        assert!(DashboardVariant::SingleTicker.seed().is_empty());
        assert_eq!(DashboardVariant::Watchlist.seed(), ["AAPL", "MSFT", "TSLA"]);
    }
}
