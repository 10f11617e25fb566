// Client settings, deserialized from the dashboard's JSON configuration
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, Result};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    /// Scheme and host of the moving-averages service, e.g. `http://localhost:5000`.
    pub base_url: String,
    pub endpoint: String,
    /// JSON file backing the key-value store.
    pub storage_path: PathBuf,
    /// `None` waits for the service indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            base_url: "http://localhost:5000".to_string(),
            endpoint: "/api/moving-averages".to_string(),
            storage_path: PathBuf::from("moving-averages-storage.json"),
            request_timeout_secs: None,
            user_agent: "moving-averages-dashboard/0.1".to_string(),
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Base URL joined with the endpoint path, trailing/leading slashes reconciled.
    pub fn endpoint_url(&self) -> Result<String> {
        let base = self.base_url.trim().trim_end_matches('/');
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "Invalid base_url: must start with http:// or https://, got: '{}'",
                self.base_url
            )));
        }
        let path = self.endpoint.trim().trim_start_matches('/');
        Ok(format!("{}/{}", base, path))
    }
}
