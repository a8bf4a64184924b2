use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use reqwest::Url;
use serde::Deserialize;

use crate::client::ClientError;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/medverify/check";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MedVerifyConfig {
    pub service: ServiceConfig,
    pub stages: StageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    /// Full URL of the check endpoint.
    pub endpoint: String,
    /// Unset means the request may wait forever.
    pub timeout_seconds: Option<u64>,
    /// Zero means exactly one request per submission.
    pub max_retries: usize,
    pub retry_delay_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
            max_retries: 0,
            retry_delay_ms: 500,
        }
    }
}

impl ServiceConfig {
    /// Service root derived from the endpoint: same origin, path `/`, no
    /// query or fragment.
    pub fn root_url(&self) -> Result<Url, ClientError> {
        Url::parse(&self.endpoint)
            .and_then(|url| url.join("/"))
            .map_err(|e| ClientError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })
    }
}

/// Cosmetic stage schedule shown while a request is in flight.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StageConfig {
    pub stage_interval_ms: u64,
    pub finish_delay_ms: u64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            stage_interval_ms: 1500,
            finish_delay_ms: 1600,
        }
    }
}

impl StageConfig {
    pub fn stage_interval(&self) -> Duration {
        Duration::from_millis(self.stage_interval_ms)
    }

    pub fn finish_delay(&self) -> Duration {
        Duration::from_millis(self.finish_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl MedVerifyConfig {
    /// Layer an optional TOML file and `MEDVERIFY__SECTION__KEY` env vars
    /// over the built-in defaults.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("MEDVERIFY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        s.try_deserialize()
    }
}
