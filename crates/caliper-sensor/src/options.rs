//! Sensor options, loadable from TOML.
//!
//! ```toml
//! [sensor]
//! id = "https://example.edu/sensors/1"
//!
//! [http]
//! host = "https://collector.example.edu/caliper"
//! api_key = "Bearer 40dI6P62Q_qrWxpTk95z8w"
//! connection_timeout_ms = 10000
//! ```

use crate::error::{Result, SensorError};
use caliper_kernel::DEFAULT_CONTEXT;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_HOST: &str = "http://localhost:8080/";
pub const DEFAULT_SENSOR_ID: &str = "http://localhost/sensors/caliper-rs";

/// Transport options for [`HttpClient`](crate::HttpClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpOptions {
    /// Collector endpoint the envelope is POSTed to.
    pub host: String,
    /// Sent verbatim as the `Authorization` header when present.
    pub api_key: Option<String>,
    pub connection_timeout_ms: u64,
    /// Context label stamped on envelopes as `dataVersion`.
    pub data_version: String,
    /// Log every outgoing envelope at debug level.
    pub debug: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: None,
            connection_timeout_ms: 10_000,
            data_version: DEFAULT_CONTEXT.to_string(),
            debug: false,
        }
    }
}

impl HttpOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(SensorError::Options(format!(
                "host must be an http(s) URL, got `{}`",
                self.host
            )));
        }
        if self.connection_timeout_ms == 0 {
            return Err(SensorError::Options(
                "connection_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSection {
    pub id: String,
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            id: DEFAULT_SENSOR_ID.to_string(),
        }
    }
}

/// The whole options file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub sensor: SensorSection,
    pub http: HttpOptions,
}

impl SensorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SensorError::Options(e.to_string()))?;
        config.http.validate()?;
        Ok(config)
    }

    /// Load options from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SensorError::Options(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }
}
