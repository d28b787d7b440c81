//! Config - ドレイナーの設定
//!
//! 構築時に一度だけ渡され、以後は変更されない。
//! JSON ではすべてのフィールドが省略可能（省略時はデフォルト値）。

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// Where the list-backed store lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store hostname. Defaults to `localhost`.
    pub host: String,

    /// Store port. Defaults to `6379`.
    pub port: u16,

    /// Logical database index, selected when the connection is opened. Defaults to `0`.
    pub database: u32,

    /// Upper bound on connection establishment (never applied to pops). Defaults to 5s.
    pub connect_timeout_ms: u64,
}

impl StoreConfig {
    pub const DEFAULT_HOST: &'static str = "localhost";
    pub const DEFAULT_PORT: u16 = 6379;

    /// `host:port`, used in logs and error messages.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            database: 0,
            connect_timeout_ms: 5_000,
        }
    }
}

/// DrainerConfig はキュー名とストア接続先をまとめたもの
///
/// ```ignore
/// let config = DrainerConfig::from_json_str(r#"{ "store": { "port": 6380 }, "queue": "jobs" }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrainerConfig {
    pub store: StoreConfig,

    /// Name of the list to pop from. Defaults to `wishbone.in`.
    pub queue: String,
}

impl DrainerConfig {
    pub const DEFAULT_QUEUE: &'static str = "wishbone.in";

    pub fn new(store: StoreConfig, queue: impl Into<String>) -> Self {
        Self {
            store,
            queue: queue.into(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

impl Default for DrainerConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            queue: Self::DEFAULT_QUEUE.to_string(),
        }
    }
}
