use crate::utils::error::WalletError;
use anyhow::Result;
use config::{Config as ConfigSource, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub node_url: String,
    pub data_dir: PathBuf,
    pub listen_port: u16,
    pub metrics_port: Option<u16>,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Layers defaults, then `wallet.toml` (or the given file, which must
    /// exist), then `WALLET_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("wallet").required(false),
        };

        let source = Self::defaults()?
            .add_source(file)
            .add_source(Environment::with_prefix("WALLET").try_parsing(true))
            .build()
            .map_err(|e| WalletError::ConfigError(e.to_string()))?;

        Self::from_source(source)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = Self::defaults()?
            .add_source(File::from(path).required(true))
            .build()
            .map_err(|e| WalletError::ConfigError(e.to_string()))?;

        Self::from_source(source)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let builder = ConfigSource::builder()
            .set_default("node_url", "http://localhost:5000")?
            .set_default("data_dir", "./data")?
            .set_default("listen_port", 8080_i64)?
            .set_default("poll_interval_secs", 5_i64)?
            .set_default("request_timeout_secs", 10_i64)?;
        Ok(builder)
    }

    fn from_source(source: ConfigSource) -> Result<Self> {
        let config: Self = source
            .try_deserialize()
            .map_err(|e| WalletError::ConfigError(e.to_string()))?;

        if config.node_url.trim().is_empty() {
            return Err(WalletError::ConfigError("node_url must not be empty".into()).into());
        }
        if config.poll_interval_secs == 0 {
            return Err(WalletError::ConfigError("poll_interval_secs must be positive".into()).into());
        }

        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
