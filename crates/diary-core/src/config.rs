// ============================
// diary-core/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Root directory of the document store (the "connection string")
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// HS256 secret for session tokens
    pub token_secret: String,
    /// Session token lifetime in seconds
    pub token_ttl_secs: u64,
    /// Bound on any single store operation
    pub store_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".parse().expect("valid literal addr"),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            token_secret: "change-me-in-production".to_string(),
            token_ttl_secs: 60 * 60 * 24 * 7, // 7 days
            store_timeout_ms: 2_000,
        }
    }
}

impl Settings {
    /// Load settings from `config/default.toml` (optional) layered with
    /// `DIARY_`-prefixed environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("DIARY"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = Settings::default();
        assert_eq!(settings.token_ttl_secs, 604_800);
        assert_eq!(settings.bind_addr.port(), 5000);
        assert!(settings.store_timeout_ms > 0);
    }
}
