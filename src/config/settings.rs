//! Application settings from environment variables.
//!
//! Every setting has a default suitable for local development, so the
//! service starts with no environment at all. Values are read once at
//! startup; a `.env` file loaded by the binary can supply any of them.

use crate::errors::{Error, Result};
use std::net::SocketAddr;

/// Default `SQLite` location; `mode=rwc` creates the file on first run.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/checkin_buddy.sqlite?mode=rwc";
/// Default address the HTTP server binds to.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
/// Default path of the seed directory file.
const DEFAULT_DIRECTORY_PATH: &str = "directory.toml";
/// Default display label of the active check-in period.
const DEFAULT_PERIOD: &str = "September 2024";

/// Runtime configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection URL (`DATABASE_URL`)
    pub database_url: String,
    /// Address the HTTP server listens on (`BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Path of the seed directory file (`DIRECTORY_PATH`)
    pub directory_path: String,
    /// Rewrite webhook endpoint (`REWRITE_API_URL`)
    pub rewrite_api_url: String,
    /// Display label of the active period (`CHECKIN_PERIOD`)
    pub period: String,
}

impl AppConfig {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything unset.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `BIND_ADDR` is set but not a valid
    /// socket address.
    pub fn from_env() -> Result<Self> {
        let bind_addr_raw = env_or("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr_raw.parse().map_err(|e| Error::Config {
            message: format!("Invalid BIND_ADDR '{bind_addr_raw}': {e}"),
        })?;

        Ok(Self {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_addr,
            directory_path: env_or("DIRECTORY_PATH", DEFAULT_DIRECTORY_PATH),
            rewrite_api_url: env_or(
                "REWRITE_API_URL",
                crate::services::rewrite::DEFAULT_ENDPOINT,
            ),
            period: env_or("CHECKIN_PERIOD", DEFAULT_PERIOD),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_default_bind_addr_is_valid() {
        let addr: SocketAddr = DEFAULT_BIND_ADDR.parse().unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_default_database_url_creates_missing_file() {
        assert!(DEFAULT_DATABASE_URL.starts_with("sqlite://"));
        assert!(DEFAULT_DATABASE_URL.ends_with("mode=rwc"));
    }
}
