//! Process configuration from environment variables.

use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Upper bound for any single store call.
    pub store_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

        let bind_addr =
            std::env::var("DRAWER_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let store_timeout = match std::env::var("DRAWER_STORE_TIMEOUT_MS") {
            Ok(raw) => Duration::from_millis(
                raw.parse()
                    .context("DRAWER_STORE_TIMEOUT_MS must be an integer")?,
            ),
            Err(_) => Duration::from_millis(5_000),
        };

        Ok(Self {
            database_url,
            bind_addr,
            store_timeout,
        })
    }
}
