use std::env;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::Level;

use crate::client::DEFAULT_API_URL;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// Base of the HRMS REST service, without a trailing `/`.
    pub api_base_url: String,
    pub log_dir: String,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let log_level = var("LOG_LEVEL", "debug");
        let log_level = log_level.parse::<Level>().ok().with_context(|| {
            format!("LOG_LEVEL must be one of trace, debug, info, warn, error (got {log_level:?})")
        })?;

        Ok(Self {
            server_addr: var("SERVER_ADDR", "127.0.0.1:3000"),
            api_base_url: var("API_BASE_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            log_dir: var("LOG_DIR", "logs"),
            log_level,
        })
    }
}
