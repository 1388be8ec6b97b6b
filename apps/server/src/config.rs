use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use patrimoine_core::constants::DEFAULT_OWNER;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub data_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub default_owner: String,
    /// Upper bound on the number of points a range request may produce.
    pub max_series_points: usize,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("PATRIMOINE_LISTEN_ADDR", "0.0.0.0:3000")
            .parse()
            .context("Invalid PATRIMOINE_LISTEN_ADDR")?;
        let data_path = env_or("PATRIMOINE_DATA_PATH", "./data/data.json");
        let cors_allow = env_or("PATRIMOINE_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("PATRIMOINE_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let default_owner = env_or("PATRIMOINE_DEFAULT_OWNER", DEFAULT_OWNER);
        let max_series_points: usize = env_or("PATRIMOINE_MAX_SERIES_POINTS", "3660")
            .parse()
            .unwrap_or(3660);
        let log_format = env_or("PATRIMOINE_LOG_FORMAT", "text");
        Ok(Self {
            listen_addr,
            data_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            default_owner,
            max_series_points,
            log_format,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
