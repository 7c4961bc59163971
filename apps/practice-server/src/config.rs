//! Server configuration read from the environment

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the remote vocabulary API, without a trailing slash.
    pub vocab_api_url: String,
    /// Seconds of practice between periodic stats flushes.
    pub stats_flush_interval: Duration,
    /// How long a session or selection may go untouched before it is dropped.
    pub session_idle_timeout: Duration,
    /// Fixed seed for every session's random source.
    pub session_seed: Option<u64>,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), 3000)?;

        let vocab_api_url = lookup("VOCAB_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("VOCAB_API_URL"))?;

        let stats_flush_interval = parse_secs(
            "STATS_FLUSH_INTERVAL_SECS",
            lookup("STATS_FLUSH_INTERVAL_SECS"),
            30,
        )?;
        let session_idle_timeout = parse_secs(
            "SESSION_IDLE_TIMEOUT_SECS",
            lookup("SESSION_IDLE_TIMEOUT_SECS"),
            900,
        )?;

        let session_seed = match lookup("SESSION_SEED") {
            Some(raw) => Some(parse_or("SESSION_SEED", Some(raw), 0)?),
            None => None,
        };

        Ok(Self {
            host,
            port,
            vocab_api_url,
            stats_flush_interval,
            session_idle_timeout,
            session_seed,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

/// A positive number of seconds.
fn parse_secs(
    name: &'static str,
    raw: Option<String>,
    default: u64,
) -> Result<Duration, ConfigError> {
    match parse_or(name, raw, default)? {
        0 => Err(ConfigError::Invalid {
            name,
            value: "0".to_string(),
        }),
        secs => Ok(Duration::from_secs(secs)),
    }
}
