use anyhow::{Context, Result};
use dotenv::dotenv;
use std::env;
use std::time::Duration;

/// Base URL used when `API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Runtime settings for the backend client
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    /// `None` leaves reqwest's default (no timeout) in place
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_token = lookup("API_TOKEN").filter(|token| !token.trim().is_empty());

        let timeout = match lookup("API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("API_TIMEOUT_SECS must be a whole number, got '{}'", raw))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            api_token,
            timeout,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            timeout: None,
        }
    }
}
