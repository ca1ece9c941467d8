use crate::youtube_api::DEFAULT_BASE_URL;
use eyre::Context;
use std::time::Duration;

/// Service configuration.
///
/// Built once at startup and passed explicitly to everything that needs it.
#[derive(Clone, Debug)]
pub struct Config {
    /// YouTube Data API key (`YT_API_KEY`).
    ///
    /// Lookups fail with a server error while this is unset.
    pub api_key: Option<String>,
    /// Address the HTTP server listens on (`BIND_ADDRESS`).
    pub bind_address: String,
    /// Base URL of the YouTube Data API (`YT_API_BASE_URL`).
    pub api_base_url: String,
    /// Timeout for each request to the YouTube Data API (`YT_REQUEST_TIMEOUT_SECS`).
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            bind_address: "0.0.0.0:8080".to_string(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |name: &str| var(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let request_timeout = match var("YT_REQUEST_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .with_context(|| format!("parse YT_REQUEST_TIMEOUT_SECS={secs:?}"))?,
            ),
            None => defaults.request_timeout,
        };

        Ok(Self {
            api_key: var("YT_API_KEY"),
            bind_address: var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            api_base_url: var("YT_API_BASE_URL").unwrap_or(defaults.api_base_url),
            request_timeout,
        })
    }
}
