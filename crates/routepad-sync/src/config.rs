//! Endpoint configuration, read from the environment.

use thiserror::Error;

pub const API_URL_VAR: &str = "ROUTEPAD_API_URL";
pub const SEARCH_URL_VAR: &str = "ROUTEPAD_SEARCH_URL";
pub const SEARCH_NAMESPACE_VAR: &str = "ROUTEPAD_SEARCH_NAMESPACE";

/// Namespace of the `SearchArea` operation when none is configured.
pub const DEFAULT_SEARCH_NAMESPACE: &str = "http://tempuri.org/";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
}

/// Where the route store and the area search service live.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Route store base URL, no trailing slash.
    pub api_url: String,
    /// Full URL the SOAP envelope is posted to.
    pub search_url: String,
    pub search_namespace: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, search_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            search_url: search_url.into(),
            search_namespace: DEFAULT_SEARCH_NAMESPACE.to_string(),
        }
    }

    /// Load from `ROUTEPAD_API_URL`, `ROUTEPAD_SEARCH_URL` and the optional
    /// `ROUTEPAD_SEARCH_NAMESPACE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = required_url(&lookup, API_URL_VAR)?;
        let search_url = required_url(&lookup, SEARCH_URL_VAR)?;
        let mut config = Self::new(api_url, search_url);
        if let Some(ns) = lookup(SEARCH_NAMESPACE_VAR).filter(|v| !v.trim().is_empty()) {
            config.search_namespace = ns.trim().to_string();
        }
        Ok(config)
    }
}

fn required_url<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(var))?;
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl { var, value });
    }
    Ok(value)
}
