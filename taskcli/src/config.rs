// taskcli/src/config.rs
// Environment-driven client configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub state_dir: PathBuf,
    pub page_limit: u32,
    /// No timeout when unset
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Reads `TASKCLI_*` variables (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("TASKCLI_API_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let state_dir = match lookup("TASKCLI_STATE_DIR").filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => home::home_dir()
                .ok_or(ConfigError::NoHomeDir)?
                .join(".taskcli"),
        };

        let page_limit = match lookup("TASKCLI_PAGE_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|l| *l > 0)
                .ok_or(ConfigError::Invalid {
                    var: "TASKCLI_PAGE_LIMIT",
                    value: raw,
                })?,
            None => DEFAULT_PAGE_LIMIT,
        };

        let timeout = match lookup("TASKCLI_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::Invalid {
                        var: "TASKCLI_TIMEOUT_SECS",
                        value: raw,
                    })?,
            ),
            None => None,
        };

        Ok(Self {
            api_url,
            state_dir,
            page_limit,
            timeout,
        })
    }
}
