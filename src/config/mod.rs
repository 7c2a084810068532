//! Runtime configuration resolved from the environment.

use std::env;
use std::path::PathBuf;

use reqwest::Url;

const API_URL_ENV: &str = "BANKAPP_CORE_API_URL";
const HOME_ENV: &str = "BANKAPP_CORE_HOME";
const DEFAULT_API_URL: &str = "http://localhost:8090";

/// Settings the client core needs at construction time.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the finance API.
    pub api_base_url: Url,
    /// Directory holding the persisted key-value store.
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Resolves configuration from the environment. An unset or unparsable
    /// `BANKAPP_CORE_API_URL` falls back to the development server.
    pub fn from_env() -> Self {
        ClientConfig {
            api_base_url: api_base_url(),
            data_dir: data_dir(),
        }
    }
}

fn api_base_url() -> Url {
    if let Ok(raw) = env::var(API_URL_ENV) {
        match Url::parse(&raw) {
            Ok(url) => return url,
            Err(err) => {
                tracing::warn!("ignoring {API_URL_ENV}={raw}: {err}");
            }
        }
    }
    Url::parse(DEFAULT_API_URL).expect("default API URL parses")
}

/// Application data directory, honoring `BANKAPP_CORE_HOME` and defaulting
/// to `~/.bankapp_core`.
pub fn data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bankapp_core")
}
