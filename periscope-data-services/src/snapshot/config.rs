use std::env;
use std::fmt;
use std::path::Path;

use crate::error::{PeriscopeError, Result};

pub const API_KEY_VAR: &str = "MASSIVE_API_KEY";
pub const BASE_URL_VAR: &str = "MASSIVE_BASE_URL";

/// Used when `MASSIVE_BASE_URL` is not set at all
pub const DEFAULT_BASE_URL: &str = "https://api.massive.com/v3";

/// Dotfile read from the working directory by [`load_config`]
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Market data service settings
#[derive(Clone, Default, PartialEq)]
pub struct Config {
    pub api_key: String,
    /// Scheme + host + optional path prefix, without a trailing slash
    pub base_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Config")
            .field("api_key", &api_key)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read both settings from the process environment.
    ///
    /// Never fails. An unset base URL falls back to [`DEFAULT_BASE_URL`];
    /// an unset API key, or a value that is set but empty, stays empty.
    pub fn from_env() -> Self {
        let base_url = match env::var(BASE_URL_VAR) {
            Err(env::VarError::NotPresent) => {
                tracing::debug!("{} is not set, using {}", BASE_URL_VAR, DEFAULT_BASE_URL);
                DEFAULT_BASE_URL.to_string()
            }
            _ => read_var(BASE_URL_VAR),
        };

        Self::new(read_var(API_KEY_VAR), base_url)
    }

    /// Fail if either setting is empty
    pub fn ensure_complete(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.api_key.is_empty() {
            missing.push(API_KEY_VAR);
        }
        if self.base_url.is_empty() {
            missing.push(BASE_URL_VAR);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PeriscopeError::Config(format!("{} must be set", missing.join(" and "))))
        }
    }
}

/// Load `.env` from the working directory if there is one, then read the
/// environment. Variables already set in the process win over the file.
pub fn load_config() -> Config {
    apply_env_file(Path::new(DEFAULT_ENV_FILE), false);
    Config::from_env()
}

/// Same as [`load_config`] with an explicit dotfile
pub fn load_config_from(env_file: &Path) -> Config {
    apply_env_file(env_file, true);
    Config::from_env()
}

fn apply_env_file(path: &Path, explicit: bool) {
    match dotenvy::from_path(path) {
        Ok(()) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() && !explicit => {}
        Err(e) => tracing::warn!("Could not load {}: {}", path.display(), e),
    }
}

fn read_var(name: &str) -> String {
    match env::var(name) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("{} is not usable ({}), using an empty value", name, e);
            String::new()
        }
    }
}
