use std::collections::HashMap;

use config::{Config, Environment};
use serde::Deserialize;
use url::Url;

use crate::error::SettingsError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub backend_url: String,
}

#[derive(Debug, Deserialize)]
struct RawClientSettings {
    backend_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
        }
    }
}

impl ClientSettings {
    /// Reads the process environment once; see [`ClientSettings::from_env_map`].
    pub fn from_env(cli_backend_url: Option<String>) -> Result<Self, SettingsError> {
        Self::from_env_map(std::env::vars().collect(), cli_backend_url)
    }

    /// Layering, lowest to highest: built-in default, `APP__BACKEND_URL`,
    /// `BACKEND_URL`, then the explicit command-line value. Blank values are
    /// treated as unset.
    pub fn from_env_map(
        env: HashMap<String, String>,
        cli_backend_url: Option<String>,
    ) -> Result<Self, SettingsError> {
        let direct = env.get(BACKEND_URL_ENV).cloned();
        let explicit = non_blank(cli_backend_url).or_else(|| non_blank(direct));

        let raw: RawClientSettings = Config::builder()
            .set_default("backend_url", DEFAULT_BACKEND_URL)?
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .source(Some(env)),
            )
            .set_override_option("backend_url", explicit)?
            .build()?
            .try_deserialize()?;

        let backend_url =
            non_blank(Some(raw.backend_url)).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Ok(Self {
            backend_url: normalize_backend_url(&backend_url)?,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn normalize_backend_url(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|e| SettingsError::InvalidBackendUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SettingsError::InvalidBackendUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
