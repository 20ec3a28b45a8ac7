use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

pub const DEFAULT_INFO_MESSAGE: &str = "Docker Assignment Backend API";
pub const DEFAULT_INFO_DETAILS: &str = "Version 1.0.0 - Running on Rust with axum";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub info_message: String,
    pub info_details: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "0.0.0.0:8080".into(),
            info_message: DEFAULT_INFO_MESSAGE.into(),
            info_details: DEFAULT_INFO_DETAILS.into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let env: HashMap<String, String> = std::env::vars().collect();
    load_settings_from(Path::new("server.toml"), &env)
}

/// Defaults, then `server.toml` keys, then environment overrides.
pub(crate) fn load_settings_from(file: &Path, env: &HashMap<String, String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("info_message") {
                settings.info_message = v.clone();
            }
            if let Some(v) = file_cfg.get("info_details") {
                settings.info_details = v.clone();
            }
        }
    }

    if let Some(v) = env.get("SERVER_BIND") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = env.get("APP__BIND_ADDR") {
        settings.server_bind = v.clone();
    }

    if let Some(v) = env.get("APP__INFO_MESSAGE") {
        settings.info_message = v.clone();
    }
    if let Some(v) = env.get("APP__INFO_DETAILS") {
        settings.info_details = v.clone();
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
