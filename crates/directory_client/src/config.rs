use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const SETTINGS_FILE: &str = "directory.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Applies a command-line override, ignoring blank values.
    pub fn with_api_base_url(mut self, api_base_url: Option<String>) -> Self {
        if let Some(v) = api_base_url.filter(|v| !v.trim().is_empty()) {
            self.api_base_url = v;
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the settings file, then the environment; later sources win.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_base_url {
                    settings.api_base_url = v;
                }
                match file_cfg.request_timeout_secs {
                    Some(0) => warn!(path = %path.display(), "ignoring request_timeout_secs = 0"),
                    Some(v) => settings.request_timeout_secs = v,
                    None => {}
                }
            }
            Err(err) => {
                warn!(path = %path.display(), "ignoring malformed settings file: {err}");
            }
        }
    }

    let non_empty = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("EMPLOYEE_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = non_empty("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = non_empty("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(0) => warn!("ignoring APP__REQUEST_TIMEOUT_SECS=0"),
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(err) => warn!("ignoring APP__REQUEST_TIMEOUT_SECS={v}: {err}"),
        }
    }

    settings
}

pub fn prepare_base_url(raw_base_url: &str) -> anyhow::Result<String> {
    let base_url = raw_base_url.trim().trim_end_matches('/');

    if base_url.is_empty() {
        return Ok(DEFAULT_API_BASE_URL.to_string());
    }

    let parsed =
        Url::parse(base_url).with_context(|| format!("invalid API base URL '{base_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("API base URL '{base_url}' must use http or https");
    }

    Ok(base_url.to_string())
}
