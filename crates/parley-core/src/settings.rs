use crate::error::SettingsError;
use crate::theme::ThemeVariant;
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "parley.toml";
const ENV_PREFIX: &str = "PARLEY_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// `host:port` or a full `http(s)://` base URL of the inference server.
    pub endpoint: String,
    pub model: String,
    /// Unset means the call waits for as long as the server takes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub theme: ThemeVariant,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "localhost:11434".to_string(),
            model: "qwen3:30b".to_string(),
            request_timeout_secs: None,
            theme: ThemeVariant::default(),
        }
    }
}

impl Settings {
    /// Loads defaults, then the user config file, then `PARLEY_*` variables.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(Self::config_path()?)
    }

    /// Same layering as [`Settings::load`] with an explicit config file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let settings = Self::extract(file_figment(path).merge(Env::prefixed(ENV_PREFIX)))?;
        tracing::debug!(path = %path.display(), ?settings, "settings loaded");
        Ok(settings)
    }

    fn extract(figment: Figment) -> Result<Self, SettingsError> {
        let settings: Settings = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(Self::config_path()?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf, SettingsError> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.endpoint.trim().is_empty() {
            return Err(SettingsError::Invalid("endpoint must not be empty"));
        }
        if self.model.trim().is_empty() {
            return Err(SettingsError::Invalid("model must not be empty"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Full URL of the generate route for the configured endpoint.
    pub fn generate_url(&self) -> String {
        let base = self.endpoint.trim().trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            format!("{}/api/generate", base)
        } else {
            format!("http://{}/api/generate", base)
        }
    }
}

/// Defaults overlaid with the TOML file at `path`, if it exists.
fn file_figment(path: &Path) -> Figment {
    Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file(path))
}

/// Platform directories for config and log files.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "parley")
}
