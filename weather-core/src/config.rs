use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Environment variable that overrides the API key from the config file.
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// The city looked up automatically when the widget starts.
fn default_city() -> String {
    "Portland".to_string()
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

/// Top-level configuration, resolved once at startup and handed to
/// [`crate::WeatherClient::new`]. Nothing reads the environment after this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key. Required; `OPENWEATHER_API_KEY` takes
    /// precedence over the value stored in the config file.
    pub api_key: String,

    /// City searched on startup before any user input.
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Provider endpoint. Only overridden by tests.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Config {
    /// Load config from disk, applying the environment override for the key.
    ///
    /// A missing file is fine as long as the environment supplies the key.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        let file_cfg: Option<FileConfig> = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Some(
                toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            )
        } else {
            None
        };

        Self::resolve(file_cfg, env::var(API_KEY_VAR).ok())
    }

    /// Merge the on-disk config with the environment override.
    fn resolve(file_cfg: Option<FileConfig>, env_key: Option<String>) -> Result<Self> {
        let file_cfg = file_cfg.unwrap_or_default();

        let api_key = env_key
            .filter(|k| !k.is_empty())
            .or(file_cfg.api_key)
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: set {API_KEY_VAR} or add `api_key = \"...\"` to the config file."
                )
            })?;

        Ok(Self {
            api_key,
            default_city: file_cfg.default_city.unwrap_or_else(default_city),
            base_url: file_cfg.base_url.unwrap_or_else(default_base_url),
        })
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-tui")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// On-disk shape: every field optional so a file holding only the key
/// (or no file at all) still resolves.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_key: Option<String>,
    default_city: Option<String>,
    base_url: Option<String>,
}
