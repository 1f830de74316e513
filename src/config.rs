use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides the configured backend URL
pub const API_URL_ENV: &str = "ORBITX_API_URL";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the site backend serving `/api/chatbot/*`
    pub api_base_url: String,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// OrbitX home directory
    pub orbitx_home: PathBuf,

    /// Persistent key/value file (conversation id, profile)
    pub storage_path: PathBuf,

    /// Log file used while the terminal UI owns the screen
    pub log_path: PathBuf,

    /// UI preferences
    pub ui: UiConfig,

    /// Page behaviour tuning
    pub page: PageConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub show_quick_actions: bool,
    pub assistant_name: String,
}

/// Thresholds and timings for the page enhancements
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub navbar_threshold_px: u32,
    pub back_to_top_threshold_px: u32,
    pub search_debounce_ms: u64,
    pub typing_speed_ms: u64,
    pub counter_duration_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            show_quick_actions: true,
            assistant_name: "OrbitX AI".to_string(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            navbar_threshold_px: 50,
            back_to_top_threshold_px: 300,
            search_debounce_ms: 300,
            typing_speed_ms: 100,
            counter_duration_ms: 2000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
        let orbitx_home = home.join(".orbitx");

        Config {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 60,
            storage_path: orbitx_home.join("storage.json"),
            log_path: orbitx_home.join("orbitx.log"),
            orbitx_home,
            ui: UiConfig::default(),
            page: PageConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `~/.orbitx/config.toml`, writing defaults on first run
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        let orbitx_home = home.join(".orbitx");
        let config_path = orbitx_home.join("config.toml");

        fs::create_dir_all(&orbitx_home)
            .context("Failed to create .orbitx directory")?;

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            toml::from_str(&content)
                .context("Failed to parse config file")?
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            config
        };

        config.orbitx_home = orbitx_home;
        config.apply_env();

        Ok(config)
    }

    fn save_to(&self, path: &PathBuf) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Apply `ORBITX_API_URL` if it is set
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
    }

    /// Override the backend URL (from the command line)
    pub fn set_api_base_url(&mut self, url: String) {
        self.api_base_url = url;
    }

    /// Backend URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            api_base_url = "https://orbitx.example/"

            [page]
            navbar_threshold_px = 80
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base(), "https://orbitx.example");
        assert_eq!(config.page.navbar_threshold_px, 80);
        assert_eq!(config.page.back_to_top_threshold_px, 300);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert_eq!(config.ui.assistant_name, "OrbitX AI");
    }

    #[test]
    fn defaults_roundtrip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.api_base_url, config.api_base_url);
        assert_eq!(parsed.storage_path, config.storage_path);
    }
}
