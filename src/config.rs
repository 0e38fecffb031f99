//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listing host that search queries are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Site origin that relative product links are resolved against
    #[serde(default = "default_site_origin")]
    pub site_origin: String,

    /// User-Agent header sent with listing requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Directory that spreadsheets and plots are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Open generated files with the system viewer
    #[serde(default = "default_true")]
    pub open_files: bool,

    /// Render the price box plot
    #[serde(default = "default_true")]
    pub plot: bool,
}

fn default_base_url() -> String {
    "https://lista.mercadolivre.com.br".to_string()
}

fn default_site_origin() -> String {
    "https://www.mercadolivre.com.br".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            site_origin: default_site_origin(),
            user_agent: default_user_agent(),
            output_dir: default_output_dir(),
            open_files: true,
            plot: true,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("ml-price-report").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("ML_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(dir) = std::env::var("ML_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.output_dir = PathBuf::from(dir);
            }
        }

        if let Ok(agent) = std::env::var("ML_USER_AGENT") {
            if !agent.trim().is_empty() {
                self.user_agent = agent;
            }
        }

        self
    }
}
