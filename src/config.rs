use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddr(String),
}

/// Top-level configuration loaded from .nyan-review.toml.
///
/// All fields are optional — secrets can come entirely from the
/// environment (GITHUB_TOKEN, GITHUB_WEBHOOK_SECRET).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// GitHub API settings
    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on. Defaults to 127.0.0.1:8080.
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// API token used to fetch PR data and post comments.
    /// If None, falls back to the GITHUB_TOKEN env var.
    pub token: Option<String>,

    /// Secret shared with GitHub for webhook signature verification.
    /// If None, falls back to the GITHUB_WEBHOOK_SECRET env var.
    pub webhook_secret: Option<String>,

    /// API base URL, overridable for tests. Defaults to https://api.github.com.
    pub api_base_url: Option<String>,
}

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

impl Config {
    /// Load configuration from .nyan-review.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".nyan-review.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path (useful for testing and --config).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the GitHub token: config file value takes precedence,
    /// falls back to GITHUB_TOKEN env var.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }

    /// Resolve the webhook secret: config file value takes precedence,
    /// falls back to GITHUB_WEBHOOK_SECRET env var.
    pub fn webhook_secret(&self) -> Option<String> {
        self.github
            .webhook_secret
            .clone()
            .or_else(|| std::env::var("GITHUB_WEBHOOK_SECRET").ok())
    }

    pub fn api_base_url(&self) -> String {
        self.github
            .api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.server.bind.as_deref().unwrap_or(DEFAULT_BIND);
        raw.parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw.to_string()))
    }
}
