//! HTTP Server Configuration
//!
//! Loaded from a JSON file; every field has a default. The shared secret can
//! be supplied through `CASA_API_KEY` so it never has to live in the file.

use std::fs;
use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::DEFAULT_HERO_IMAGE_URL;

/// Environment variable overriding `api_key`
pub const API_KEY_ENV: &str = "CASA_API_KEY";

/// Environment variable overriding `port`
pub const PORT_ENV: &str = "CASA_PORT";

/// Default cap on a bulk upsert body (10 MiB)
pub const DEFAULT_UPSERT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which document store backend to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Process-local, lost on exit
    Memory,
    /// JSON snapshot under `data_dir`
    #[default]
    File,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Value of `Access-Control-Allow-Origin` on every response (default: "*")
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,

    /// Shared secret expected in `x-api-key` on bulk upserts
    #[serde(default)]
    pub api_key: String,

    /// Store backend (default: file)
    #[serde(default)]
    pub store: StoreKind,

    /// Directory holding the file store snapshot (default: "./data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Hero image written when the homepage settings do not exist yet
    #[serde(default = "default_hero_placeholder_url")]
    pub hero_placeholder_url: String,

    /// Largest accepted bulk upsert body in bytes (default: 10 MiB)
    #[serde(default = "default_upsert_body_limit")]
    pub upsert_body_limit: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_allow_origin() -> String {
    "*".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_hero_placeholder_url() -> String {
    DEFAULT_HERO_IMAGE_URL.to_string()
}

fn default_upsert_body_limit() -> usize {
    DEFAULT_UPSERT_BODY_LIMIT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allow_origin: default_allow_origin(),
            api_key: String::new(),
            store: StoreKind::default(),
            data_dir: default_data_dir(),
            hero_placeholder_url: default_hero_placeholder_url(),
            upsert_body_limit: default_upsert_body_limit(),
        }
    }
}

impl ServerConfig {
    /// Load from `path`, apply environment overrides, validate
    pub fn load(path: &Path) -> ConfigResult<Self> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// `load` with an explicit variable lookup in place of the environment
    pub fn load_with<F>(path: &Path, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config: ServerConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.apply_overrides(lookup)?;
        config.validate()?;

        Ok(config)
    }

    /// Apply `CASA_API_KEY` and `CASA_PORT` from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = key;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{} is not a port: '{}'", PORT_ENV, port)))?;
        }
        Ok(())
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_key.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "api_key must be set (config file or {})",
                API_KEY_ENV
            )));
        }

        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_string()));
        }

        if self.upsert_body_limit == 0 {
            return Err(ConfigError::Invalid("upsert_body_limit must be > 0".to_string()));
        }

        if HeaderValue::from_str(&self.allow_origin).is_err() {
            return Err(ConfigError::Invalid(format!(
                "allow_origin is not a valid header value: '{}'",
                self.allow_origin
            )));
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
