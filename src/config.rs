// ABOUTME: Endpoint and listing configuration resolved from the environment and ~/.boxsh/config.toml

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no container engine endpoint configured: set DOCKER_HOST or docker.host in {0}")]
    MissingEndpoint(String),

    #[error("failed to read config file {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Malformed {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub docker: DockerConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DockerConfig {
    /// Engine endpoint, e.g. `unix:///var/run/docker.sock` or `tcp://host:2375`.
    /// The `DOCKER_HOST` environment variable takes precedence.
    pub host: Option<String>,

    /// Include stopped containers in `ps` output.
    #[serde(default)]
    pub show_all: bool,
}

impl AppConfig {
    /// Loads `~/.boxsh/config.toml`. A missing file is fine (all settings
    /// have environment or default fallbacks); an unreadable or malformed
    /// file is a startup error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".boxsh")
            .join("config.toml")
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                debug!("loaded config from {}", path.display());
                Self::from_toml(&raw, path)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Unreadable {
                path: path.display().to_string(),
                source: err,
            }),
        }
    }

    fn from_toml(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|err| ConfigError::Malformed {
            path: path.display().to_string(),
            source: err,
        })
    }

    /// Resolves the engine endpoint: `DOCKER_HOST` first, then the config
    /// file. Neither present is a fatal startup error.
    pub fn resolve_endpoint(&self) -> Result<String, ConfigError> {
        endpoint_from(
            std::env::var("DOCKER_HOST").ok(),
            self.docker.host.as_deref(),
        )
    }
}

fn endpoint_from(
    env_host: Option<String>,
    file_host: Option<&str>,
) -> Result<String, ConfigError> {
    if let Some(host) = env_host.filter(|h| !h.is_empty()) {
        return Ok(host);
    }
    if let Some(host) = file_host {
        return Ok(host.to_string());
    }
    Err(ConfigError::MissingEndpoint(
        AppConfig::config_path().display().to_string(),
    ))
}
