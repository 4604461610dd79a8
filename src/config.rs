//! Configuration loading and management.
//!
//! Resolution order: an explicit file, `.task-board/config.yaml`,
//! `~/.task-board/config.yaml`, then built-in defaults. Environment
//! variables are applied on top of whichever source was used:
//! - `TASK_BOARD_DB_PATH` - Database path
//! - `TASK_BOARD_HOST` - Listen address
//! - `TASK_BOARD_PORT` - Listen port
//! - `TASK_BOARD_API_URL` - Base URL used by client commands

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::client::DEFAULT_API_URL;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

/// Server-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Client-side configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from(".task-board/tasks.db")
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

const PROJECT_CONFIG: &str = ".task-board/config.yaml";

impl Config {
    /// Load configuration from file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Load from `explicit` if given (errors propagate), otherwise from the
    /// first default location that exists, then apply environment overrides.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => Self::load_or_default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from default locations or return defaults.
    pub fn load_or_default() -> Self {
        let mut candidates = vec![PathBuf::from(PROJECT_CONFIG)];
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(PROJECT_CONFIG));
        }

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => tracing::warn!("Ignoring config {}: {:#}", path.display(), e),
            }
        }

        Self::default()
    }

    /// Apply `TASK_BOARD_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db_path) = lookup("TASK_BOARD_DB_PATH") {
            self.server.db_path = PathBuf::from(db_path);
        }

        if let Some(host) = lookup("TASK_BOARD_HOST") {
            match host.parse() {
                Ok(host) => self.server.host = host,
                Err(_) => tracing::warn!("Ignoring invalid TASK_BOARD_HOST: {}", host),
            }
        }

        if let Some(port) = lookup("TASK_BOARD_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid TASK_BOARD_PORT: {}", port),
            }
        }

        if let Some(url) = lookup("TASK_BOARD_API_URL") {
            self.client.base_url = url;
        }
    }

    /// Ensure the database directory exists.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.server.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
