// src/config.rs
use crate::geos::STATE_NAME;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub max_workers: usize,
    /// CSV table of listings.
    pub data_path: PathBuf,
    /// SQLite file holding browser sessions.
    pub session_db_path: PathBuf,
    /// Emails allowed to add listings. Matched exactly.
    pub authorized_emails: Vec<String>,
    pub state_name: String,
    pub session_ttl_secs: i64,
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            max_workers: 8,
            data_path: PathBuf::from("VolOpp2.csv"),
            session_db_path: PathBuf::from("sessions.sqlite3"),
            authorized_emails: Vec::new(),
            state_name: STATE_NAME.to_string(),
            session_ttl_secs: 60 * 60 * 24 * 7,
            geocoder: GeocoderConfig::default(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "volunteer_directory/0.1".to_string(),
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Reads a TOML config file. A missing file means all defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
