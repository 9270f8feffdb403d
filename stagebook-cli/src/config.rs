//! Configuration loading: `.env` files and `stagebook.toml`
//!
//! Precedence (highest first): CLI flags, environment (including `.env`),
//! TOML file, built-in defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use stagebook_server::db::DEFAULT_MAX_CONNECTIONS;
use stagebook_server::http::server::DEFAULT_TIMEOUT_SECS;
use tracing::{debug, warn};

/// Name of the project-local config file
pub const LOCAL_CONFIG: &str = "stagebook.toml";

/// Load environment variables from `.env` files.
///
/// Checks the current directory first, then `~/.stagebook/.env`. Variables
/// already set are never overwritten. Returns the files that were read so
/// the caller can log them once tracing is up.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(env_file) = config_dir().map(|d| d.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded.push(env_file);
        }
    }

    loaded
}

/// The stagebook config directory (`~/.stagebook`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".stagebook"))
}

/// Settings read from `stagebook.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StagebookConfig {
    pub bind: SocketAddr,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub request_timeout_secs: u64,
    pub cors_permissive: bool,
}

impl Default for StagebookConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            cors_permissive: false,
        }
    }
}

impl StagebookConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, `./stagebook.toml`
    /// is tried, then `~/.stagebook/config.toml`; unreadable or invalid
    /// implicit files are skipped with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = std::iter::once(PathBuf::from(LOCAL_CONFIG))
            .chain(config_dir().map(|d| d.join("config.toml")));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => return Ok(config),
                Err(e) => warn!("Ignoring {}: {:#}", path.display(), e),
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = StagebookConfig::default();
        assert_eq!(config.bind.to_string(), "127.0.0.1:5000");
        assert_eq!(config.database_url, None);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = StagebookConfig::parse(
            r#"
            bind = "0.0.0.0:8080"
            database_url = "postgres://localhost/stagebook"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/stagebook"));
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(StagebookConfig::parse("bnid = \"0.0.0.0:1\"").is_err());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_connections = 12\ncors_permissive = true").unwrap();

        let config = StagebookConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.max_connections, 12);
        assert!(config.cors_permissive);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StagebookConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn load_dotenv_doesnt_panic() {
        let _ = load_dotenv();
    }
}
