//! Configuration loading and resolution
//!
//! Each setting resolves in priority order:
//! 1. Command-line argument or environment variable (supplied by the binary)
//! 2. TOML config file
//! 3. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE: &str = "queues.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// Contents of a TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
    pub max_connections: Option<u32>,
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
    pub max_connections: Option<u32>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub max_connections: u32,
}

impl ServiceConfig {
    /// Merge overrides over the config file over compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();

        Self {
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            database_path: overrides
                .database
                .or(file.database)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            max_connections: overrides
                .max_connections
                .or(file.max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS)
                .max(1),
        }
    }

    /// Address string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::resolve(ConfigOverrides::default(), None)
    }
}

/// Load the TOML config file
///
/// An explicitly requested file must exist. Without one, the platform
/// locations are searched and a missing file is not an error.
pub fn load_config_file(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) => path,
            None => {
                debug!("No config file found, using defaults");
                return Ok(None);
            }
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(Some(config))
}

/// Parse TOML config file contents
pub fn parse_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
}

/// Platform config file location, if one exists
fn default_config_path() -> Option<PathBuf> {
    // ~/.config/walkin/config.toml first, then /etc/walkin/config.toml
    if let Some(path) = dirs::config_dir().map(|d| d.join("walkin").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/walkin/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = ServiceConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_path, PathBuf::from("queues.db"));
        assert_eq!(config.max_connections, 8);
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_overrides_take_priority_over_file() {
        let file = TomlConfig {
            host: Some("0.0.0.0".to_string()),
            port: Some(6000),
            database: Some(PathBuf::from("/var/lib/walkin/file.db")),
            max_connections: Some(4),
        };
        let overrides = ConfigOverrides {
            port: Some(7000),
            database: Some(PathBuf::from("cli.db")),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(overrides, Some(file));

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7000);
        assert_eq!(config.database_path, PathBuf::from("cli.db"));
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn test_zero_max_connections_clamped() {
        let overrides = ConfigOverrides {
            max_connections: Some(0),
            ..Default::default()
        };

        assert_eq!(ServiceConfig::resolve(overrides, None).max_connections, 1);
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config("port = 8080\ndatabase = \"/tmp/q.db\"\n").unwrap();

        assert_eq!(config.port, Some(8080));
        assert_eq!(config.database, Some(PathBuf::from("/tmp/q.db")));
        assert!(config.host.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let result = parse_config("root_folder = \"/music\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let result = parse_config("port = \"eighty\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result = load_config_file(Some(&missing));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_file_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "host = \"0.0.0.0\"\nmax_connections = 2\n").unwrap();

        let config = load_config_file(Some(&path)).unwrap().unwrap();

        assert_eq!(config.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.max_connections, Some(2));
    }
}
