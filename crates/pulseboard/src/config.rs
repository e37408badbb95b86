//! Server configuration
//!
//! Built-in defaults, overlaid by the first config file found, overlaid by
//! command line flags and environment variables.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_LOG_FILTER: &str = "pulseboard=info,tower_http=info,warn";
pub const LOCAL_CONFIG_FILE: &str = "pulseboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("config file not found: {}", path.display())]
  Missing { path: PathBuf },

  #[error("failed to read config file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("invalid config file {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
  /// HTTP listen address
  #[serde(default = "default_bind")]
  pub bind: SocketAddr,
  /// Seed the reference project at startup
  #[serde(default = "default_seed_fixtures")]
  pub seed_fixtures: bool,
  /// Default `EnvFilter` directive when `RUST_LOG` is unset
  #[serde(default = "default_log_filter")]
  pub log_filter: String,
}

fn default_bind() -> SocketAddr {
  SocketAddr::from(([127, 0, 0, 1], 5000))
}
fn default_seed_fixtures() -> bool {
  true
}
fn default_log_filter() -> String {
  DEFAULT_LOG_FILTER.to_string()
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self { bind: default_bind(), seed_fixtures: default_seed_fixtures(), log_filter: default_log_filter() }
  }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub bind: Option<SocketAddr>,
  pub no_seed: bool,
}

impl ServerConfig {
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
  }

  /// Load the explicit path when given, otherwise the first file that exists among
  /// the search paths, otherwise the defaults
  pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      if !path.exists() {
        return Err(ConfigError::Missing { path: path.to_path_buf() });
      }
      return Self::load_from_file(path);
    }

    for path in search_paths() {
      if path.exists() {
        tracing::debug!(path = %path.display(), "loading config file");
        return Self::load_from_file(&path);
      }
    }

    Ok(Self::default())
  }

  pub fn resolve(explicit: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
    Ok(Self::load(explicit)?.with_overrides(overrides))
  }

  pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
    if let Some(bind) = overrides.bind {
      self.bind = bind;
    }
    if overrides.no_seed {
      self.seed_fixtures = false;
    }
    self
  }
}

fn search_paths() -> Vec<PathBuf> {
  let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
  if let Some(config_dir) = dirs::config_dir() {
    paths.push(config_dir.join("pulseboard").join("config.json"));
  }
  paths
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;
  use tempfile::NamedTempFile;

  fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
  }

  #[test]
  fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.bind.to_string(), DEFAULT_BIND);
    assert!(config.seed_fixtures);
    assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
  }

  #[test]
  fn test_partial_file_keeps_defaults() {
    let file = config_file(r#"{ "seed_fixtures": false }"#);
    let config = ServerConfig::load(Some(file.path())).unwrap();

    assert!(!config.seed_fixtures);
    assert_eq!(config.bind, default_bind());
  }

  #[test]
  fn test_overrides_win_over_file() {
    let file = config_file(r#"{ "bind": "0.0.0.0:8080" }"#);
    let overrides = Overrides { bind: Some("127.0.0.1:9000".parse().unwrap()), no_seed: true };
    let config = ServerConfig::resolve(Some(file.path()), &overrides).unwrap();

    assert_eq!(config.bind.port(), 9000);
    assert!(!config.seed_fixtures);
  }

  #[test]
  fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let error = ServerConfig::load(Some(&missing)).unwrap_err();
    assert!(matches!(error, ConfigError::Missing { .. }));
  }

  #[test]
  fn test_malformed_file_is_an_error() {
    let file = config_file("{ not json");
    let error = ServerConfig::load(Some(file.path())).unwrap_err();
    assert!(matches!(error, ConfigError::Parse { .. }));
  }
}
