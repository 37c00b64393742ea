//! Shell configuration
//!
//! Read from a TOML file:
//!
//! ```toml
//! store_dir = "/home/me/.local/share/creator/scenes"
//! frame_interval_ms = 100
//! log_level = "info"
//!
//! [session]
//! surface_id = "scene"
//! default_scene_name = "Default"
//! ```
//!
//! Every key is optional. A missing file gives the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use creator_session::SessionConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub session: SessionConfig,
    /// Directory holding one file per saved scene
    pub store_dir: PathBuf,
    /// Render loop cadence
    pub frame_interval_ms: u64,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            store_dir: Self::default_store_dir(),
            frame_interval_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

impl ShellConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                Self::parse(&content).map_err(|source| ConfigError::Parse { path, source })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// `<config dir>/creator/creator.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("creator");
            p.push("creator.toml");
            p
        })
    }

    fn default_store_dir() -> PathBuf {
        let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push("creator");
        dir.push("scenes");
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file() {
        let config = ShellConfig::parse(
            r#"
            frame_interval_ms = 16

            [session]
            default_scene_name = "Start"
            "#,
        )
        .unwrap();

        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert_eq!(config.session.default_scene_name, "Start");
        assert_eq!(config.session.surface_id, "scene");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ShellConfig::parse("").unwrap(), ShellConfig::default());
    }

    #[test]
    fn test_store_dir_under_data_dir() {
        let config = ShellConfig::default();
        assert!(config.store_dir.ends_with("creator/scenes"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShellConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creator.toml");
        std::fs::write(&path, "store_dir = \"/tmp/scenes\"\nlog_level = \"debug\"\n").unwrap();

        let config = ShellConfig::load(Some(&path)).unwrap();

        assert_eq!(config.store_dir, PathBuf::from("/tmp/scenes"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creator.toml");
        std::fs::write(&path, "frame_interval_ms = \"fast\"").unwrap();

        assert!(matches!(
            ShellConfig::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }
}
