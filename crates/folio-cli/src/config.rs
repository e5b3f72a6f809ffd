use std::path::Path;
use std::path::PathBuf;

use folio_core::config::GalleryConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {message}")]
    Toml { path: PathBuf, message: String },

    #[error("invalid YAML in {path}: {message}")]
    Yaml { path: PathBuf, message: String },
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio").join("config.toml"))
}

pub fn default_session_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("folio")
        .join("session.json")
}

/// An explicit path must exist; the default location is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<GalleryConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => read_config(&path),
        _ => Ok(GalleryConfig::default()),
    }
}

fn read_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &text)
}

fn parse_config(path: &Path, text: &str) -> Result<GalleryConfig, ConfigError> {
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    if is_yaml {
        serde_yaml::from_str(text).map_err(|err| ConfigError::Yaml {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    } else {
        toml::from_str(text).map_err(|err| ConfigError::Toml {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}
