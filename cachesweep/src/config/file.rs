//! Roots document handling for ~/.cachesweep/roots.ini.
//!
//! The document declares, per namespace, which directory roots the
//! namespace owns and its sweep limits. Settings structs live in
//! [`super::settings`], parsing in [`super::parser`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::RootsConfig;

/// Roots document errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document does not exist at the given path.
    #[error("Roots document not found: {0}")]
    Missing(PathBuf),

    /// Failed to read or parse the document.
    #[error("Failed to read roots document: {0}")]
    Read(#[from] ini::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl RootsConfig {
    /// Load the roots document from the default path
    /// (~/.cachesweep/roots.ini).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&default_config_path())
    }

    /// Load the roots document from a specific path.
    ///
    /// A janitor with no roots configured is a misconfiguration, so a
    /// missing document is an error rather than an empty default.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }
}

/// Path to the configuration directory (~/.cachesweep).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cachesweep")
}

/// Path to the roots document (~/.cachesweep/roots.ini).
pub fn default_config_path() -> PathBuf {
    config_directory().join("roots.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_from_missing_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roots.ini");

        let err = RootsConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn load_from_parses_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roots.ini");

        std::fs::write(
            &path,
            r#"
[thumbnails]
cache-root = images/thumbs
max_age_hours = 24
max_size_kb = 200
"#,
        )
        .unwrap();

        let config = RootsConfig::load_from(&path).unwrap();
        let ns = config.namespace("thumbnails").unwrap();

        assert_eq!(ns.roots.len(), 1);
        assert_eq!(ns.limits.max_age_hours, 24);
        assert_eq!(ns.limits.max_size_kb, 200);
    }

    #[test]
    fn load_from_rejects_malformed_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roots.ini");

        std::fs::write(&path, "[unterminated\ncache-root = x\n").unwrap();

        let err = RootsConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn default_path_is_under_home() {
        let path = default_config_path();
        assert!(path.ends_with(".cachesweep/roots.ini"));
    }
}
