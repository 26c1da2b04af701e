//! Error types for configuration loading and settings storage.
//!
//! The normalization and rendering pipeline itself never fails; these errors
//! only come from the I/O around it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading configuration or talking to a settings store.
#[derive(Debug, Error)]
pub enum Error {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// One message per invalid configuration value.
    #[error("invalid configuration:\n  - {}", .0.join("\n  - "))]
    ConfigValidation(Vec<String>),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = Error::ConfigValidation(vec![
            "labels.email: must not be empty".to_string(),
            "markup.list_id: invalid value ''".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("labels.email"));
        assert!(msg.contains("markup.list_id"));
    }

    #[test]
    fn test_not_found_shows_path() {
        let err = Error::ConfigNotFound(PathBuf::from("/tmp/missing.toml"));
        assert!(err.to_string().contains("/tmp/missing.toml"));
    }
}
