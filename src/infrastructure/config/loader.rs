use super::app_config::AppConfig;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN is required")]
    MissingToken,
    #[error("invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

impl ConfigError {
    /// Creates invalid value error.
    #[must_use]
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Loads the configuration file at `path`, or defaults when no file is given.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed. An explicitly
/// named file that is malformed is an error rather than a silent fallback.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    debug!(path = %path.display(), "Loading configuration file");
    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = toml::from_str(&content)?;
    config.config = Some(path.to_path_buf());
    Ok(config)
}
