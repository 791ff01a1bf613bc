//! Application configuration.

use serde::Deserialize;
use std::path::PathBuf;

use super::args::CliArgs;
use super::loader::ConfigError;
use crate::application::services::{DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, ImageTranscoder};
use crate::domain::entities::GitHubToken;
use crate::domain::services::{DEFAULT_ALLOWED_HOSTS, HostAllowlist};

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default event payload path.
pub const DEFAULT_EVENT_PATH: &str = "event.json";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Run configuration. Loaded from an optional TOML file, then overridden by
/// CLI flags and environment variables.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Event payload path.
    #[serde(skip, default = "default_event_path")]
    pub event_path: PathBuf,

    /// API token. Never read from the file.
    #[serde(skip)]
    pub token: Option<GitHubToken>,

    /// Ambient `owner/name` of the event's repository.
    #[serde(skip)]
    pub repository: Option<String>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// GitHub REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Asset storage repository.
    #[serde(default)]
    pub target: TargetConfig,

    /// Transcoding parameters.
    #[serde(default)]
    pub images: ImagesConfig,

    /// Trusted image source hosts.
    #[serde(default)]
    pub allowlist: AllowlistConfig,
}

/// Asset storage repository configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Repository owner.
    #[serde(default = "default_target_owner")]
    pub owner: String,

    /// Repository name.
    #[serde(default = "default_target_repo")]
    pub repo: String,

    /// Branch assets are committed to and served from.
    #[serde(default = "default_target_branch")]
    pub branch: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            owner: default_target_owner(),
            repo: default_target_repo(),
            branch: default_target_branch(),
        }
    }
}

/// Transcoding configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ImagesConfig {
    /// Maximum output width in pixels.
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// WebP quality (0-100).
    #[serde(default = "default_quality")]
    pub quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Allowlist configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowlistConfig {
    /// Exact host names.
    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,
}

impl Default for AllowlistConfig {
    fn default() -> Self {
        Self {
            hosts: default_hosts(),
        }
    }
}

fn default_event_path() -> PathBuf {
    PathBuf::from(DEFAULT_EVENT_PATH)
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_target_owner() -> String {
    "user-attachments".to_string()
}

fn default_target_repo() -> String {
    "assets".to_string()
}

fn default_target_branch() -> String {
    "main".to_string()
}

const fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

const fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

fn default_hosts() -> Vec<String> {
    DEFAULT_ALLOWED_HOSTS.iter().map(ToString::to_string).collect()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        self.event_path = args.event_path;
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(token) = args.token {
            self.token = GitHubToken::new(token);
        }
        if let Some(repository) = args.repository.filter(|r| !r.trim().is_empty()) {
            self.repository = Some(repository);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url {
            self.api_url = api_url;
        }
        if let Some(owner) = args.target_owner {
            self.target.owner = owner;
        }
        if let Some(repo) = args.target_repo {
            self.target.repo = repo;
        }
        if let Some(branch) = args.target_branch {
            self.target.branch = branch;
        }
        if let Some(max_width) = args.max_width {
            self.images.max_width = max_width;
        }
        if let Some(quality) = args.quality {
            self.images.quality = quality;
        }
        if !args.allowed_hosts.is_empty() {
            self.allowlist.hosts = args.allowed_hosts;
        }
    }

    /// Checks values that the file may have set out of range.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingToken`] or [`ConfigError::InvalidValue`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.is_none() {
            return Err(ConfigError::MissingToken);
        }
        if self.images.max_width == 0 {
            return Err(ConfigError::invalid("images.max_width", "must be at least 1"));
        }
        if self.images.quality > 100 {
            return Err(ConfigError::invalid("images.quality", "must be between 0 and 100"));
        }
        for (key, value) in [
            ("target.owner", &self.target.owner),
            ("target.repo", &self.target.repo),
            ("target.branch", &self.target.branch),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(key, "must not be empty"));
            }
        }
        reqwest::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::invalid("api_url", e.to_string()))?;
        Ok(())
    }

    /// Returns the token.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingToken`] if none was supplied.
    pub fn token(&self) -> Result<&GitHubToken, ConfigError> {
        self.token.as_ref().ok_or(ConfigError::MissingToken)
    }

    /// Builds the transcoder from the image settings.
    #[must_use]
    pub fn transcoder(&self) -> ImageTranscoder {
        ImageTranscoder::new(self.images.max_width, self.images.quality)
    }

    /// Builds the host allowlist.
    #[must_use]
    pub fn host_allowlist(&self) -> HostAllowlist {
        HostAllowlist::new(&self.allowlist.hosts)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            event_path: default_event_path(),
            token: None,
            repository: None,
            log_path: None,
            log_level: LogLevel::Info,
            api_url: default_api_url(),
            target: TargetConfig::default(),
            images: ImagesConfig::default(),
            allowlist: AllowlistConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["rehost"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            log_level = "debug"

            [target]
            owner = "acme"
            branch = "assets"

            [images]
            quality = 60

            [allowlist]
            hosts = ["images.acme.test"]
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.target.owner, "acme");
        assert_eq!(config.target.repo, "assets");
        assert_eq!(config.target.branch, "assets");
        assert_eq!(config.images.max_width, 1200);
        assert_eq!(config.images.quality, 60);
        assert_eq!(config.allowlist.hosts, vec!["images.acme.test"]);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.event_path, PathBuf::from("event.json"));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.target.owner, "user-attachments");
        assert_eq!(config.target.repo, "assets");
        assert_eq!(config.target.branch, "main");
        assert_eq!(config.images.max_width, 1200);
        assert_eq!(config.images.quality, 80);
        assert!(config.host_allowlist().is_allowed("https://github.com/a.png"));
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config: AppConfig = toml::from_str("[images]\nmax_width = 800\n").unwrap();
        config.merge_with_args(args(&[
            "--token",
            "ghp_abc",
            "--max-width",
            "400",
            "--target-owner",
            "acme",
            "--repository",
            "octo/widgets",
        ]));

        assert_eq!(config.images.max_width, 400);
        assert_eq!(config.target.owner, "acme");
        assert_eq!(config.repository.as_deref(), Some("octo/widgets"));
        assert_eq!(config.token().unwrap().as_str(), "ghp_abc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_token_is_missing() {
        let mut config = AppConfig::default();
        config.merge_with_args(args(&["--token", "   "]));

        assert!(matches!(config.validate(), Err(ConfigError::MissingToken)));
    }

    #[test]
    fn test_file_values_are_validated() {
        let mut config: AppConfig = toml::from_str("[images]\nquality = 150\n").unwrap();
        config.token = GitHubToken::new("ghp_abc");

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "images.quality"
        ));
    }
}
