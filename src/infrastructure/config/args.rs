use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "rehost",
    version,
    about = "Rehosts images embedded in GitHub issues and comments as resized WebP assets",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the event payload.
    #[arg(value_name = "EVENT_PATH", default_value = "event.json")]
    pub event_path: PathBuf,

    /// Access token for the GitHub API.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Owner of the asset storage repository.
    #[arg(long, env = "TARGET_OWNER")]
    pub target_owner: Option<String>,

    /// Name of the asset storage repository.
    #[arg(long, env = "TARGET_REPO")]
    pub target_repo: Option<String>,

    /// Branch of the asset storage repository.
    #[arg(long, env = "TARGET_BRANCH")]
    pub target_branch: Option<String>,

    /// Maximum output width in pixels.
    #[arg(long, env = "MAX_WIDTH", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_width: Option<u32>,

    /// WebP quality (0-100).
    #[arg(long, env = "QUALITY", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: Option<u8>,

    /// Repository of the event (`owner/name`), used when the payload has none.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Base URL of the GitHub REST API.
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Hosts trusted as image sources. Replaces the built-in list.
    #[arg(long = "allowed-host", env = "ALLOWED_HOSTS", value_delimiter = ',')]
    pub allowed_hosts: Vec<String>,

    /// Configuration file path.
    #[arg(short, long, env = "REHOST_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}
