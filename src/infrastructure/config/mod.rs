//! Application configuration.

pub mod app_config;
pub mod args;
pub mod loader;

pub use app_config::{
    AllowlistConfig, AppConfig, DEFAULT_API_URL, ImagesConfig, LogLevel, TargetConfig,
};
pub use args::CliArgs;
pub use loader::{ConfigError, load_config};
