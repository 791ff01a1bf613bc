use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rehost::application::{EventClassifier, RehostImagesUseCase};
use rehost::infrastructure::{
    AppConfig, CliArgs, GitHubClient, GitHubContentStore, GitHubIssueTracker, HttpImageFetcher,
    ImageFetcherConfig, load_config, load_event,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_app_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    init_logging(&config)?;
    config.validate()?;

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = load_app_config()?;
    let token = config.token()?.clone();

    info!(
        version = rehost::VERSION,
        target = %format!("{}/{}", config.target.owner, config.target.repo),
        "Starting {}",
        rehost::NAME
    );

    let event = load_event(&config.event_path).await?;
    let context = EventClassifier::classify(&event, config.repository.as_deref())?;

    let client = GitHubClient::with_base_url(&config.api_url, token.clone())?;
    let fetcher = Arc::new(HttpImageFetcher::new(token, &ImageFetcherConfig::default())?);
    let store = Arc::new(GitHubContentStore::new(
        client.clone(),
        &config.target.owner,
        &config.target.repo,
        &config.target.branch,
    ));
    let tracker = Arc::new(GitHubIssueTracker::new(client));

    let use_case = RehostImagesUseCase::new(
        fetcher,
        store,
        tracker,
        config.transcoder(),
        config.host_allowlist(),
    );

    let report = use_case.execute(&context).await?;
    info!(subject = %context.subject, %report, "Run complete");

    Ok(())
}
