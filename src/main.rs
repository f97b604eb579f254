use anyhow::Context;
use pulse_core::{AppConfig, CoreError, ErrorExt, ErrorReporter};
use reddit_client::RedditApiClient;
use sentiment_engine::{Lexicon, SentimentService};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "political_pulse=info,reddit_client=info,sentiment_engine=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting Political Pulse");

    let config_path = std::env::args().nth(1);
    if let Err(e) = run(config_path.as_deref()).await {
        ErrorReporter::new().report_error(&e);
        eprintln!("{}", e.user_friendly_message());
        return Err(e).context("political-pulse did not complete");
    }
    Ok(())
}

async fn run(config_path: Option<&str>) -> Result<(), CoreError> {
    let config = match config_path {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    }
    .with_env_credentials();
    config.validate()?;

    let lexicon = match &config.lexicon_path {
        Some(path) => Lexicon::from_path(path)?,
        None => Lexicon::default(),
    };

    let client = RedditApiClient::new(&config.reddit)?;
    let service = SentimentService::new(client, Arc::new(lexicon), config.feed.clone());

    let snapshot = service.dashboard().await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    let metrics = service.source().get_metrics().await;
    tracing::info!(
        "Fetched {} posts in {} requests ({} dropped)",
        metrics.posts_received,
        metrics.total_fetches,
        metrics.posts_dropped
    );
    Ok(())
}
