use anyhow::Result;
use locale::config::LocaleConfig;
use locale::evaluation::Evaluator;
use locale::web;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = LocaleConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    if config.google.api_key.is_empty() {
        tracing::warn!(
            "No Google API key configured; geocoding and place lookups will return degraded values"
        );
    }

    let evaluator = Arc::new(Evaluator::from_config(&config)?);
    web::run(config.server.port, evaluator).await
}
