//! Produce Freshness Advisor - server entry point

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use produce_freshness_backend::{
    config::Config, create_app, external::ModelServerClient, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pfa_server=debug,produce_freshness_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Produce Freshness Advisor");
    tracing::info!("Environment: {}", config.environment);

    // Connect the classifier
    let classifier = ModelServerClient::from_config(&config.classifier)?;
    tracing::info!("Model server endpoint: {}", config.classifier.endpoint);

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        classifier: Arc::new(classifier),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
