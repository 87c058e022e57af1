//! txnsift Server
//!
//! The webhook-facing edge of txnsift: receives inbound-email webhooks for
//! credit-card transaction alerts, runs the extraction pipeline, persists
//! the validated record, and pushes a best-effort notification.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use txnsift_extractor::{Extractor, ExtractorConfig};
use txnsift_llm::OpenAiProvider;
use txnsift_mail::Normalizer;
use txnsift_sinks::{AirtableStore, NtfyNotifier};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the webhook HTTP server
///
/// Builds the LLM provider, sinks, and normalizer from the immutable
/// configuration, then serves until shutdown.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting txnsift server");
    info!("Bind address: {}", config.bind_addr());
    info!("Destination table: {}", config.airtable_table_name);
    info!("Notifications enabled: {}", config.notifications_enabled);

    let mut provider = OpenAiProvider::new(config.openai_api_key.as_str());
    if let Some(model) = &config.openai_model {
        provider = provider.with_model(model.as_str());
    }

    let extractor = Extractor::new(provider, ExtractorConfig::default());

    let store = AirtableStore::new(
        config.airtable_api_key.as_str(),
        config.airtable_base_id.as_str(),
        config.airtable_table_name.as_str(),
    );

    let notifier = NtfyNotifier::new(
        config.airtable_base_id.as_str(),
        config.airtable_table_name.as_str(),
    )
    .with_enabled(config.notifications_enabled);

    let normalizer = match &config.trailer_marker {
        Some(marker) => Normalizer::new().with_trailer_marker(marker.as_str()),
        None => Normalizer::new(),
    };

    let state = AppState {
        extractor: Arc::new(extractor),
        store: Arc::new(store),
        notifier: Arc::new(notifier),
        normalizer: Arc::new(normalizer),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
