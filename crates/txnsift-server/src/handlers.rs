//! HTTP request handlers for the webhook server.
//!
//! Implements the health endpoint and the inbound-email webhook using axum.
//! The webhook runs a fixed per-request pipeline with no cross-request
//! state: parse → validate → normalize → extract → persist → notify.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use txnsift_domain::{CompletionProvider, Notifier, RecordId, RecordStore};
use txnsift_extractor::Extractor;
use txnsift_mail::{html_to_text, Normalizer};

/// Shared application state
///
/// Generic over the three collaborator seams so integration tests can
/// substitute deterministic mocks.
pub struct AppState<P, S, N>
where
    P: CompletionProvider,
{
    /// Extraction pipeline
    pub extractor: Arc<Extractor<P>>,
    /// Tabular persistence collaborator
    pub store: Arc<S>,
    /// Push-notification collaborator
    pub notifier: Arc<N>,
    /// Alert-body normalization policy
    pub normalizer: Arc<Normalizer>,
}

impl<P, S, N> Clone for AppState<P, S, N>
where
    P: CompletionProvider,
{
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
            normalizer: Arc::clone(&self.normalizer),
        }
    }
}

/// Inbound email webhook payload (Postmark wire shape)
#[derive(Debug, Deserialize)]
pub struct InboundEmail {
    /// Sender address and display name
    #[serde(rename = "FromFull")]
    pub from_full: Option<FromFull>,

    /// Plain-text body, possibly empty
    #[serde(rename = "TextBody")]
    pub text_body: Option<String>,

    /// HTML body, possibly empty
    #[serde(rename = "HtmlBody")]
    pub html_body: Option<String>,
}

/// Sender identification in the webhook payload
#[derive(Debug, Deserialize)]
pub struct FromFull {
    /// Sender email address
    #[serde(rename = "Email")]
    pub email: String,

    /// Sender display name
    #[serde(rename = "Name", default)]
    pub name: String,
}

/// GET / - plain-text liveness acknowledgement
async fn health() -> &'static str {
    "txnsift is alive"
}

/// POST /inbound-email - the webhook pipeline
///
/// Status mapping: 415 unparseable JSON, 400 missing both bodies, 500
/// extraction or persistence failure, 200 success. A notification failure
/// is logged and never surfaced; the record is already persisted.
async fn inbound_email<P, S, N>(
    State(state): State<AppState<P, S, N>>,
    body: Bytes,
) -> Response
where
    P: CompletionProvider + 'static,
    S: RecordStore + 'static,
    N: Notifier + 'static,
{
    info!("Got inbound email webhook");

    let payload: InboundEmail = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Unable to parse webhook payload: {}", e);
            return (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unable to parse email").into_response();
        }
    };

    if let Some(from) = &payload.from_full {
        info!(sender = %from.email, "Processing alert email");
    }

    // Prefer the plain-text body; fall back to the HTML body
    let text_body = payload.text_body.as_deref().filter(|s| !s.is_empty());
    let html_body = payload.html_body.as_deref().filter(|s| !s.is_empty());

    let alert_text = match (text_body, html_body) {
        (Some(text), _) => state.normalizer.normalize(text),
        (None, Some(html)) => state.normalizer.normalize(&html_to_text(html)),
        (None, None) => {
            error!("No text or html body found");
            return (StatusCode::BAD_REQUEST, "No text or html body found").into_response();
        }
    };

    let record = match state.extractor.extract(&alert_text).await {
        Ok(record) => record,
        Err(e) => {
            error!("Extraction failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "NOT OK").into_response();
        }
    };

    // Persistence must complete before notification is attempted
    let id = RecordId::new();
    if let Err(e) = state.store.insert(id, &record).await {
        error!("Persistence failed: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "NOT OK").into_response();
    }

    // Best-effort: the request already succeeded once persisted
    if let Err(e) = state.notifier.notify(&record).await {
        warn!("Notification failed after persistence: {}", e);
    }

    (StatusCode::OK, "OK").into_response()
}

/// Create the axum router with all routes
pub fn create_router<P, S, N>(state: AppState<P, S, N>) -> AxumRouter
where
    P: CompletionProvider + 'static,
    S: RecordStore + 'static,
    N: Notifier + 'static,
{
    AxumRouter::new()
        .route("/", get(health))
        .route("/inbound-email", post(inbound_email::<P, S, N>))
        .with_state(state)
}
