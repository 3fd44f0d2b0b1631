//! Gateway HTTP server (single port).

use crate::config::{Config, Credentials};
use crate::line::{HmacVerifier, JsonEventParser, LineClient, SIGNATURE_HEADER};
use crate::rakuten::RakutenClient;
use crate::webhook::WebhookHandler;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Shared state for the gateway (config and the webhook handler with its clients).
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<Config>,
    pub webhook: WebhookHandler,
}

/// Wire the production collaborators: HMAC verifier, JSON parser, Rakuten search, LINE reply client.
pub fn build_webhook_handler(config: &Config, credentials: &Credentials) -> WebhookHandler {
    let search = RakutenClient::new(
        credentials.rakuten_application_id.clone(),
        credentials.rakuten_affiliate_id.clone(),
        config.rakuten.api_base_url.clone(),
    );
    let sender = LineClient::new(
        credentials.channel_access_token.clone(),
        config.line.api_base_url.clone(),
    );
    WebhookHandler::new(
        Arc::new(HmacVerifier::new(credentials.channel_secret.clone())),
        Arc::new(JsonEventParser),
        Arc::new(search),
        Arc::new(sender),
    )
}

/// Routes: `GET /` health, `POST /callback` webhook.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(health_http))
        .route("/callback", post(line_callback))
        .with_state(state)
}

pub async fn run_gateway(config: Config) -> Result<()> {
    let credentials = Credentials::resolve(&config)?;
    let webhook = build_webhook_handler(&config, &credentials);
    let bind = config.server.bind.trim().to_string();
    let port = config.server.port;
    let state = GatewayState {
        config: Arc::new(config),
        webhook,
    };
    let app = router(state);

    let bind_addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("gateway listening on {} (webhook: POST /callback)", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server exited")?;
    log::info!("gateway stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");
}

/// POST /callback — verifies X-Line-Signature and answers text messages. Empty body on every status.
async fn line_callback(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    match state.webhook.handle_callback(&body, signature).await {
        Ok(status) => status,
        Err(e) => {
            log::error!("webhook handling failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// GET / returns a simple health JSON.
async fn health_http(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "port": state.config.server.port,
    }))
}
