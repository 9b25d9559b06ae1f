// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use plaza_agent::{ConversationOrchestrator, MarketplaceAssistant};
use plaza_catalog::{CalendarEvent, CatalogItem};
use plaza_config::model::GatewayConfig;
use plaza_core::{PlazaError, PluginAdapter};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// State for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
    /// Collaborators whose health is reported.
    pub adapters: Vec<Arc<dyn PluginAdapter + Send + Sync>>,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub orchestrator: Arc<ConversationOrchestrator>,
    pub marketplace: Arc<MarketplaceAssistant>,
    /// Catalog listings served by `/api/catalog`.
    pub catalog: Arc<Vec<CatalogItem>>,
    /// Events served by `/api/events`.
    pub events: Arc<Vec<CalendarEvent>>,
    pub health: HealthState,
}

/// Builds the router with every route and middleware layer.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api/hue-chat", post(handlers::post_hue_chat))
        .route("/api/chat", post(handlers::post_chat))
        .route("/api/catalog", get(handlers::get_catalog))
        .route("/api/catalog/facets", get(handlers::get_facets))
        .route("/api/events", get(handlers::get_events))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds to `host:port` and serves until `cancel` fires.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), PlazaError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PlazaError::Config(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
        .map_err(|e| PlazaError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
