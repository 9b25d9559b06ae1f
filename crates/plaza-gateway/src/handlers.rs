// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use plaza_catalog::{
    CalendarEvent, CatalogFilter, CatalogItem, ListingState, events_in_month, events_on, facets,
};
use plaza_core::{
    ConversationTurn, HealthStatus, MemoryKind, PlazaError, TraitDeltas, TraitVector,
};
use plaza_personality::hue_degrees;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::server::GatewayState;

/// Request body for POST /api/hue-chat.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HueChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Traits to phrase the prompts with. Defaults to the stored snapshot.
    #[serde(default)]
    pub personality: Option<TraitVector>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

/// Response body for POST /api/hue-chat.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HueChatResponse {
    pub response: String,
    pub emotion: String,
    pub personality_changes: TraitDeltas,
    pub learning_value: f64,
    /// Trait vector after this exchange.
    pub personality: TraitVector,
    pub exchange_count: u64,
    /// Color-wheel degree derived from the average trait.
    pub hue: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryKind>,
}

/// Request body for POST /api/chat.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Query string for GET /api/catalog.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub seller: Option<String>,
    pub country: Option<String>,
}

/// Query string for GET /api/events.
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `YYYY-MM`
    pub month: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// POST /api/hue-chat
///
/// Runs one exchange with the personality agent. The body's `personality`
/// only shapes the prompts; the stored global snapshot is what gets updated.
pub async fn post_hue_chat(
    State(state): State<GatewayState>,
    Json(body): Json<HueChatRequest>,
) -> Response {
    let message = body.message.unwrap_or_default();
    let traits = match body.personality {
        Some(traits) => traits,
        None => state.orchestrator.repository().load().await.traits,
    };

    match state
        .orchestrator
        .handle_user_message(&message, &traits, &body.conversation_history)
        .await
    {
        Ok(outcome) => Json(HueChatResponse {
            response: outcome.agent_text,
            emotion: outcome.emotion,
            personality_changes: outcome.deltas,
            learning_value: outcome.learning_value,
            hue: hue_degrees(&outcome.traits),
            personality: outcome.traits,
            exchange_count: outcome.exchange_count,
            memory: outcome.memory,
        })
        .into_response(),
        Err(PlazaError::InvalidInput(_)) => {
            error_response(StatusCode::BAD_REQUEST, "Message is required")
        }
        Err(e) => {
            error!(error = %e, "hue-chat exchange failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate response",
            )
        }
    }
}

/// POST /api/chat
///
/// Stateless marketplace assistant.
pub async fn post_chat(
    State(state): State<GatewayState>,
    Json(body): Json<ChatRequest>,
) -> Response {
    let message = body.message.unwrap_or_default();
    match state.marketplace.reply(&message).await {
        Ok(response) => Json(ChatResponse { response }).into_response(),
        Err(PlazaError::InvalidInput(_)) => {
            error_response(StatusCode::BAD_REQUEST, "Message is required")
        }
        Err(e) => {
            error!(error = %e, "marketplace reply failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get response from HUE",
            )
        }
    }
}

/// GET /api/catalog
pub async fn get_catalog(
    State(state): State<GatewayState>,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let filter = match CatalogFilter::from_query(
        query.category.as_deref(),
        query.seller.as_deref(),
        query.country.as_deref(),
    ) {
        Ok(filter) => filter,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let listing: ListingState<CatalogItem> =
        ListingState::from_items(filter.apply(&state.catalog));
    Json(listing).into_response()
}

/// GET /api/catalog/facets
pub async fn get_facets(State(state): State<GatewayState>) -> Response {
    Json(facets(&state.catalog)).into_response()
}

/// GET /api/events
///
/// `?date=` lists events starting that day, `?month=` lists the month,
/// neither lists everything. Results are ordered by start.
pub async fn get_events(
    State(state): State<GatewayState>,
    Query(query): Query<EventsQuery>,
) -> Response {
    let events: Vec<CalendarEvent> = match (query.date.as_deref(), query.month.as_deref()) {
        (Some(date), _) => match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(day) => events_on(&state.events, day),
            Err(_) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("invalid date `{date}`, expected YYYY-MM-DD"),
                );
            }
        },
        (None, Some(month)) => match parse_month(month) {
            Some((year, month)) => events_in_month(&state.events, year, month),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("invalid month `{month}`, expected YYYY-MM"),
                );
            }
        },
        (None, None) => {
            let mut all = state.events.as_ref().clone();
            all.sort_by_key(|e| e.start_date);
            all
        }
    };
    Json(events).into_response()
}

fn parse_month(raw: &str) -> Option<(i32, u32)> {
    let (year, month) = raw.split_once('-')?;
    let year = year.parse().ok()?;
    let month = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// GET /health
///
/// Reports `ok` when every collaborator is healthy, `degraded` otherwise.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let mut status = "ok";
    for adapter in &state.health.adapters {
        match adapter.health_check().await {
            Ok(HealthStatus::Healthy) => {}
            Ok(other) => {
                warn!(adapter = adapter.name(), status = ?other, "collaborator not healthy");
                status = "degraded";
            }
            Err(e) => {
                warn!(adapter = adapter.name(), error = %e, "health check failed");
                status = "degraded";
            }
        }
    }

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}
