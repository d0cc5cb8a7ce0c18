//! Axum route handlers for the giftwise HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`       — Returns `{"status": "ok", "version": …}`
//! - `POST /gift-helper`  — Canonical `GiftRequest` body, `?variant=N`
//! - `POST /gift-ideas`   — `{"form": RawFormValues, "variant": N}`

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::assistant::GiftAssistant;
use crate::error::{GatewayError, USER_FACING_MESSAGE};
use crate::mapper::RawFormValues;
use crate::types::{GiftRequest, Recommendations, PAYLOAD_VERSION};

type ApiError = (StatusCode, Json<Value>);

/// Shared application state for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Mapper + gateway pipeline.
    pub assistant: GiftAssistant,
}

impl AppState {
    pub fn new(assistant: GiftAssistant) -> Self {
        Self { assistant }
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/gift-helper", post(gift_helper_handler))
        .route("/gift-ideas", post(gift_ideas_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `?variant=N` on the canonical endpoint.
#[derive(Debug, Default, Deserialize)]
struct VariantQuery {
    #[serde(default)]
    variant: u32,
}

/// Body of `POST /gift-ideas`.
#[derive(Debug, Deserialize)]
struct GiftIdeasRequest {
    #[serde(default)]
    form: RawFormValues,
    #[serde(default)]
    variant: u32,
}

/// GET /health — liveness probe.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "payload_version": PAYLOAD_VERSION,
        "service": "giftwise",
        "provider_configured": state.assistant.gateway().is_configured(),
    }))
}

/// POST /gift-helper — fetch recommendations for a canonical payload.
///
/// The credential check runs before the body is looked at, so a
/// misconfigured deployment answers 500 for every request.
async fn gift_helper_handler(
    State(state): State<AppState>,
    Query(query): Query<VariantQuery>,
    body: Bytes,
) -> Result<Json<Recommendations>, ApiError> {
    let gateway = state.assistant.gateway();
    if !gateway.is_configured() {
        return Err(gateway_error(GatewayError::missing_credential()));
    }

    let json = parse_json_body(&body)?;
    let request: GiftRequest = serde_json::from_value(json)
        .map_err(|e| gateway_error(GatewayError::InvalidRequest(e.to_string())))?;

    gateway
        .fetch(&request, query.variant)
        .await
        .map(Json)
        .map_err(gateway_error)
}

/// POST /gift-ideas — map raw form values, then fetch.
///
/// `variant == 0` is the initial submit; anything else is a refetch.
async fn gift_ideas_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Recommendations>, ApiError> {
    let json = parse_json_body(&body)?;
    let request: GiftIdeasRequest = serde_json::from_value(json)
        .map_err(|e| gateway_error(GatewayError::InvalidRequest(e.to_string())))?;

    let assistant = &state.assistant;
    let result = if request.variant == 0 {
        assistant.submit(&request.form).await
    } else {
        assistant.refetch(&request.form, request.variant).await
    };

    result.map(Json).map_err(gateway_error)
}

fn parse_json_body(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Invalid JSON body",
                "kind": "invalid_request",
                "details": e.to_string(),
                "message": USER_FACING_MESSAGE,
            })),
        )
    })
}

fn gateway_error(error: GatewayError) -> ApiError {
    (error.status_code(), Json(error.to_json()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
