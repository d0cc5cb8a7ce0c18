//! Gateway error taxonomy.
//!
//! Every failure of a recommendation fetch is converted into one of the
//! [`GatewayError`] kinds at the gateway boundary. Each kind carries a detail
//! string taken from the richest source available (structured provider error,
//! raw response text, or a generic fallback).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message shown to shoppers whenever a fetch fails.
pub const USER_FACING_MESSAGE: &str =
    "We couldn't fetch gift ideas right now. Please try again.";

/// Errors returned by [`crate::gateway::RecommendationGateway::fetch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The provider credential is missing. Fails before any network attempt.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The payload failed basic shape validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network failure or non-2xx status from the provider.
    #[error("LLM request failed: {0}")]
    ProviderTransport(String),

    /// 2xx from the provider but the body could not be used.
    #[error("LLM returned an unusable response: {0}")]
    ProviderFormat(String),
}

/// Convenience alias used across the gateway.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// The provider credential is not configured.
    pub fn missing_credential() -> Self {
        Self::Configuration(format!("Missing {}", crate::config::API_KEY_ENV))
    }

    /// Stable machine-readable kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::InvalidRequest(_) => "invalid_request",
            Self::ProviderTransport(_) => "provider_transport",
            Self::ProviderFormat(_) => "provider_format",
        }
    }

    /// The detail message without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::Configuration(d)
            | Self::InvalidRequest(d)
            | Self::ProviderTransport(d)
            | Self::ProviderFormat(d) => d,
        }
    }

    /// Short headline for the error body.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "Server is not configured",
            Self::InvalidRequest(_) => "Missing or invalid required fields",
            Self::ProviderTransport(_) => "LLM request failed",
            Self::ProviderFormat(_) => "Empty or invalid response from LLM",
        }
    }

    /// HTTP status the error is surfaced with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ProviderTransport(_) | Self::ProviderFormat(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Generic text for the UI, shown alongside [`Self::detail`].
    pub fn user_message(&self) -> &'static str {
        USER_FACING_MESSAGE
    }

    /// JSON body sent to HTTP callers.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.summary(),
            "kind": self.kind(),
            "details": self.detail(),
            "message": self.user_message(),
        })
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
