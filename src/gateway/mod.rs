//! Recommendation gateway.
//!
//! Sends one chat-completion request per [`RecommendationGateway::fetch`]
//! call and turns the outcome into [`Recommendations`] or a classified
//! [`GatewayError`]. There is no retry, cache or shared mutable state here:
//! a "show more ideas" action is a new call with a higher `variant`.

pub mod prompt;
pub mod response;

#[cfg(test)]
pub(crate) mod stub;

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{GatewayConfig, API_KEY_ENV};
use crate::error::{GatewayError, GatewayResult};
use crate::types::{GiftRequest, Recommendations, PAYLOAD_VERSION};

/// Client for the LLM chat-completion endpoint.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RecommendationGateway {
    config: Arc<GatewayConfig>,
    client: reqwest::Client,
}

impl RecommendationGateway {
    /// Build a gateway with its own HTTP client.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GatewayError::Configuration(format!("HTTP client could not be built: {}", e))
            })?;
        Ok(Self::with_client(config, client))
    }

    /// Build a gateway around an existing client.
    pub fn with_client(config: GatewayConfig, client: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    /// Whether a provider credential is configured.
    pub fn is_configured(&self) -> bool {
        self.config.api_key().is_some()
    }

    /// Fetch recommendations for `request`.
    ///
    /// `variant` is only a hint asking the provider for a different sample.
    pub async fn fetch(&self, request: &GiftRequest, variant: u32) -> GatewayResult<Recommendations> {
        let span = tracing::info_span!(
            "gift_fetch",
            call_id = %Uuid::new_v4(),
            variant,
            model = %self.config.model,
            payload_version = PAYLOAD_VERSION,
        );
        self.fetch_once(request, variant).instrument(span).await
    }

    async fn fetch_once(&self, request: &GiftRequest, variant: u32) -> GatewayResult<Recommendations> {
        let api_key = self.config.api_key().ok_or_else(|| {
            tracing::error!("{} is not set, refusing to call the provider", API_KEY_ENV);
            GatewayError::missing_credential()
        })?;

        request.validate().map_err(|problems| {
            tracing::warn!(%problems, "Rejecting invalid gift request");
            GatewayError::InvalidRequest(problems)
        })?;

        let body = prompt::build_chat_request(&self.config, request, variant)?;

        let mut http = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&body);
        if let Some(ref referer) = self.config.referer {
            http = http.header("HTTP-Referer", referer);
        }
        if let Some(ref title) = self.config.app_title {
            http = http.header("X-Title", title);
        }

        tracing::debug!(
            url = %self.config.completions_url(),
            interests = request.interests.len(),
            "Calling LLM provider"
        );

        let response = http.send().await.map_err(|e| {
            tracing::error!(error = %e, "LLM request failed with transport error");
            GatewayError::ProviderTransport(describe_transport_error(&e))
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let text = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "Reading LLM response body failed");
            GatewayError::ProviderTransport(describe_transport_error(&e))
        })?;

        if !status.is_success() {
            let detail = response::error_detail(&text);
            tracing::warn!(status = status.as_u16(), %detail, "LLM provider returned an error status");
            return Err(GatewayError::ProviderTransport(detail));
        }

        if !response::is_json_content_type(content_type.as_deref()) {
            let detail = format!(
                "Expected a JSON response but got content-type {}",
                content_type.as_deref().unwrap_or("<none>")
            );
            tracing::warn!(%detail, "LLM provider returned a non-JSON body");
            return Err(GatewayError::ProviderFormat(detail));
        }

        let recommendations = response::parse_success_body(&text).map_err(|e| {
            tracing::warn!(detail = e.detail(), "LLM provider output failed validation");
            e
        })?;

        tracing::info!(items = recommendations.len(), "Received gift recommendations");
        Ok(recommendations)
    }
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("Timed out waiting for the LLM provider: {}", error)
    } else if error.is_connect() {
        format!("Could not connect to the LLM provider: {}", error)
    } else {
        error.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
