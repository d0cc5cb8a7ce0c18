//! The two operations the questionnaire UI calls: submit and refetch.

use crate::error::GatewayResult;
use crate::gateway::RecommendationGateway;
use crate::mapper::{PayloadMapper, RawFormValues};
use crate::types::{GiftRequest, Recommendations};

/// Mapper and gateway wired into one pipeline.
#[derive(Debug, Clone)]
pub struct GiftAssistant {
    mapper: PayloadMapper,
    gateway: RecommendationGateway,
}

impl GiftAssistant {
    pub fn new(mapper: PayloadMapper, gateway: RecommendationGateway) -> Self {
        Self { mapper, gateway }
    }

    pub fn gateway(&self) -> &RecommendationGateway {
        &self.gateway
    }

    /// The canonical payload a submission would send.
    pub fn preview(&self, form: &RawFormValues) -> GiftRequest {
        self.mapper.map(form)
    }

    /// First fetch after the review step.
    pub async fn submit(&self, form: &RawFormValues) -> GatewayResult<Recommendations> {
        self.refetch(form, 0).await
    }

    /// "Show more ideas" / "try again": the full flow with the caller's
    /// variant counter. The form is only read, so it survives failures.
    pub async fn refetch(&self, form: &RawFormValues, variant: u32) -> GatewayResult<Recommendations> {
        let request = self.mapper.map(form);
        self.gateway.fetch(&request, variant).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::error::GatewayError;
    use crate::gateway::stub::StubProvider;
    use axum::http::StatusCode;
    use serde_json::json;

    fn form() -> RawFormValues {
        serde_json::from_value(json!({
            "relationship": "Teammate",
            "ageRange": "18–24",
            "occasion": ["Secret Santa at work"],
            "interests": ["Gaming & geeky stuff"],
            "budget": "Under 10",
            "giftStyle": "Fun & playful"
        }))
        .unwrap()
    }

    fn assistant(base_url: String) -> GiftAssistant {
        let gateway = RecommendationGateway::new(
            GatewayConfig::default()
                .with_api_key("sk-test")
                .with_base_url(base_url),
        )
        .unwrap();
        GiftAssistant::new(PayloadMapper::default(), gateway)
    }

    #[tokio::test]
    async fn test_submit_sends_mapped_payload() {
        let stub = StubProvider::completion(json!({"items": [
            {"title": "Pixel keychain", "description": "d", "approx_price": 6, "reason": "r"}
        ]}))
        .await;
        let assistant = assistant(stub.base_url());

        let recs = assistant.submit(&form()).await.unwrap();
        assert_eq!(recs.items[0].title, "Pixel keychain");

        let body = stub.last_body().unwrap();
        let user = body["messages"][1]["content"].as_str().unwrap();
        assert!(user.contains("\"relationship\":\"teammate\""));
        assert!(user.contains("\"interests\":[\"gaming_geeky\"]"));
        assert!(user.contains("\"max\":10.0"));
        assert!(!user.contains("variant #"));
    }

    #[tokio::test]
    async fn test_refetch_passes_variant() {
        let stub = StubProvider::completion(json!({"items": []})).await;
        let assistant = assistant(stub.base_url());

        assistant.refetch(&form(), 4).await.unwrap();
        let body = stub.last_body().unwrap();
        assert!(body["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("variant #4"));
    }

    #[tokio::test]
    async fn test_failure_keeps_form_for_retry() {
        let stub = StubProvider::raw(StatusCode::BAD_GATEWAY, "application/json", r#"{"error":"upstream down"}"#).await;
        let assistant = assistant(stub.base_url());
        let values = form();

        let err = assistant.submit(&values).await.unwrap_err();
        assert_eq!(err, GatewayError::ProviderTransport("upstream down".into()));
        assert_eq!(values, form());

        let _ = assistant.refetch(&values, 1).await;
        assert_eq!(stub.hits(), 2);
    }

    #[test]
    fn test_preview_matches_mapper() {
        let gateway = RecommendationGateway::new(GatewayConfig::default()).unwrap();
        let assistant = GiftAssistant::new(PayloadMapper::default(), gateway);
        let preview = assistant.preview(&form());
        assert_eq!(preview, PayloadMapper::default().map(&form()));
        assert_eq!(preview.occasion.as_deref(), Some("secret_santa"));
    }
}
