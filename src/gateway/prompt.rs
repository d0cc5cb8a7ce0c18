//! Chat-completion request construction.

use serde::Serialize;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::types::GiftRequest;

/// Number of ideas the provider is asked for. Other counts are accepted.
pub const TARGET_ITEM_COUNT: usize = 5;

/// Fixed instruction constraining the provider to the `{items: [...]}` shape.
pub fn system_instruction() -> String {
    format!(
        "\
You are a gift planning engine.

You receive a JSON profile describing:
- who the gift is for (relationship, age range, optional gender),
- the occasion,
- their personality traits and interests,
- an optional free-text description,
- a budget range,
- the desired gift style,
- and the risk tolerance.

Suggest {count} specific gift ideas that fit this person and budget.

For each gift idea, return:
- title: short name of the gift
- description: one-sentence description
- approx_price: a number within the given budget range
- reason: short explanation of why this gift fits (interests, personality, relationship, occasion, gift_style, risk_tolerance)

Output STRICTLY VALID JSON with this structure:
{{\"items\": [{{\"title\": \"...\", \"description\": \"...\", \"approx_price\": 0, \"reason\": \"...\"}}]}}
No extra text, no markdown, only JSON.",
        count = TARGET_ITEM_COUNT
    )
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// User message embedding the canonical payload.
///
/// A non-zero `variant` adds a line asking for a different set of ideas.
pub fn user_message(request: &GiftRequest, variant: u32) -> GatewayResult<String> {
    let payload = serde_json::to_string(request).map_err(|e| {
        GatewayError::InvalidRequest(format!("Payload could not be serialized: {}", e))
    })?;

    let mut content = format!("Here is the gift profile in JSON:\n{}", payload);
    if variant > 0 {
        content.push_str(&format!(
            "\n\nThis is request variant #{}. Suggest a fresh set of ideas that differ from \
             earlier suggestions for the same profile.",
            variant
        ));
    }
    Ok(content)
}

/// Assemble the full request body.
pub fn build_chat_request(
    config: &GatewayConfig,
    request: &GiftRequest,
    variant: u32,
) -> GatewayResult<ChatCompletionRequest> {
    Ok(ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(system_instruction()),
            ChatMessage::user(user_message(request, variant)?),
        ],
        temperature: config.temperature,
    })
}
