//! Provider response validation.
//!
//! Provider output is untrusted text coerced to JSON. Nothing here
//! interprets it beyond the four documented item fields, each of which is
//! type-checked before a [`Recommendation`] is built.

use serde_json::Value;

use crate::error::{GatewayError, GatewayResult};
use crate::types::{Recommendation, Recommendations};

/// Raw text included in details is cut to this many characters.
pub const MAX_DETAIL_CHARS: usize = 500;

/// Detail used when nothing better is available.
pub const GENERIC_FAILURE_DETAIL: &str = "The gift idea service did not return a usable response";

// ---------------------------------------------------------------------------
// Content type
// ---------------------------------------------------------------------------

/// Whether a `Content-Type` header value denotes JSON.
///
/// Accepts `application/json` and `+json` subtypes, with or without
/// parameters.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

// ---------------------------------------------------------------------------
// Error details
// ---------------------------------------------------------------------------

/// Pull the most useful detail out of a failed response body.
///
/// Priority: `error` (string, or `error.message`), then `message`, then
/// `details` from a JSON body; then the raw text; then a generic message.
pub fn error_detail(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(detail) = structured_error(&json) {
            return detail;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        GENERIC_FAILURE_DETAIL.to_string()
    } else {
        truncate(trimmed, MAX_DETAIL_CHARS)
    }
}

fn structured_error(json: &Value) -> Option<String> {
    let error = json.get("error");
    let candidates = [
        error.and_then(Value::as_str),
        error.and_then(|e| e.get("message")).and_then(Value::as_str),
        json.get("message").and_then(Value::as_str),
        json.get("details").and_then(Value::as_str),
    ];
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Success bodies
// ---------------------------------------------------------------------------

/// Parse a 2xx body into recommendations.
///
/// The body is either a chat-completion envelope whose first choice carries
/// the JSON text, or an already unwrapped `{"items": [...]}` object.
pub fn parse_success_body(body: &str) -> GatewayResult<Recommendations> {
    let envelope: Value = serde_json::from_str(body).map_err(|e| {
        GatewayError::ProviderFormat(format!(
            "Response body is not valid JSON ({}): {}",
            e,
            truncate(body.trim(), MAX_DETAIL_CHARS)
        ))
    })?;

    if envelope.get("choices").is_some() {
        let text = completion_text(&envelope).ok_or_else(|| {
            GatewayError::ProviderFormat("Empty or invalid response from LLM".to_string())
        })?;
        let inner: Value = serde_json::from_str(strip_code_fence(text)).map_err(|_| {
            GatewayError::ProviderFormat(format!(
                "LLM did not return valid JSON: {}",
                truncate(text.trim(), MAX_DETAIL_CHARS)
            ))
        })?;
        return parse_items(&inner);
    }

    if envelope.get("items").is_some() {
        return parse_items(&envelope);
    }

    let detail = structured_error(&envelope)
        .unwrap_or_else(|| "Response has neither completion choices nor items".to_string());
    Err(GatewayError::ProviderFormat(detail))
}

/// Completion text of the first choice.
///
/// Reads `choices[0].message.content`, or `choices[0].message` when the
/// provider put the text there directly. Blank text counts as missing.
pub fn completion_text(envelope: &Value) -> Option<&str> {
    let message = envelope.get("choices")?.get(0)?.get("message")?;
    message
        .get("content")
        .and_then(Value::as_str)
        .or_else(|| message.as_str())
        .filter(|text| !text.trim().is_empty())
}

/// Remove one surrounding markdown code fence (```json ... ```), if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Info string ("json") may sit on its own line or share it with the body.
    body.trim_start_matches(|c: char| c.is_ascii_alphanumeric()).trim()
}

/// Validate `{"items": [...]}` field by field.
pub fn parse_items(value: &Value) -> GatewayResult<Recommendations> {
    let object = value.as_object().ok_or_else(|| {
        GatewayError::ProviderFormat("LLM output is not a JSON object".to_string())
    })?;
    let items = object
        .get("items")
        .ok_or_else(|| GatewayError::ProviderFormat("LLM output has no items array".to_string()))?
        .as_array()
        .ok_or_else(|| GatewayError::ProviderFormat("LLM output items is not an array".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_item(index, item))
        .collect::<GatewayResult<Vec<_>>>()
        .map(Recommendations::new)
}

fn parse_item(index: usize, item: &Value) -> GatewayResult<Recommendation> {
    let invalid = |what: &str| {
        GatewayError::ProviderFormat(format!("Item {} is invalid: {}", index, what))
    };

    let object = item.as_object().ok_or_else(|| invalid("not an object"))?;
    let text_field = |name: &str| -> GatewayResult<String> {
        object
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| invalid(&format!("`{}` must be a string", name)))
    };

    let title = text_field("title")?;
    if title.trim().is_empty() {
        return Err(invalid("`title` is empty"));
    }
    let description = text_field("description")?;
    let reason = text_field("reason")?;
    let approx_price = object
        .get("approx_price")
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid("`approx_price` must be a number"))?;

    Ok(Recommendation {
        title,
        description,
        approx_price,
        reason,
    })
}
