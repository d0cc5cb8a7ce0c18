//! Payload mapper: questionnaire values -> canonical [`GiftRequest`].
//!
//! The mapping is deterministic and total. Unknown labels never fail; they
//! resolve to a fallback token (enum fields) or to a slug (list fields).

pub mod form;
pub mod tables;

use std::sync::Arc;

pub use form::{OccasionInput, RawFormValues};
pub use tables::{normalize_label, slugify, BudgetPresets, LabelTable, LookupTables};

use crate::types::{Budget, GiftRequest, RecipientProfile, RiskTolerance};

/// Maps [`RawFormValues`] to [`GiftRequest`] using injected lookup tables.
#[derive(Debug, Clone)]
pub struct PayloadMapper {
    tables: Arc<LookupTables>,
}

impl Default for PayloadMapper {
    fn default() -> Self {
        Self::new(Arc::new(LookupTables::default()))
    }
}

impl PayloadMapper {
    pub fn new(tables: Arc<LookupTables>) -> Self {
        Self { tables }
    }

    /// Build the canonical payload for one submission.
    pub fn map(&self, form: &RawFormValues) -> GiftRequest {
        let tables = &*self.tables;

        let mut recipient = RecipientProfile::new(
            tables.relationship.resolve(&form.relationship),
            tables.age_range.resolve(&form.age_range),
        );
        if let Some(gender) = non_blank(form.gender.as_deref()) {
            recipient = recipient.with_gender(tables.gender.resolve(gender));
        }

        let occasion = self.map_occasion(&form.occasion);

        let custom_occasion = occasion
            .as_deref()
            .filter(|token| *token == tables.occasion.fallback())
            .and(non_blank(form.occasion_text.as_deref()));
        let custom_relationship = Some(recipient.relationship.as_str())
            .filter(|token| *token == tables.relationship.fallback())
            .and(non_blank(form.relationship_text.as_deref()));

        let free_description = join_description(&[
            custom_occasion.map(|text| format!("Occasion: {}", text)),
            custom_relationship.map(|text| format!("Relationship: {}", text)),
            non_blank(form.interest_free_text.as_deref()).map(str::to_string),
        ]);

        GiftRequest {
            recipient,
            occasion,
            personality: map_list(&tables.personality, &form.personality),
            interests: map_list(&tables.interests, &form.interests),
            free_description,
            budget: self.map_budget(form),
            gift_style: tables.gift_style.resolve(&form.gift_style).to_string(),
            risk_tolerance: RiskTolerance::from_open_to_original(form.risk_tolerance),
        }
    }

    /// First selected occasion wins; the canonical payload carries one.
    fn map_occasion(&self, occasion: &OccasionInput) -> Option<String> {
        let selected = occasion.selected_count();
        if selected > 1 {
            tracing::debug!(
                selected,
                kept = ?occasion.primary(),
                "Multiple occasions selected, keeping the first"
            );
        }
        occasion
            .primary()
            .map(|label| self.tables.occasion.resolve(label).to_string())
    }

    /// Preset wins when wired in; otherwise raw bounds; otherwise fallback.
    fn map_budget(&self, form: &RawFormValues) -> Budget {
        let presets = &self.tables.budget_presets;

        if let Some(preset) = non_blank(form.budget.as_deref()) {
            return match presets.get(preset) {
                Some(budget) => budget,
                None => {
                    tracing::debug!(preset, "Unknown budget preset, using fallback range");
                    presets.fallback()
                }
            };
        }

        match (form.budget_min, form.budget_max) {
            (None, None) => presets.fallback(),
            (min, max) => {
                let min = min.unwrap_or(0.0);
                Budget::new(min, max.unwrap_or(min))
            }
        }
    }
}

/// Map each element through `table`, slugging unknown labels. Empty slugs
/// and duplicates are dropped; order is kept.
fn map_list(table: &LabelTable, labels: &[String]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let token = table.resolve_or_slug(label);
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn join_description(parts: &[Option<String>]) -> Option<String> {
    let joined = parts
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
