//! Raw questionnaire values as the UI submits them.

use serde::{Deserialize, Deserializer, Serialize};

/// Occasion as collected by the UI: a single select or a multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OccasionInput {
    Single(String),
    Multiple(Vec<String>),
}

impl Default for OccasionInput {
    fn default() -> Self {
        Self::Multiple(Vec::new())
    }
}

impl OccasionInput {
    /// The chosen label, or the first of several. Blank entries are skipped.
    pub fn primary(&self) -> Option<&str> {
        match self {
            Self::Single(label) => Some(label.as_str()).filter(|l| !l.trim().is_empty()),
            Self::Multiple(labels) => labels
                .iter()
                .map(String::as_str)
                .find(|l| !l.trim().is_empty()),
        }
    }

    /// Number of non-blank selections.
    pub fn selected_count(&self) -> usize {
        match self {
            Self::Single(label) => usize::from(!label.trim().is_empty()),
            Self::Multiple(labels) => labels.iter().filter(|l| !l.trim().is_empty()).count(),
        }
    }
}

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Form state of the gift questionnaire.
///
/// Field names follow the UI (camelCase). Every field is optional so that
/// any revision of the form deserializes; `null` reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFormValues {
    #[serde(deserialize_with = "null_as_default")]
    pub relationship: String,
    pub relationship_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub age_range: String,
    pub gender: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub occasion: OccasionInput,
    pub occasion_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub personality: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub interests: Vec<String>,
    pub interest_free_text: Option<String>,
    /// Named budget preset (e.g. "10-25").
    pub budget: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    #[serde(alias = "giftTone", deserialize_with = "null_as_default")]
    pub gift_style: String,
    #[serde(deserialize_with = "null_as_default")]
    pub risk_tolerance: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_preset_revision() {
        let form: RawFormValues = serde_json::from_value(serde_json::json!({
            "relationship": "Teammate",
            "ageRange": "25–34",
            "occasion": ["Secret Santa at work", "Thank you gift"],
            "budget": "10-25",
            "giftStyle": "Useful",
            "riskTolerance": true
        }))
        .unwrap();

        assert_eq!(form.age_range, "25–34");
        assert_eq!(form.occasion.primary(), Some("Secret Santa at work"));
        assert_eq!(form.occasion.selected_count(), 2);
        assert_eq!(form.budget.as_deref(), Some("10-25"));
        assert!(form.risk_tolerance);
    }

    #[test]
    fn test_deserialize_range_revision() {
        let form: RawFormValues = serde_json::from_value(serde_json::json!({
            "relationship": "Manager",
            "ageRange": "35–44",
            "occasion": "Other",
            "occasionText": "Promotion",
            "budgetMin": 20,
            "budgetMax": 40,
            "giftTone": "Fun & playful"
        }))
        .unwrap();

        assert_eq!(form.occasion, OccasionInput::Single("Other".into()));
        assert_eq!(form.budget_min, Some(20.0));
        assert_eq!(form.gift_style, "Fun & playful");
        assert!(form.personality.is_empty());
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let form: RawFormValues = serde_json::from_value(serde_json::json!({
            "relationship": null,
            "ageRange": null,
            "occasion": null,
            "personality": null,
            "interests": null,
            "giftStyle": null,
            "riskTolerance": null,
            "budget": null
        }))
        .unwrap();

        assert_eq!(form, RawFormValues::default());
        assert_eq!(form.occasion.primary(), None);
    }

    #[test]
    fn test_blank_occasions_are_skipped() {
        let occasion = OccasionInput::Multiple(vec!["".into(), "Birthday at work".into()]);
        assert_eq!(occasion.primary(), Some("Birthday at work"));
        assert_eq!(OccasionInput::Single("  ".into()).primary(), None);
        assert_eq!(OccasionInput::default().selected_count(), 0);
    }
}
