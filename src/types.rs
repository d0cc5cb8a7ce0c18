//! Canonical payload and recommendation types.
//!
//! [`GiftRequest`] is the stable, versioned shape sent to the LLM provider,
//! independent of how the questionnaire names its fields. [`Recommendation`]
//! is the internal shape handed back to the UI after the provider's output
//! has been validated.

use serde::{Deserialize, Serialize};

/// Version tag of the canonical payload shape.
///
/// Reported on `/health` and logged with every provider call. It is not part
/// of the body sent to the provider.
pub const PAYLOAD_VERSION: &str = "2024-11";

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Who the gift is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientProfile {
    /// Canonical relationship token (e.g. "colleague").
    pub relationship: String,
    /// Canonical age range token (e.g. "25_34").
    pub age_range: String,
    /// Canonical gender token, when the UI collected one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl RecipientProfile {
    pub fn new(relationship: impl Into<String>, age_range: impl Into<String>) -> Self {
        Self {
            relationship: relationship.into(),
            age_range: age_range.into(),
            gender: None,
        }
    }

    /// Set the gender token.
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

/// Spending range in the shop's currency.
///
/// Always satisfies `0 <= min <= max` when built through [`Budget::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub min: f64,
    pub max: f64,
}

impl Budget {
    /// Build a budget, normalizing the bounds.
    ///
    /// Negative and non-finite bounds become 0; `max` is clamped up to `min`.
    pub fn new(min: f64, max: f64) -> Self {
        let min = non_negative(min);
        let max = non_negative(max).max(min);
        Self { min, max }
    }

    /// Whether the bounds hold the budget invariant.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Risk tolerance
// ---------------------------------------------------------------------------

/// How far from conventional gifts the suggestions may stray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    #[default]
    Low,
    Medium,
}

impl RiskTolerance {
    /// Map the UI's "okay with slightly more original gifts" switch.
    pub fn from_open_to_original(open: bool) -> Self {
        if open {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

// ---------------------------------------------------------------------------
// GiftRequest
// ---------------------------------------------------------------------------

/// The canonical request payload.
///
/// Built once per submit/refetch and discarded after the provider call
/// resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftRequest {
    pub recipient: RecipientProfile,
    /// Canonical occasion token; serialized as `null` when absent.
    pub occasion: Option<String>,
    #[serde(default)]
    pub personality: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_description: Option<String>,
    pub budget: Budget,
    #[serde(default)]
    pub gift_style: String,
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
}

impl GiftRequest {
    /// Check the shape rules a payload must satisfy before it is sent.
    ///
    /// Returns the list of violations joined into one message on failure.
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();

        if self.recipient.relationship.trim().is_empty() {
            problems.push("recipient.relationship is required");
        }
        if self.recipient.age_range.trim().is_empty() {
            problems.push("recipient.age_range is required");
        }
        if !self.budget.min.is_finite() || !self.budget.max.is_finite() {
            problems.push("budget bounds must be finite numbers");
        } else if self.budget.min < 0.0 || self.budget.max < 0.0 {
            problems.push("budget bounds must not be negative");
        } else if self.budget.min > self.budget.max {
            problems.push("budget.min must not exceed budget.max");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// A single gift suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    /// Advisory price; expected inside the request budget but not enforced.
    pub approx_price: f64,
    pub reason: String,
}

/// Ordered suggestions in provider order, serialized as `{"items": [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recommendations {
    pub items: Vec<Recommendation>,
}

impl Recommendations {
    pub fn new(items: Vec<Recommendation>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation> {
        self.items.iter()
    }
}

impl IntoIterator for Recommendations {
    type Item = Recommendation;
    type IntoIter = std::vec::IntoIter<Recommendation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
