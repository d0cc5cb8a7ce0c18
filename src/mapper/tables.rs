//! Lookup tables from UI display labels to canonical tokens.
//!
//! Tables are plain immutable data handed to the mapper at construction
//! time. [`LookupTables::default`] carries the labels of the shipped
//! questionnaire; tests build reduced tables with [`LookupTables::builder`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Budget;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Fallback relationship token.
pub const FALLBACK_RELATIONSHIP: &str = "other";
/// Fallback age range token.
pub const FALLBACK_AGE_RANGE: &str = "unknown";
/// Fallback occasion token.
pub const FALLBACK_OCCASION: &str = "other";
/// Fallback gift style token.
pub const FALLBACK_GIFT_STYLE: &str = "safe_classic";
/// Fallback gender token for a non-empty, unrecognized label.
pub const FALLBACK_GENDER: &str = "unspecified";
/// Budget used when no preset or range is usable.
pub const FALLBACK_BUDGET: Budget = Budget {
    min: 10.0,
    max: 25.0,
};

// ---------------------------------------------------------------------------
// Label normalization
// ---------------------------------------------------------------------------

/// Normalize a display label into a lookup key.
///
/// Trims, lower-cases, folds typographic apostrophes and dashes to ASCII,
/// drops the euro sign and collapses whitespace, so "€10–25" and "10-25"
/// meet on the same key.
pub fn normalize_label(label: &str) -> String {
    let folded: String = label
        .chars()
        .filter(|c| *c != '€')
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '`' => '\'',
            '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
            other => other,
        })
        .collect::<String>()
        .to_lowercase();

    WHITESPACE.replace_all(folded.trim(), " ").into_owned()
}

/// Slug a label that has no table entry: lower-case, runs of
/// non-alphanumeric characters become `_`, edges trimmed.
pub fn slugify(label: &str) -> String {
    let lowered = normalize_label(label);
    NON_ALPHANUMERIC
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

// ---------------------------------------------------------------------------
// LabelTable
// ---------------------------------------------------------------------------

/// One label -> token table with a fallback token.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    entries: HashMap<String, String>,
    fallback: String,
}

impl LabelTable {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Build a table from `(label, token)` pairs.
    pub fn from_pairs(fallback: impl Into<String>, pairs: &[(&str, &str)]) -> Self {
        let mut table = Self::new(fallback);
        for (label, token) in pairs {
            table.insert(label, token);
        }
        table
    }

    pub fn insert(&mut self, label: &str, token: &str) {
        self.entries.insert(normalize_label(label), token.to_string());
    }

    /// Token for `label`, if the table knows it.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(&normalize_label(label)).map(String::as_str)
    }

    /// Token for `label`, or the fallback token.
    pub fn resolve(&self, label: &str) -> &str {
        self.get(label).unwrap_or(self.fallback.as_str())
    }

    /// Token for `label`, or its slug when unknown.
    pub fn resolve_or_slug(&self, label: &str) -> String {
        match self.get(label) {
            Some(token) => token.to_string(),
            None => slugify(label),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

// ---------------------------------------------------------------------------
// BudgetPresets
// ---------------------------------------------------------------------------

/// Named budget presets with a fallback range.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetPresets {
    entries: HashMap<String, Budget>,
    fallback: Budget,
}

impl BudgetPresets {
    pub fn new(fallback: Budget) -> Self {
        Self {
            entries: HashMap::new(),
            fallback: Budget::new(fallback.min, fallback.max),
        }
    }

    /// Register a preset. Bounds go through [`Budget::new`].
    pub fn insert(&mut self, label: &str, min: f64, max: f64) {
        self.entries
            .insert(normalize_label(label), Budget::new(min, max));
    }

    pub fn get(&self, label: &str) -> Option<Budget> {
        self.entries.get(&normalize_label(label)).copied()
    }

    pub fn fallback(&self) -> Budget {
        self.fallback
    }
}

// ---------------------------------------------------------------------------
// LookupTables
// ---------------------------------------------------------------------------

/// Every table the mapper consults.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTables {
    pub relationship: LabelTable,
    pub age_range: LabelTable,
    pub occasion: LabelTable,
    pub gift_style: LabelTable,
    pub personality: LabelTable,
    pub interests: LabelTable,
    pub gender: LabelTable,
    pub budget_presets: BudgetPresets,
}

impl LookupTables {
    /// Start from empty tables with the standard fallback tokens.
    pub fn builder() -> LookupTablesBuilder {
        LookupTablesBuilder {
            tables: Self::empty(),
        }
    }

    fn empty() -> Self {
        Self {
            relationship: LabelTable::new(FALLBACK_RELATIONSHIP),
            age_range: LabelTable::new(FALLBACK_AGE_RANGE),
            occasion: LabelTable::new(FALLBACK_OCCASION),
            gift_style: LabelTable::new(FALLBACK_GIFT_STYLE),
            personality: LabelTable::new(""),
            interests: LabelTable::new(""),
            gender: LabelTable::new(FALLBACK_GENDER),
            budget_presets: BudgetPresets::new(FALLBACK_BUDGET),
        }
    }
}

impl Default for LookupTables {
    /// Tables for the shipped questionnaire. Both the option value and the
    /// rendered label are keys where they differ.
    fn default() -> Self {
        Self::builder()
            .relationships(&[
                ("Teammate", "teammate"),
                ("Manager", "manager"),
                ("Direct report", "direct_report"),
                ("Other colleague", "colleague"),
                ("Colleague / Boss", "colleague"),
                ("Colleague", "colleague"),
                ("Client", "client"),
                ("Friend", "friend"),
                ("Partner", "partner"),
                ("Family member", "family"),
                ("Other", "other"),
            ])
            .age_ranges(&[
                ("18–24", "18_24"),
                ("25–34", "25_34"),
                ("35–44", "35_44"),
                ("45–54", "45_54"),
                ("55+", "55_plus"),
                ("I’m not sure", "unknown"),
            ])
            .occasions(&[
                ("Secret Santa at work", "secret_santa"),
                ("Birthday at work", "birthday"),
                ("Office birthday", "birthday"),
                ("Holiday gift exchange", "holiday_exchange"),
                ("Thank you gift", "thank_you"),
                ("Farewell / Leaving present", "farewell"),
                ("Other", "other"),
            ])
            .gift_styles(&[
                ("Safe & classic", "safe_classic"),
                ("Useful", "useful"),
                ("Fun & playful", "fun_playful"),
                ("Special & thoughtful", "special_thoughtful"),
            ])
            .interests(&[
                ("Coffee & tea", "coffee_tea"),
                ("Office gadgets", "office_gadgets"),
                ("Plants & gardening", "plants_gardening"),
                ("Books & reading", "books_reading"),
                ("Gaming & geeky stuff", "gaming_geeky"),
                ("Tech & gadgets", "tech_gadgets"),
                ("Fitness & sports", "fitness_sports"),
                ("Art & design", "art_design"),
                ("Music", "music"),
                ("Food & snacks", "food_snacks"),
                ("Travel", "travel"),
                ("DIY & crafting", "diy_crafting"),
                ("Pets & animals", "pets_animals"),
            ])
            .personalities(&[
                ("Funny", "funny"),
                ("Creative", "creative"),
                ("Practical", "practical"),
                ("Sporty", "sporty"),
                ("Foodie", "foodie"),
                ("Techie", "techie"),
                ("Outdoorsy", "outdoorsy"),
                ("Homebody", "homebody"),
                ("Organised", "organized"),
                ("Organized", "organized"),
                ("Minimalist", "minimalist"),
            ])
            .genders(&[
                ("Female", "female"),
                ("Male", "male"),
                ("Non-binary", "non_binary"),
                ("Prefer not to say", "unspecified"),
            ])
            .budget_preset("Under 10", 0.0, 10.0)
            .budget_preset("Under €10", 0.0, 10.0)
            .budget_preset("10-25", 10.0, 25.0)
            .budget_preset("25-50", 25.0, 50.0)
            .budget_preset("50-100", 50.0, 100.0)
            .budget_preset("100+", 100.0, 250.0)
            .build()
    }
}

/// Builder for [`LookupTables`].
#[derive(Debug, Clone)]
pub struct LookupTablesBuilder {
    tables: LookupTables,
}

impl LookupTablesBuilder {
    pub fn relationships(mut self, pairs: &[(&str, &str)]) -> Self {
        pairs.iter().for_each(|(l, t)| self.tables.relationship.insert(l, t));
        self
    }

    pub fn age_ranges(mut self, pairs: &[(&str, &str)]) -> Self {
        pairs.iter().for_each(|(l, t)| self.tables.age_range.insert(l, t));
        self
    }

    pub fn occasions(mut self, pairs: &[(&str, &str)]) -> Self {
        pairs.iter().for_each(|(l, t)| self.tables.occasion.insert(l, t));
        self
    }

    pub fn gift_styles(mut self, pairs: &[(&str, &str)]) -> Self {
        pairs.iter().for_each(|(l, t)| self.tables.gift_style.insert(l, t));
        self
    }

    pub fn interests(mut self, pairs: &[(&str, &str)]) -> Self {
        pairs.iter().for_each(|(l, t)| self.tables.interests.insert(l, t));
        self
    }

    pub fn personalities(mut self, pairs: &[(&str, &str)]) -> Self {
        pairs.iter().for_each(|(l, t)| self.tables.personality.insert(l, t));
        self
    }

    pub fn genders(mut self, pairs: &[(&str, &str)]) -> Self {
        pairs.iter().for_each(|(l, t)| self.tables.gender.insert(l, t));
        self
    }

    pub fn budget_preset(mut self, label: &str, min: f64, max: f64) -> Self {
        self.tables.budget_presets.insert(label, min, max);
        self
    }

    /// Replace the fallback budget.
    pub fn fallback_budget(mut self, min: f64, max: f64) -> Self {
        let entries = std::mem::take(&mut self.tables.budget_presets.entries);
        self.tables.budget_presets = BudgetPresets {
            entries,
            fallback: Budget::new(min, max),
        };
        self
    }

    pub fn build(self) -> LookupTables {
        self.tables
    }
}
