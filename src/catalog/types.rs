//! Catalog entry types
//!
//! Providers, models and interaction definitions are read once at startup
//! and never change for the lifetime of the process.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MODEL_SENTINEL;

/// Model pricing entry (prices are per 1000 tokens, USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Model {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) input_cost_per_1k: f64,
    pub(crate) output_cost_per_1k: f64,
    /// Flat price per request/unit (image models)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) per_unit_cost: Option<f64>,
}

impl Model {
    /// Positive per-unit price, if this model is billed per unit instead of per token
    pub(crate) fn unit_price(&self) -> Option<f64> {
        self.per_unit_cost.filter(|&price| price > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Provider {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) models: Vec<Model>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Audience {
    User,
    Admin,
    Both,
}

impl Audience {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Audience::User => "user",
            Audience::Admin => "admin",
            Audience::Both => "both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Cadence {
    Daily,
    Monthly,
}

impl Cadence {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct UsageProfile {
    pub(crate) cadence: Cadence,
    pub(crate) default_request_count: u64,
    pub(crate) default_active_user_count: u64,
}

/// Inclusive token range for a single request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct TokenRange {
    pub(crate) min: f64,
    pub(crate) max: f64,
}

impl TokenRange {
    pub(crate) fn new(min: f64, max: f64) -> Self {
        TokenRange { min, max }
    }

    /// Finite, non-negative and ordered
    pub(crate) fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }

    pub(crate) fn offset(self, by: f64) -> Self {
        TokenRange {
            min: self.min + by,
            max: self.max + by,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct TokenProfile {
    /// Fixed overhead added to every request's input (e.g. system prompt)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) base_tokens: Option<f64>,
    pub(crate) input: TokenRange,
    pub(crate) output: TokenRange,
}

/// Which model an interaction uses: the global default or a specific one
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub(crate) enum ModelSelection {
    #[default]
    Default,
    Specific(String),
}

impl ModelSelection {
    pub(crate) fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == DEFAULT_MODEL_SENTINEL {
            ModelSelection::Default
        } else {
            ModelSelection::Specific(trimmed.to_string())
        }
    }

    /// Concrete model id, substituting the global default when needed
    pub(crate) fn resolve<'a>(&'a self, default_model_id: &'a str) -> &'a str {
        match self {
            ModelSelection::Default => default_model_id,
            ModelSelection::Specific(id) => id,
        }
    }
}

impl From<String> for ModelSelection {
    fn from(raw: String) -> Self {
        ModelSelection::parse(&raw)
    }
}

impl From<ModelSelection> for String {
    fn from(selection: ModelSelection) -> Self {
        match selection {
            ModelSelection::Default => DEFAULT_MODEL_SENTINEL.to_string(),
            ModelSelection::Specific(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct InteractionDefinition {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) default_model_id: ModelSelection,
    pub(crate) audience: Audience,
    pub(crate) usage: UsageProfile,
    pub(crate) token_profile: TokenProfile,
    /// Models the edit surface accepts for this interaction (empty = any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) allowed_models: Vec<String>,
}

impl InteractionDefinition {
    pub(crate) fn allows_model(&self, model_id: &str) -> bool {
        self.allowed_models.is_empty() || self.allowed_models.iter().any(|m| m == model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_selection_parses_sentinel_and_empty() {
        assert_eq!(ModelSelection::parse("default"), ModelSelection::Default);
        assert_eq!(ModelSelection::parse(""), ModelSelection::Default);
        assert_eq!(ModelSelection::parse("  "), ModelSelection::Default);
        assert_eq!(
            ModelSelection::parse("gpt-4o"),
            ModelSelection::Specific("gpt-4o".to_string())
        );
    }

    #[test]
    fn model_selection_serializes_as_string() {
        let json = serde_json::to_string(&ModelSelection::Default).unwrap();
        assert_eq!(json, "\"default\"");
        let json = serde_json::to_string(&ModelSelection::Specific("x".into())).unwrap();
        assert_eq!(json, "\"x\"");
        let back: ModelSelection = serde_json::from_str("\"\"").unwrap();
        assert_eq!(back, ModelSelection::Default);
    }

    #[test]
    fn model_selection_resolve_substitutes_default() {
        assert_eq!(ModelSelection::Default.resolve("gpt-4o"), "gpt-4o");
        let specific = ModelSelection::Specific("claude-3-5-haiku".into());
        assert_eq!(specific.resolve("gpt-4o"), "claude-3-5-haiku");
    }

    #[test]
    fn unit_price_ignores_zero() {
        let mut model = Model {
            id: "m".into(),
            name: "M".into(),
            input_cost_per_1k: 0.01,
            output_cost_per_1k: 0.03,
            per_unit_cost: Some(0.0),
        };
        assert_eq!(model.unit_price(), None);
        model.per_unit_cost = Some(0.04);
        assert_eq!(model.unit_price(), Some(0.04));
    }

    #[test]
    fn token_range_validity() {
        assert!(TokenRange::new(0.0, 0.0).is_valid());
        assert!(TokenRange::new(10.0, 20.0).is_valid());
        assert!(!TokenRange::new(20.0, 10.0).is_valid());
        assert!(!TokenRange::new(-1.0, 10.0).is_valid());
        assert!(!TokenRange::new(0.0, f64::INFINITY).is_valid());
        assert!(!TokenRange::new(f64::NAN, f64::NAN).is_valid());
    }
}
