//! Inference rules and the built-in rule set.
//!
//! A [`Rule`] pairs an ordered list of premise patterns with a conclusion
//! pattern. Patterns are plain strings; a pattern that is a single `?`-prefixed
//! token is a variable (see [`super::matcher`]).

use serde::Serialize;

/// Combines the confidences of a rule's instantiated premises into one value.
pub type ConfidenceFn = fn(&[f64]) -> f64;

/// How a rule turns premise confidences into a conclusion confidence.
#[derive(Debug, Clone, Copy)]
pub enum RuleConfidence {
    /// Fixed base confidence, multiplied by the weakest premise.
    Static(f64),
    /// Custom combination over all premise confidences.
    Computed(ConfidenceFn),
}

impl RuleConfidence {
    /// Confidence of the conclusion given the confidences of its premises.
    ///
    /// `Static(c)` yields `c × min(premises)`; with no premises the minimum is 1.0.
    pub fn combine(&self, premise_confidences: &[f64]) -> f64 {
        match self {
            Self::Static(base) => {
                let weakest = premise_confidences.iter().copied().fold(1.0, f64::min);
                base * weakest
            }
            Self::Computed(f) => f(premise_confidences),
        }
    }

    /// The confidence the rule carries on its own, assuming certain premises.
    pub fn nominal(&self) -> f64 {
        match self {
            Self::Static(base) => *base,
            Self::Computed(f) => f(&[1.0]),
        }
        .clamp(0.0, 1.0)
    }
}

/// An inference rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub premises: Vec<String>,
    pub conclusion: String,
    pub confidence: RuleConfidence,
    /// Historical success multiplier. Nothing adjusts it yet; it stays 1.0.
    pub success_rate: f64,
}

impl Rule {
    /// A rule with a static base confidence.
    pub fn new(
        id: impl Into<String>,
        premises: &[&str],
        conclusion: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            premises: premises.iter().map(|p| p.to_string()).collect(),
            conclusion: conclusion.into(),
            confidence: RuleConfidence::Static(confidence.clamp(0.0, 1.0)),
            success_rate: 1.0,
        }
    }

    /// A rule whose conclusion confidence is computed from all premise confidences.
    pub fn computed(
        id: impl Into<String>,
        premises: &[&str],
        conclusion: impl Into<String>,
        combine: ConfidenceFn,
    ) -> Self {
        Self {
            id: id.into(),
            premises: premises.iter().map(|p| p.to_string()).collect(),
            conclusion: conclusion.into(),
            confidence: RuleConfidence::Computed(combine),
            success_rate: 1.0,
        }
    }
}

/// Per-rule usage summary reported by `Reasoner::stats`.
#[derive(Debug, Clone, Serialize)]
pub struct RuleStatistics {
    pub id: String,
    pub confidence: f64,
    pub usage_count: u64,
    pub success_rate: f64,
}

fn probabilistic_support(premise_confidences: &[f64]) -> f64 {
    premise_confidences.iter().product::<f64>() * 0.8
}

/// The schematic rules every engine starts with.
///
/// They are literal (no variables), so they only fire when the caller asserts
/// the schematic symbols themselves.
pub fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::new("modus_ponens", &["P", "P → Q"], "Q", 0.95),
        Rule::new("modus_tollens", &["¬Q", "P → Q"], "¬P", 0.90),
        Rule::new("hypothetical_syllogism", &["P → Q", "Q → R"], "P → R", 0.85),
        Rule::new("disjunctive_syllogism", &["P ∨ Q", "¬P"], "Q", 0.90),
        Rule::new("conjunction_elimination", &["P ∧ Q"], "P", 1.0),
        Rule::computed(
            "probabilistic_support",
            &["E", "E supports H"],
            "H",
            probabilistic_support,
        ),
    ]
}
