//! Confidence propagation shared by the inference modes.

use super::knowledge::FactTable;
use super::matcher::{Binding, Matcher};
use super::rule::Rule;

/// Assumed confidence of a premise the fact table knows nothing about.
pub const UNKNOWN_PREMISE_CONFIDENCE: f64 = 0.5;

/// Plausibility factor for a premise already known to hold.
const KNOWN_TRUE: f64 = 1.0;
/// Plausibility factor for a premise whose negation is known.
const KNOWN_FALSE: f64 = 0.1;
/// Plausibility factor for a premise of unknown truth.
const UNKNOWN: f64 = 0.5;

/// Confidence of `rule`'s conclusion under `binding`.
///
/// Each premise is instantiated and looked up in `facts`; the rule combines
/// those confidences, the result is scaled by the rule's success rate and
/// clamped to `[0, 1]`.
pub fn rule_confidence(
    rule: &Rule,
    binding: &Binding,
    matcher: &dyn Matcher,
    facts: &FactTable,
) -> f64 {
    let premise_confidences: Vec<f64> = rule
        .premises
        .iter()
        .map(|p| {
            facts
                .confidence(&matcher.substitute(p, binding))
                .unwrap_or(UNKNOWN_PREMISE_CONFIDENCE)
        })
        .collect();

    (rule.confidence.combine(&premise_confidences) * rule.success_rate).clamp(0.0, 1.0)
}

/// How believable a candidate premise set is given what is already known.
///
/// Not a confidence: known premises cost nothing, premises whose negation
/// (`¬premise`) is known are heavily penalized, unknown ones halve the score.
pub fn plausibility(premises: &[String], facts: &FactTable) -> f64 {
    premises
        .iter()
        .map(|premise| {
            if facts.contains(premise) {
                KNOWN_TRUE
            } else if facts.contains(&format!("¬{premise}")) {
                KNOWN_FALSE
            } else {
                UNKNOWN
            }
        })
        .product::<f64>()
        .clamp(0.0, 1.0)
}
