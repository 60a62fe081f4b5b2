//! Abduction: rank candidate premise sets that would explain an observation.

use std::sync::Arc;

use super::confidence::plausibility;
use super::knowledge::ReasoningContext;
use super::types::{Explanation, ReasoningMethod, ReasoningResult};

/// Source tag of the effect → cause guess.
pub const CAUSAL_HEURISTIC: &str = "causal_heuristic";
const CAUSAL_CONFIDENCE: f64 = 0.6;
const CAUSAL_PLAUSIBILITY: f64 = 0.7;

/// Conclusion reported when nothing explains the observation.
pub const NO_EXPLANATION: &str = "No explanation found";

impl ReasoningContext {
    /// Find rules whose conclusion matches `observation` and rank their
    /// premises as explanations by `confidence × plausibility`.
    pub fn abductive_reason(&mut self, observation: &str) -> ReasoningResult {
        let rules = Arc::clone(&self.rules);
        let matcher = Arc::clone(&self.matcher);
        let mut explanations = Vec::new();
        let mut steps = Vec::new();

        for rule in rules.rules() {
            let Some(binding) = matcher.unify(&rule.conclusion, observation) else {
                continue;
            };
            let premises: Vec<String> = rule
                .premises
                .iter()
                .map(|p| matcher.substitute(p, &binding))
                .collect();
            let plausibility = plausibility(&premises, &self.facts);

            steps.push(format!(
                "Candidate via {}: {} (plausibility {plausibility:.2})",
                rule.id,
                premises.join(" ∧ ")
            ));
            explanations.push(Explanation {
                source: rule.id.clone(),
                premises,
                confidence: rule.confidence.nominal(),
                plausibility,
            });
        }

        if observation.contains("effect") {
            let cause = observation.replacen("effect", "cause", 1);
            steps.push(format!("Causal guess: {cause}"));
            explanations.push(Explanation {
                source: CAUSAL_HEURISTIC.to_string(),
                premises: vec![cause],
                confidence: CAUSAL_CONFIDENCE,
                plausibility: CAUSAL_PLAUSIBILITY,
            });
        }

        // Stable: ties keep insertion order.
        explanations.sort_by(|a, b| {
            b.score()
                .partial_cmp(&a.score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let Some(best) = explanations.first() else {
            steps.push(format!("No rule concludes: {observation}"));
            return ReasoningResult {
                conclusion: NO_EXPLANATION.to_string(),
                found: false,
                confidence: 0.0,
                steps,
                method: ReasoningMethod::Abductive,
                explanations,
            };
        };

        let conclusion = best.premises.join(" ∧ ");
        let confidence = best.score().clamp(0.0, 1.0);
        steps.push(format!("Best explanation: {conclusion} (score {confidence:.2})"));

        ReasoningResult {
            conclusion,
            found: true,
            confidence,
            steps,
            method: ReasoningMethod::Abductive,
            explanations,
        }
    }
}
