//! Forward chaining: saturate the fact set until the goal appears.

use std::sync::Arc;

use super::confidence::rule_confidence;
use super::knowledge::ReasoningContext;
use super::matcher::match_premises;
use super::types::{ReasoningMethod, ReasoningResult};

/// Whether a derived conclusion establishes the goal.
///
/// Exact string equality; no partial or semantic entailment.
pub fn entails(conclusion: &str, goal: &str) -> bool {
    conclusion == goal
}

impl ReasoningContext {
    /// Apply every rule repeatedly until the goal is derived, no new fact
    /// appears in a full pass, or the iteration cap is reached.
    ///
    /// Derived facts are added to this context and never removed.
    pub fn forward_chain(&mut self, goal: &str) -> ReasoningResult {
        let rules = Arc::clone(&self.rules);
        let matcher = Arc::clone(&self.matcher);
        let mut steps = Vec::new();

        for iteration in 1..=self.limits.max_iterations {
            let mut added = 0usize;

            for rule in rules.rules() {
                let snapshot: Vec<String> =
                    self.facts.texts().into_iter().map(str::to_string).collect();
                let fact_refs: Vec<&str> = snapshot.iter().map(String::as_str).collect();

                for binding in match_premises(matcher.as_ref(), &rule.premises, &fact_refs) {
                    let conclusion = matcher.substitute(&rule.conclusion, &binding);
                    if self.facts.contains(&conclusion) {
                        continue;
                    }

                    let confidence =
                        rule_confidence(rule, &binding, matcher.as_ref(), &self.facts);
                    let premises: Vec<String> = rule
                        .premises
                        .iter()
                        .map(|p| matcher.substitute(p, &binding))
                        .collect();

                    self.facts.insert(conclusion.clone(), confidence);
                    self.record_firing(&rule.id);
                    added += 1;

                    tracing::debug!(rule = %rule.id, conclusion = %conclusion, confidence, "rule fired");
                    steps.push(format!(
                        "Applied {}: {} ⇒ {} (confidence {:.2})",
                        rule.id,
                        premises.join(" ∧ "),
                        conclusion,
                        confidence
                    ));

                    if entails(&conclusion, goal) {
                        steps.push(format!("Goal reached in iteration {iteration}"));
                        return ReasoningResult {
                            conclusion,
                            found: true,
                            confidence,
                            steps,
                            method: ReasoningMethod::Forward,
                            explanations: Vec::new(),
                        };
                    }
                }
            }

            if added == 0 {
                steps.push(format!("Fixed point reached after {iteration} iteration(s)"));
                break;
            }
        }

        let found = self.facts.contains(goal);
        if found {
            steps.push(format!("Goal already known: {goal}"));
        }

        ReasoningResult {
            conclusion: goal.to_string(),
            found,
            confidence: self.facts.confidence(goal).unwrap_or(0.0),
            steps,
            method: ReasoningMethod::Forward,
            explanations: Vec::new(),
        }
    }
}
