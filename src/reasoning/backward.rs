//! Backward chaining: depth-bounded, goal-directed search.

use std::collections::HashSet;
use std::sync::Arc;

use super::knowledge::ReasoningContext;
use super::types::{ReasoningMethod, ReasoningResult};

impl ReasoningContext {
    /// Try to establish `goal` by recursively satisfying rule premises.
    ///
    /// Known limitations:
    /// - the visited set spans the whole search tree, so a sub-goal needed by
    ///   two branches only succeeds the first time;
    /// - the first rule whose premises are all satisfied wins, with no
    ///   backtracking into alternatives.
    pub fn backward_chain(&mut self, goal: &str) -> ReasoningResult {
        let mut visited = HashSet::new();
        let mut steps = Vec::new();

        match self.search(goal, 0, &mut visited, &mut steps) {
            Some(confidence) => ReasoningResult {
                conclusion: goal.to_string(),
                found: true,
                confidence,
                steps,
                method: ReasoningMethod::Backward,
                explanations: Vec::new(),
            },
            None => {
                steps.push(format!("Could not establish: {goal}"));
                ReasoningResult {
                    conclusion: goal.to_string(),
                    found: false,
                    confidence: 0.0,
                    steps,
                    method: ReasoningMethod::Backward,
                    explanations: Vec::new(),
                }
            }
        }
    }

    fn search(
        &mut self,
        goal: &str,
        depth: usize,
        visited: &mut HashSet<String>,
        steps: &mut Vec<String>,
    ) -> Option<f64> {
        let indent = "  ".repeat(depth);

        if depth > self.limits.max_depth {
            steps.push(format!("{indent}Depth limit reached at: {goal}"));
            return None;
        }
        if !visited.insert(goal.to_string()) {
            steps.push(format!("{indent}Already visited: {goal}"));
            return None;
        }

        if let Some(confidence) = self.facts.confidence(goal) {
            steps.push(format!("{indent}Known fact: {goal} ({confidence:.2})"));
            return Some(confidence);
        }

        steps.push(format!("{indent}Seeking: {goal} (depth {depth})"));

        let rules = Arc::clone(&self.rules);
        let matcher = Arc::clone(&self.matcher);

        'rules: for rule in rules.rules() {
            let Some(binding) = matcher.unify(&rule.conclusion, goal) else {
                continue;
            };
            tracing::debug!(rule = %rule.id, goal = %goal, depth, "trying rule");

            let mut confidences = Vec::with_capacity(rule.premises.len());
            for premise in &rule.premises {
                let sub_goal = matcher.substitute(premise, &binding);
                match self.search(&sub_goal, depth + 1, visited, steps) {
                    Some(c) => confidences.push(c),
                    None => continue 'rules,
                }
            }

            let confidence = rule.confidence.combine(&confidences).clamp(0.0, 1.0);
            steps.push(format!(
                "{indent}Established {goal} via {} (confidence {confidence:.2})",
                rule.id
            ));
            return Some(confidence);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::knowledge::{FactTable, ReasoningLimits, RuleBase};
    use crate::reasoning::rule::Rule;

    fn context(rules: Vec<Rule>, facts: &[(&str, f64)]) -> ReasoningContext {
        let mut base = RuleBase::empty();
        for rule in rules {
            base.add(rule);
        }
        let mut table = FactTable::new();
        for (fact, confidence) in facts {
            table.insert(*fact, *confidence);
        }
        ReasoningContext::new(Arc::new(base), table)
    }

    #[test]
    fn known_fact_succeeds_immediately() {
        let mut ctx = context(vec![], &[("sun is up", 0.8)]);
        let result = ctx.backward_chain("sun is up");
        assert!(result.found);
        assert!((result.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn unreachable_goal_fails_without_recursing() {
        let mut ctx = context(vec![Rule::new("r", &["a"], "b", 0.9)], &[]);
        let result = ctx.backward_chain("unrelated");
        assert!(!result.found);
        assert_eq!(result.confidence, 0.0);
        // Only the top-level goal was ever sought
        let sought = result.steps.iter().filter(|s| s.contains("Seeking")).count();
        assert_eq!(sought, 1);
        assert!(result.steps.iter().all(|s| !s.starts_with("  ")));
    }

    #[test]
    fn recursive_premises_combine_confidence() {
        let mut ctx = context(
            vec![
                Rule::new("wet", &["rain", "outside"], "wet", 0.9),
                Rule::new("rain", &["clouds"], "rain", 0.5),
            ],
            &[("clouds", 1.0), ("outside", 0.8)],
        );
        let result = ctx.backward_chain("wet");
        assert!(result.found);
        // rain = 0.5 × 1.0; wet = 0.9 × min(0.5, 0.8)
        assert!((result.confidence - 0.45).abs() < 1e-9);
    }

    #[test]
    fn first_satisfiable_rule_wins() {
        let mut ctx = context(
            vec![
                Rule::new("weak", &["a"], "goal", 0.3),
                Rule::new("strong", &["a"], "goal", 0.9),
            ],
            &[("a", 1.0)],
        );
        let result = ctx.backward_chain("goal");
        assert!(result.found);
        assert!((result.confidence - 0.3).abs() < 1e-9);
    }

    #[test]
    fn visited_set_blocks_cycles() {
        let mut ctx = context(
            vec![
                Rule::new("a_from_b", &["b"], "a", 1.0),
                Rule::new("b_from_a", &["a"], "b", 1.0),
            ],
            &[],
        );
        let result = ctx.backward_chain("a");
        assert!(!result.found);
        assert!(result.steps.iter().any(|s| s.contains("Already visited: a")));
    }

    #[test]
    fn depth_cap_bounds_long_chains() {
        let rules: Vec<Rule> = (0..20)
            .map(|i| {
                let next = format!("g{}", i + 1);
                Rule::new(format!("r{i}"), &[next.as_str()], format!("g{i}"), 1.0)
            })
            .collect();
        let mut ctx = context(rules, &[("g20", 1.0)]).with_limits(ReasoningLimits {
            max_iterations: 100,
            max_depth: 10,
        });
        let result = ctx.backward_chain("g0");
        assert!(!result.found);
        assert!(result.steps.iter().any(|s| s.contains("Depth limit")));
    }

    #[test]
    fn variable_conclusion_instantiates_premises() {
        let mut ctx = context(vec![Rule::new("echo", &["?x"], "?x", 0.5)], &[]);
        // "?x" unifies with any goal; its premise becomes the goal itself,
        // which the visited set rejects.
        let result = ctx.backward_chain("anything");
        assert!(!result.found);
    }
}
