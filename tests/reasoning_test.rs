use noesis::reasoning::abductive::NO_EXPLANATION;
use noesis::reasoning::{
    Reasoner, ReasoningError, ReasoningMethod, ReasoningRequest, Rule, RuleBase,
};

fn request(premises: &[&str], goal: &str, method: &str) -> ReasoningRequest {
    ReasoningRequest {
        premises: premises.iter().map(|p| p.to_string()).collect(),
        goal: goal.to_string(),
        method: method.parse().unwrap(),
    }
}

fn chain_rules() -> RuleBase {
    let mut rules = RuleBase::empty();
    rules.add(Rule::new("a_b", &["a"], "b", 0.9));
    rules.add(Rule::new("b_c", &["b"], "c", 0.8));
    rules.add(Rule::new("c_d", &["c"], "d", 0.5));
    rules
}

#[test]
fn unknown_method_is_an_error() {
    let err = "inductive".parse::<ReasoningMethod>().unwrap_err();
    assert_eq!(err, ReasoningError::UnknownMethod("inductive".into()));
    assert!(err.to_string().contains("forward, backward, abductive"));
}

#[test]
fn forward_scenario_from_single_premise() {
    let mut reasoner = Reasoner::with_rules(RuleBase::empty());
    reasoner.add_rule(Rule::new("p_implies_q", &["P"], "Q", 0.95));

    let result = reasoner.reason(&request(&["P"], "Q", "forward")).unwrap();
    assert!(result.found);
    assert_eq!(result.conclusion, "Q");
    assert!((result.confidence - 0.95).abs() < 1e-9);
    assert_eq!(result.method, ReasoningMethod::Forward);
}

#[test]
fn forward_chains_through_several_rules() {
    let mut reasoner = Reasoner::with_rules(chain_rules());
    let result = reasoner.reason(&request(&["a"], "d", "forward")).unwrap();

    assert!(result.found);
    // 0.9 → 0.9 × 0.8 → 0.72 × 0.5
    assert!((result.confidence - 0.36).abs() < 1e-9);
    assert!(result.steps.iter().any(|s| s.contains("Applied a_b")));
    assert!(result.steps.iter().any(|s| s.contains("Applied c_d")));

    let stats = reasoner.stats();
    for rule in &stats.rule_statistics {
        assert_eq!(rule.usage_count, 1, "rule {} should fire once", rule.id);
    }
}

#[test]
fn forward_reaches_fixed_point_without_goal() {
    let mut reasoner = Reasoner::with_rules(chain_rules());
    let result = reasoner.reason(&request(&["a"], "z", "forward")).unwrap();

    assert!(!result.found);
    assert_eq!(result.confidence, 0.0);
    assert!(result.steps.iter().any(|s| s.contains("Fixed point")));
    // everything derivable stays derived
    for fact in ["a", "b", "c", "d"] {
        assert!(reasoner.facts().contains(fact));
    }
}

#[test]
fn forward_with_variable_rule() {
    let mut reasoner = Reasoner::with_rules(RuleBase::empty());
    reasoner.add_rule(Rule::new("observed", &["?x"], "?x is observed", 0.7));

    let result = reasoner
        .reason(&request(&["rain"], "rain is observed", "forward"))
        .unwrap();
    assert!(result.found);
    assert!((result.confidence - 0.7).abs() < 1e-9);
}

#[test]
fn forward_with_self_feeding_variable_rule_terminates() {
    let mut reasoner = Reasoner::with_rules(RuleBase::empty());
    reasoner.add_rule(Rule::new("grow", &["?x"], "?x again", 0.99));

    let result = reasoner.reason(&request(&["x"], "never", "forward")).unwrap();
    assert!(!result.found);
    assert!((0.0..=1.0).contains(&result.confidence));
    assert!(reasoner.facts().len() > 1);
}

#[test]
fn forward_matches_every_fact_in_large_sets() {
    let mut reasoner = Reasoner::with_rules(RuleBase::empty());
    reasoner.add_rule(Rule::new("trigger", &["?x", "trigger"], "?x triggered", 0.9));

    let mut premises: Vec<String> = (0..=1_000).map(|i| format!("f{i}")).collect();
    premises.push("trigger".into());
    let request = ReasoningRequest {
        premises,
        goal: "f1000 triggered".into(),
        method: ReasoningMethod::Forward,
    };

    let result = reasoner.reason(&request).unwrap();
    assert!(result.found);
    assert!((result.confidence - 0.9).abs() < 1e-9);
    assert!(!result.steps.iter().any(|s| s.contains("Fixed point")));
}

#[test]
fn leading_variable_conclusion_matches_in_backward_and_abductive() {
    let mut rules = RuleBase::empty();
    rules.add(Rule::new("rain_wets", &["rain fell"], "?x is wet", 0.8));
    let mut reasoner = Reasoner::with_rules(rules);

    let backward = reasoner
        .reason(&request(&["rain fell"], "grass is wet", "backward"))
        .unwrap();
    assert!(backward.found);
    assert!((backward.confidence - 0.8).abs() < 1e-9);

    let abductive = reasoner
        .reason(&request(&[], "grass is wet", "abductive"))
        .unwrap();
    assert_eq!(abductive.explanations[0].source, "rain_wets");
    assert_eq!(abductive.explanations[0].premises, vec!["rain fell"]);
}

#[test]
fn backward_proves_chain() {
    let mut reasoner = Reasoner::with_rules(chain_rules());
    let result = reasoner.reason(&request(&["a"], "c", "backward")).unwrap();

    assert!(result.found);
    // min(1.0) × 0.9 = 0.9, then × 0.8
    assert!((result.confidence - 0.72).abs() < 1e-9);
    assert_eq!(result.conclusion, "c");
}

#[test]
fn backward_unreachable_goal() {
    let mut reasoner = Reasoner::new();
    let result = reasoner
        .reason(&request(&[], "The moon is cheese", "backward"))
        .unwrap();
    assert!(!result.found);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.conclusion, "The moon is cheese");
}

#[test]
fn backward_does_not_loop_on_cycles() {
    let mut rules = RuleBase::empty();
    rules.add(Rule::new("x_y", &["x"], "y", 0.9));
    rules.add(Rule::new("y_x", &["y"], "x", 0.9));
    let mut reasoner = Reasoner::with_rules(rules);

    let result = reasoner.reason(&request(&[], "y", "backward")).unwrap();
    assert!(!result.found);
}

#[test]
fn abductive_scenario_without_explanation() {
    let mut reasoner = Reasoner::new();
    let result = reasoner
        .reason(&request(&["The grass is wet"], "It rained", "abductive"))
        .unwrap();

    assert!(!result.found);
    assert_eq!(result.conclusion, NO_EXPLANATION);
    assert_eq!(result.confidence, 0.0);
    assert!(result.explanations.is_empty());
}

#[test]
fn abductive_ranks_explanations() {
    let mut rules = RuleBase::empty();
    rules.add(Rule::new("rain", &["it rained"], "grass is wet", 0.9));
    rules.add(Rule::new("sprinkler", &["sprinkler ran"], "grass is wet", 0.6));
    rules.add(Rule::new("dew", &["cold night", "humid air"], "grass is wet", 0.8));
    let mut reasoner = Reasoner::with_rules(rules);

    let result = reasoner
        .reason(&request(&["sprinkler ran", "¬it rained"], "grass is wet", "abductive"))
        .unwrap();

    assert!(result.found);
    let scores: Vec<f64> = result.explanations.iter().map(|e| e.score()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));

    // sprinkler: 0.6 × 1.0; dew: 0.8 × 0.25; rain: 0.9 × 0.1
    assert_eq!(result.explanations[0].source, "sprinkler");
    assert_eq!(result.conclusion, "sprinkler ran");
    assert!((result.confidence - 0.6).abs() < 1e-9);
    assert_eq!(result.explanations[2].source, "rain");
}

#[test]
fn abductive_binds_variable_conclusion() {
    let mut reasoner = Reasoner::with_rules(RuleBase::empty());
    reasoner.add_rule(Rule::new("cause_of", &["cause of ?o"], "?o", 0.5));

    let result = reasoner
        .reason(&request(&[], "wet grass", "abductive"))
        .unwrap();
    assert_eq!(result.explanations[0].premises, vec!["cause of wet grass"]);
}

#[test]
fn abductive_causal_heuristic() {
    let mut reasoner = Reasoner::with_rules(RuleBase::empty());
    let result = reasoner
        .reason(&request(&[], "the side effect appeared", "abductive"))
        .unwrap();

    assert!(result.found);
    assert_eq!(result.explanations.len(), 1);
    assert_eq!(result.explanations[0].premises, vec!["the side cause appeared"]);
    assert!((result.explanations[0].confidence - 0.6).abs() < 1e-9);
    assert!((result.explanations[0].plausibility - 0.7).abs() < 1e-9);
}

#[test]
fn repeated_fact_overwrites() {
    let mut reasoner = Reasoner::new();
    reasoner.add_fact("f", 0.4);
    reasoner.add_fact("f", 0.8);
    assert_eq!(reasoner.facts().len(), 1);
    assert_eq!(reasoner.facts().confidence("f"), Some(0.8));
}

#[test]
fn every_result_confidence_is_bounded() {
    let mut reasoner = Reasoner::new();
    for method in ["forward", "backward", "abductive"] {
        for goal in ["Q", "¬P", "P → R", "H", "nothing here"] {
            let result = reasoner
                .reason(&request(
                    &["P", "P → Q", "Q → R", "E", "E supports H", "¬Q"],
                    goal,
                    method,
                ))
                .unwrap();
            assert!(
                (0.0..=1.0).contains(&result.confidence),
                "{method} {goal}: {}",
                result.confidence
            );
        }
    }
}
