//! Knowledge base state: facts, rules, and the per-call reasoning context.
//!
//! Rules are shared and immutable once handed to a [`ReasoningContext`].
//! Facts are owned by the context, so each `reason()` call works on its own
//! copy and the engine decides afterwards whether to keep what was derived.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::matcher::{Matcher, PatternMatcher};
use super::rule::{builtin_rules, Rule};

/// Forward-chaining pass cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
/// Backward-chaining recursion cap.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Asserted propositions with their confidence, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FactTable {
    order: Vec<String>,
    confidence: HashMap<String, f64>,
}

impl FactTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a fact. Returns `true` if the fact was new.
    pub fn insert(&mut self, fact: impl Into<String>, confidence: f64) -> bool {
        let fact = fact.into();
        let confidence = confidence.clamp(0.0, 1.0);
        if let Some(existing) = self.confidence.get_mut(&fact) {
            *existing = confidence;
            return false;
        }
        self.order.push(fact.clone());
        self.confidence.insert(fact, confidence);
        true
    }

    pub fn contains(&self, fact: &str) -> bool {
        self.confidence.contains_key(fact)
    }

    pub fn confidence(&self, fact: &str) -> Option<f64> {
        self.confidence.get(fact).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Fact texts in insertion order.
    pub fn texts(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.order
            .iter()
            .map(|f| (f.as_str(), self.confidence.get(f).copied().unwrap_or(0.0)))
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.confidence.clear();
    }
}

/// The registered rules. Registering an id twice replaces the earlier rule.
#[derive(Debug, Clone, Default)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A rule base holding the built-in schematic rules.
    pub fn builtin() -> Self {
        let mut base = Self::empty();
        for rule in builtin_rules() {
            base.add(rule);
        }
        base
    }

    pub fn add(&mut self, rule: Rule) {
        match self.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(slot) => *slot = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Safety valves against non-terminating inference.
#[derive(Debug, Clone, Copy)]
pub struct ReasoningLimits {
    pub max_iterations: usize,
    pub max_depth: usize,
}

impl Default for ReasoningLimits {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Working state for one inference run.
///
/// All three chainers operate on the same context, so within one call they
/// see the same fact set.
pub struct ReasoningContext {
    pub(crate) rules: Arc<RuleBase>,
    pub(crate) facts: FactTable,
    pub(crate) matcher: Arc<dyn Matcher>,
    pub(crate) limits: ReasoningLimits,
    firings: BTreeMap<String, u64>,
}

impl ReasoningContext {
    /// A context over `rules` with the default matcher and limits.
    pub fn new(rules: Arc<RuleBase>, facts: FactTable) -> Self {
        Self {
            rules,
            facts,
            matcher: Arc::new(PatternMatcher),
            limits: ReasoningLimits::default(),
            firings: BTreeMap::new(),
        }
    }

    pub fn with_limits(mut self, limits: ReasoningLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_matcher(mut self, matcher: Arc<dyn Matcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn add_fact(&mut self, fact: impl Into<String>, confidence: f64) -> bool {
        self.facts.insert(fact, confidence)
    }

    pub fn facts(&self) -> &FactTable {
        &self.facts
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// How many times each rule fired in this context.
    pub fn firings(&self) -> &BTreeMap<String, u64> {
        &self.firings
    }

    pub(crate) fn record_firing(&mut self, rule_id: &str) {
        *self.firings.entry(rule_id.to_string()).or_insert(0) += 1;
    }

    /// Consume the context, returning its facts and rule firing counts.
    pub fn into_parts(self) -> (FactTable, BTreeMap<String, u64>) {
        (self.facts, self.firings)
    }
}
