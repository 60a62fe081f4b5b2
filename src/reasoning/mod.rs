//! Symbolic inference core: forward, backward, and abductive chaining with
//! confidence propagation.
//!
//! [`Reasoner`] owns the registered rules, the asserted facts, rule usage
//! counts, and the in-process session history. Every [`Reasoner::reason`] call
//! runs in its own [`ReasoningContext`] seeded from the engine's facts plus the
//! request's premises; the context's facts are merged back afterwards unless
//! fact persistence is turned off.

pub mod abductive;
pub mod backward;
pub mod confidence;
pub mod error;
pub mod forward;
pub mod knowledge;
pub mod matcher;
pub mod rule;
pub mod types;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::config::ReasoningConfig;
pub use error::ReasoningError;
pub use knowledge::{FactTable, ReasoningContext, ReasoningLimits, RuleBase};
pub use rule::{Rule, RuleConfidence, RuleStatistics};
pub use types::{
    Explanation, ReasoningMethod, ReasoningRequest, ReasoningResult, ReasoningSession,
};

/// Snapshot returned by [`Reasoner::stats`].
#[derive(Debug, Clone, Serialize)]
pub struct ReasoningStats {
    pub total_rules: usize,
    pub total_facts: usize,
    pub reasoning_sessions: usize,
    pub rule_statistics: Vec<RuleStatistics>,
}

/// A reasoning engine instance.
///
/// Not reentrant: `reason` takes `&mut self`, so a shared engine must sit
/// behind a lock. Give each tenant its own engine if they must not see each
/// other's facts.
pub struct Reasoner {
    rules: Arc<RuleBase>,
    facts: FactTable,
    usage: HashMap<String, u64>,
    history: Vec<ReasoningSession>,
    limits: ReasoningLimits,
    persist_facts: bool,
}

impl Default for Reasoner {
    fn default() -> Self {
        Self::with_rules(RuleBase::builtin())
    }
}

impl Reasoner {
    /// An engine with the built-in rules and default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleBase) -> Self {
        Self {
            rules: Arc::new(rules),
            facts: FactTable::new(),
            usage: HashMap::new(),
            history: Vec::new(),
            limits: ReasoningLimits::default(),
            persist_facts: true,
        }
    }

    pub fn from_config(config: &ReasoningConfig) -> Self {
        let mut reasoner = Self::new();
        reasoner.limits = ReasoningLimits {
            max_iterations: config.max_forward_iterations,
            max_depth: config.max_backward_depth,
        };
        reasoner.persist_facts = config.persist_facts;
        reasoner
    }

    /// Register a rule. An existing rule with the same id is replaced.
    pub fn add_rule(&mut self, rule: Rule) {
        Arc::make_mut(&mut self.rules).add(rule);
    }

    /// Assert a fact, overwriting any earlier confidence for the same text.
    pub fn add_fact(&mut self, fact: impl Into<String>, confidence: f64) {
        self.facts.insert(fact, confidence);
    }

    pub fn facts(&self) -> &FactTable {
        &self.facts
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// A context seeded with the engine's current facts. It owns a copy, so
    /// nothing derived in it reaches the engine unless the caller merges it.
    pub fn context(&self) -> ReasoningContext {
        ReasoningContext::new(Arc::clone(&self.rules), self.facts.clone()).with_limits(self.limits)
    }


    /// Run one reasoning request and append it to the session history.
    pub fn reason(&mut self, request: &ReasoningRequest) -> Result<ReasoningResult, ReasoningError> {
        let goal = request.goal.trim();
        if goal.is_empty() {
            return Err(ReasoningError::EmptyGoal);
        }

        tracing::info!(
            method = %request.method,
            premises = request.premises.len(),
            goal = %goal,
            "reasoning"
        );

        let mut ctx = self.context();
        for premise in &request.premises {
            ctx.add_fact(premise.as_str(), 1.0);
        }

        let result = match request.method {
            ReasoningMethod::Forward => ctx.forward_chain(goal),
            ReasoningMethod::Backward => ctx.backward_chain(goal),
            ReasoningMethod::Abductive => ctx.abductive_reason(goal),
        };

        let (facts, firings) = ctx.into_parts();
        for (rule_id, count) in firings {
            *self.usage.entry(rule_id).or_insert(0) += count;
        }
        if self.persist_facts {
            self.facts = facts;
        }

        tracing::info!(
            found = result.found,
            confidence = result.confidence,
            steps = result.steps.len(),
            "reasoning complete"
        );

        self.history.push(ReasoningSession {
            premises: request.premises.clone(),
            goal: goal.to_string(),
            method: request.method,
            result: result.clone(),
            timestamp: chrono::Utc::now(),
        });

        Ok(result)
    }

    /// In-process history, oldest first.
    pub fn history(&self) -> &[ReasoningSession] {
        &self.history
    }

    pub fn last_session(&self) -> Option<&ReasoningSession> {
        self.history.last()
    }

    pub fn usage_count(&self, rule_id: &str) -> u64 {
        self.usage.get(rule_id).copied().unwrap_or(0)
    }

    pub fn stats(&self) -> ReasoningStats {
        let rule_statistics = self
            .rules
            .rules()
            .iter()
            .map(|rule| RuleStatistics {
                id: rule.id.clone(),
                confidence: rule.confidence.nominal(),
                usage_count: self.usage_count(&rule.id),
                success_rate: rule.success_rate,
            })
            .collect();

        ReasoningStats {
            total_rules: self.rules.len(),
            total_facts: self.facts.len(),
            reasoning_sessions: self.history.len(),
            rule_statistics,
        }
    }

    /// Forget every asserted fact. Rules, usage counts, and history stay.
    pub fn clear(&mut self) {
        tracing::info!(facts = self.facts.len(), "clearing facts");
        self.facts.clear();
    }
}
