//! Weighted, four-factor confidence assessment of a statement.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::heuristics::{detect_contradiction, determine_support};
use super::{Introspector, ASSESSMENT_CONTEXT};
use crate::memory::types::NewMemory;

const MEMORY_WEIGHT: f64 = 0.3;
const REASONING_WEIGHT: f64 = 0.4;
const CONSISTENCY_WEIGHT: f64 = 0.2;
const SOURCE_WEIGHT: f64 = 0.1;

const NO_EVIDENCE_SCORE: f64 = 0.5;
const ABDUCTIVE_DISCOUNT: f64 = 0.8;
const FAILED_REASONING_SCORE: f64 = 0.3;
const CONTRADICTION_PENALTY: f64 = 0.2;
const EVIDENCE_RELIABILITY: f64 = 0.7;
const NO_SOURCE_RELIABILITY: f64 = 0.5;

/// Categorical confidence bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::VeryHigh
        } else if score >= 0.7 {
            Self::High
        } else if score >= 0.5 {
            Self::Moderate
        } else if score >= 0.3 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the reasoning sub-score was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportMethod {
    ForwardChaining,
    AbductiveReasoning,
    NoEvidence,
    ReasoningFailed,
}

impl SupportMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForwardChaining => "forward_chaining",
            Self::AbductiveReasoning => "abductive_reasoning",
            Self::NoEvidence => "no_evidence",
            Self::ReasoningFailed => "reasoning_failed",
        }
    }
}

/// The four unweighted sub-scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub memory_support: f64,
    pub reasoning_support: f64,
    pub consistency: f64,
    pub source_reliability: f64,
}

impl ConfidenceBreakdown {
    /// Each sub-score multiplied by its weight.
    pub fn weighted(&self) -> Self {
        Self {
            memory_support: self.memory_support * MEMORY_WEIGHT,
            reasoning_support: self.reasoning_support * REASONING_WEIGHT,
            consistency: self.consistency * CONSISTENCY_WEIGHT,
            source_reliability: self.source_reliability * SOURCE_WEIGHT,
        }
    }

    pub fn weighted_score(&self) -> f64 {
        let w = self.weighted();
        (w.memory_support + w.reasoning_support + w.consistency + w.source_reliability)
            .clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceAssessment {
    pub statement: String,
    pub level: ConfidenceLevel,
    pub score: f64,
    pub factors: Vec<String>,
    pub breakdown: ConfidenceBreakdown,
    /// `breakdown` scaled by the factor weights; sums to `score`.
    pub weighted_breakdown: ConfidenceBreakdown,
    pub reasoning_method: SupportMethod,
    /// Id of the memory the assessment was stored under.
    pub memory_id: String,
}

impl Introspector<'_> {
    /// Score how much `statement` should be believed given the memory store,
    /// the rule base, and `evidence`, then store the verdict.
    pub fn assess_confidence(
        &self,
        statement: &str,
        evidence: &[String],
    ) -> Result<ConfidenceAssessment> {
        let statement = statement.trim();
        if statement.is_empty() {
            bail!("statement must not be empty");
        }

        let mut factors = Vec::new();

        let memory_support = self.memory_support(statement, &mut factors)?;
        let (reasoning_support, reasoning_method) = self.reasoning_support(statement, evidence);
        factors.push(format!(
            "Reasoning support {reasoning_support:.2} via {}",
            reasoning_method.as_str()
        ));
        let consistency = self.consistency(statement, &mut factors)?;
        let source_reliability = if evidence.is_empty() {
            factors.push("No evidence sources provided".into());
            NO_SOURCE_RELIABILITY
        } else {
            factors.push(format!("{} evidence item(s) provided", evidence.len()));
            EVIDENCE_RELIABILITY
        };

        let breakdown = ConfidenceBreakdown {
            memory_support,
            reasoning_support,
            consistency,
            source_reliability,
        };
        let score = breakdown.weighted_score();
        let level = ConfidenceLevel::from_score(score);

        tracing::info!(
            statement = %statement,
            score,
            level = %level,
            method = reasoning_method.as_str(),
            "confidence assessed"
        );

        let record = self.store.store(
            NewMemory::semantic(format!(
                "Confidence assessment of \"{statement}\": {level} ({score:.2})"
            ))
            .with_context(ASSESSMENT_CONTEXT)
            .with_confidence(score)
            .with_tags(["confidence_assessment", level.as_str()]),
        )?;

        Ok(ConfidenceAssessment {
            statement: statement.to_string(),
            level,
            score,
            factors,
            breakdown,
            weighted_breakdown: breakdown.weighted(),
            reasoning_method,
            memory_id: record.id,
        })
    }

    fn memory_support(&self, statement: &str, factors: &mut Vec<String>) -> Result<f64> {
        let memories = self
            .store
            .search(statement, None, self.config.support_memory_limit)?;

        let (mut supporting, mut contradicting) = (0.0, 0.0);
        let (mut n_support, mut n_contra) = (0usize, 0usize);
        for memory in &memories {
            let s = determine_support(&memory.content, statement);
            if s > 0.0 {
                supporting += s;
                n_support += 1;
            } else if s < 0.0 {
                contradicting += -s;
                n_contra += 1;
            }
        }

        let score = ((supporting - contradicting) / memories.len().max(1) as f64).clamp(0.0, 1.0);
        factors.push(format!(
            "Memory support {score:.2}: {n_support} supporting, {n_contra} contradicting of {} related",
            memories.len()
        ));
        Ok(score)
    }

    /// Forward chaining from the evidence, then abduction, then a fixed floor.
    /// Contexts start from the engine's facts plus the evidence and are
    /// dropped afterwards, so nothing derived here reaches the engine.
    fn reasoning_support(&self, statement: &str, evidence: &[String]) -> (f64, SupportMethod) {
        if evidence.is_empty() {
            return (NO_EVIDENCE_SCORE, SupportMethod::NoEvidence);
        }

        self.try_forward(statement, evidence)
            .map(|c| (c, SupportMethod::ForwardChaining))
            .or_else(|| {
                self.try_abductive(statement, evidence)
                    .map(|c| (c * ABDUCTIVE_DISCOUNT, SupportMethod::AbductiveReasoning))
            })
            .unwrap_or((FAILED_REASONING_SCORE, SupportMethod::ReasoningFailed))
    }

    fn try_forward(&self, statement: &str, evidence: &[String]) -> Option<f64> {
        let mut ctx = self.reasoner.context();
        for e in evidence {
            ctx.add_fact(e.as_str(), 1.0);
        }
        let result = ctx.forward_chain(statement);
        result.found.then_some(result.confidence.clamp(0.0, 1.0))
    }

    fn try_abductive(&self, statement: &str, evidence: &[String]) -> Option<f64> {
        let mut ctx = self.reasoner.context();
        for e in evidence {
            ctx.add_fact(e.as_str(), 1.0);
        }
        let result = ctx.abductive_reason(statement);
        result.found.then_some(result.confidence.clamp(0.0, 1.0))
    }

    fn consistency(&self, statement: &str, factors: &mut Vec<String>) -> Result<f64> {
        let memories = self
            .store
            .search(statement, None, self.config.consistency_memory_limit)?;
        let contradictions = memories
            .iter()
            .filter(|m| detect_contradiction(statement, &m.content))
            .count();

        let score = (1.0 - CONTRADICTION_PENALTY * contradictions as f64).max(0.0);
        factors.push(format!(
            "Consistency {score:.2}: {contradictions} contradiction(s) among {} memories",
            memories.len()
        ));
        Ok(score)
    }
}
