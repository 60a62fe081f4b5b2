//! Iterative meta-reflection over the memories relevant to a topic.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt::Write as _;

use anyhow::Result;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Introspector, REFLECTION_CONTEXT};
use crate::config::IntrospectionConfig;
use crate::memory::types::{MemoryRecord, NewMemory};
use crate::memory::MemoryStore;
use crate::reasoning::{ReasoningError, ReasoningMethod, ReasoningSession};

/// How many reflection levels to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectionDepth {
    Surface,
    Deep,
    Philosophical,
}

impl ReflectionDepth {
    pub fn levels(&self) -> usize {
        match self {
            Self::Surface => 1,
            Self::Deep => 3,
            Self::Philosophical => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Deep => "deep",
            Self::Philosophical => "philosophical",
        }
    }
}

impl std::fmt::Display for ReflectionDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReflectionDepth {
    type Err = ReasoningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "surface" => Ok(Self::Surface),
            "deep" => Ok(Self::Deep),
            "philosophical" => Ok(Self::Philosophical),
            other => Err(ReasoningError::UnknownDepth(other.to_string())),
        }
    }
}

/// One pass of reflection. Level 1 fills only the first four fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReflectionLevel {
    pub level: usize,
    pub patterns_identified: Vec<String>,
    pub knowledge_gaps: Vec<String>,
    pub confidence_in_understanding: f64,
    pub emotional_resonance: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_questions: Vec<String>,
    /// Reasoning-history method usage counts.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub reasoning_patterns: BTreeMap<String, usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub potential_biases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uncertainty_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub growth_opportunities: Vec<String>,
}

/// Result of [`Introspector::reflect`].
#[derive(Debug, Clone, Serialize)]
pub struct Reflection {
    pub topic: String,
    pub depth: ReflectionDepth,
    pub levels: Vec<ReflectionLevel>,
    pub report: String,
    /// Id of the memory the report was stored under.
    pub memory_id: String,
}

impl Reflection {
    pub fn final_level(&self) -> Option<&ReflectionLevel> {
        self.levels.last()
    }
}

const RECURRING_CONTEXT_MIN: usize = 3;
const CLUSTERING_RATIO: f64 = 0.7;
const MIN_MEMORIES: usize = 3;
const LOW_CONFIDENCE: f64 = 0.5;
const LOW_CONFIDENCE_SHARE: f64 = 0.3;
const DIVERSITY_STEP: f64 = 0.05;
const DIVERSITY_CAP: f64 = 0.2;
const RECENT_DAYS: i64 = 7;
const RECENCY_SHARE: f64 = 0.7;
const FORWARD_SHARE: f64 = 0.8;

const BASE_META_QUESTIONS: [&str; 4] = [
    "What assumptions underlie my current understanding?",
    "Which sources does this knowledge come from?",
    "How has my understanding changed over time?",
    "What would change my mind?",
];

const EXTENDED_META_QUESTIONS: [&str; 3] = [
    "How do my reasoning habits shape these conclusions?",
    "What do I not know that I do not know?",
    "How would a different perspective frame this topic?",
];

impl Introspector<'_> {
    /// Reflect on `topic` for `depth.levels()` passes and store the report.
    pub fn reflect(&self, topic: &str, depth: ReflectionDepth) -> Result<Reflection> {
        reflect(self.store, &self.config, topic, depth)
    }
}

/// Reflect on `topic` and store the report. Touches only the memory store.
pub fn reflect(
    store: &dyn MemoryStore,
    config: &IntrospectionConfig,
    topic: &str,
    depth: ReflectionDepth,
) -> Result<Reflection> {
    let memories = store.search(topic, None, config.reflection_memory_limit)?;
    let history = store.reasoning_history(config.history_limit)?;

    tracing::info!(
        topic = %topic,
        depth = %depth,
        memories = memories.len(),
        sessions = history.len(),
        "reflecting"
    );

    let mut levels = vec![base_reflection(&memories)];
    for level in 2..=depth.levels() {
        let next = deepen(levels.last(), level, &memories, &history);
        levels.push(next);
    }

    let report = render_report(topic, depth, &levels);
    let confidence = levels
        .last()
        .map(|l| l.confidence_in_understanding)
        .unwrap_or(0.0);

    let record = store.store(
        NewMemory::semantic(report.clone())
            .with_context(REFLECTION_CONTEXT)
            .with_confidence(confidence)
            .with_tags(["reflection", topic, depth.as_str()]),
    )?;

    Ok(Reflection {
        topic: topic.to_string(),
        depth,
        levels,
        report,
        memory_id: record.id,
    })
}

/// Level 1: patterns, gaps, confidence and resonance straight from the memories.
fn base_reflection(memories: &[MemoryRecord]) -> ReflectionLevel {
    let mut per_context: BTreeMap<&str, usize> = BTreeMap::new();
    for m in memories {
        *per_context.entry(m.context.as_str()).or_default() += 1;
    }

    let mut patterns: Vec<String> = per_context
        .iter()
        .filter(|(_, n)| **n >= RECURRING_CONTEXT_MIN)
        .map(|(ctx, _)| format!("recurring_{ctx}"))
        .collect();

    let days: HashSet<_> = memories.iter().map(|m| m.timestamp.date_naive()).collect();
    if (days.len() as f64) < CLUSTERING_RATIO * memories.len() as f64 {
        patterns.push("temporal_clustering".into());
    }

    let mut gaps = Vec::new();
    if memories.len() < MIN_MEMORIES {
        gaps.push("insufficient_information".into());
    }
    let low = memories
        .iter()
        .filter(|m| m.confidence < LOW_CONFIDENCE)
        .count();
    if !memories.is_empty() && low as f64 / memories.len() as f64 > LOW_CONFIDENCE_SHARE {
        gaps.push("low_confidence_knowledge".into());
    }
    if per_context.len() == 1 {
        gaps.push("limited_perspective".into());
    }

    let diversity = (DIVERSITY_STEP * per_context.len() as f64).min(DIVERSITY_CAP);
    let confidence = (mean(memories.iter().map(|m| m.confidence)) + diversity).clamp(0.0, 1.0);
    let resonance = mean(memories.iter().map(|m| m.emotional_weight)).clamp(0.0, 1.0);

    ReflectionLevel {
        level: 1,
        patterns_identified: patterns,
        knowledge_gaps: gaps,
        confidence_in_understanding: confidence,
        emotional_resonance: resonance,
        ..Default::default()
    }
}

/// Levels 2..n: question the previous level.
fn deepen(
    previous: Option<&ReflectionLevel>,
    level: usize,
    memories: &[MemoryRecord],
    history: &[ReasoningSession],
) -> ReflectionLevel {
    let mut meta_questions: Vec<String> =
        BASE_META_QUESTIONS.iter().map(|q| q.to_string()).collect();
    if previous.is_some_and(|p| p.level > 1) {
        meta_questions.extend(EXTENDED_META_QUESTIONS.iter().map(|q| q.to_string()));
    }

    let mut reasoning_patterns: BTreeMap<String, usize> = BTreeMap::new();
    for session in history {
        *reasoning_patterns
            .entry(session.method.as_str().to_string())
            .or_default() += 1;
    }

    let biases = potential_biases(memories, history);

    let mut uncertainty: BTreeSet<String> = BTreeSet::new();
    let mut growth: BTreeSet<String> = BTreeSet::new();
    if let Some(prev) = previous {
        uncertainty.extend(prev.uncertainty_areas.iter().cloned());
        growth.extend(prev.growth_opportunities.iter().cloned());
        for gap in &prev.knowledge_gaps {
            uncertainty.insert(format!("gap: {gap}"));
            growth.insert(format!("address {gap}"));
        }
        for bias in &prev.potential_biases {
            growth.insert(format!("counter {bias}"));
        }
        if prev.confidence_in_understanding < LOW_CONFIDENCE {
            uncertainty.insert("low overall confidence".into());
            growth.insert("gather corroborating evidence".into());
        }
    }

    ReflectionLevel {
        level,
        patterns_identified: previous
            .map(|p| p.patterns_identified.clone())
            .unwrap_or_default(),
        knowledge_gaps: previous.map(|p| p.knowledge_gaps.clone()).unwrap_or_default(),
        confidence_in_understanding: previous
            .map(|p| p.confidence_in_understanding)
            .unwrap_or(0.0),
        emotional_resonance: previous.map(|p| p.emotional_resonance).unwrap_or(0.0),
        meta_questions,
        reasoning_patterns,
        potential_biases: biases,
        uncertainty_areas: uncertainty.into_iter().collect(),
        growth_opportunities: growth.into_iter().collect(),
    }
}

fn potential_biases(memories: &[MemoryRecord], history: &[ReasoningSession]) -> Vec<String> {
    let mut biases = Vec::new();

    let cutoff = Utc::now() - Duration::days(RECENT_DAYS);
    let recent = memories.iter().filter(|m| m.timestamp > cutoff).count();
    if !memories.is_empty() && recent as f64 / memories.len() as f64 > RECENCY_SHARE {
        biases.push("recency_bias".into());
    }

    let forward = history
        .iter()
        .filter(|s| s.method == ReasoningMethod::Forward)
        .count();
    if !history.is_empty() && forward as f64 / history.len() as f64 > FORWARD_SHARE {
        biases.push("confirmation_bias_tendency".into());
    }

    biases
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".into()
    } else {
        items.join(", ")
    }
}

fn render_report(topic: &str, depth: ReflectionDepth, levels: &[ReflectionLevel]) -> String {
    let mut out = format!(
        "Reflection on \"{topic}\" ({depth}, {} level{})\n",
        levels.len(),
        if levels.len() == 1 { "" } else { "s" }
    );
    let Some(last) = levels.last() else {
        return out;
    };

    let _ = writeln!(out, "Patterns identified: {}", list_or_none(&last.patterns_identified));
    let _ = writeln!(out, "Knowledge gaps: {}", list_or_none(&last.knowledge_gaps));
    let _ = writeln!(
        out,
        "Confidence in understanding: {:.2}",
        last.confidence_in_understanding
    );
    let _ = writeln!(out, "Emotional resonance: {:.2}", last.emotional_resonance);

    if last.level > 1 {
        out.push_str("Meta-questions:\n");
        for q in &last.meta_questions {
            let _ = writeln!(out, "  - {q}");
        }
        let patterns: Vec<String> = last
            .reasoning_patterns
            .iter()
            .map(|(method, n)| format!("{method} x{n}"))
            .collect();
        let _ = writeln!(out, "Reasoning patterns: {}", list_or_none(&patterns));
        let _ = writeln!(out, "Potential biases: {}", list_or_none(&last.potential_biases));
        let _ = writeln!(out, "Uncertainty areas: {}", list_or_none(&last.uncertainty_areas));
        let _ = writeln!(
            out,
            "Growth opportunities: {}",
            list_or_none(&last.growth_opportunities)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::types::MemoryType;
    use crate::reasoning::ReasoningResult;

    fn memory(context: &str, confidence: f64, days_ago: i64) -> MemoryRecord {
        MemoryRecord {
            id: uuid::Uuid::now_v7().to_string(),
            memory_type: MemoryType::Semantic,
            content: "note".into(),
            context: context.into(),
            confidence,
            emotional_weight: 0.4,
            tags: vec![],
            timestamp: Utc::now() - Duration::days(days_ago),
            metadata: None,
        }
    }

    fn session(method: ReasoningMethod) -> ReasoningSession {
        ReasoningSession {
            premises: vec![],
            goal: "g".into(),
            method,
            result: ReasoningResult {
                conclusion: "g".into(),
                found: false,
                confidence: 0.0,
                steps: vec![],
                method,
                explanations: vec![],
            },
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn depth_parses_and_maps_to_levels() {
        assert_eq!("surface".parse::<ReflectionDepth>().unwrap().levels(), 1);
        assert_eq!("deep".parse::<ReflectionDepth>().unwrap().levels(), 3);
        assert_eq!("philosophical".parse::<ReflectionDepth>().unwrap().levels(), 5);
        assert_eq!(
            "abyssal".parse::<ReflectionDepth>(),
            Err(ReasoningError::UnknownDepth("abyssal".into()))
        );
    }

    #[test]
    fn base_reflection_with_no_memories() {
        let level = base_reflection(&[]);
        assert_eq!(level.knowledge_gaps, vec!["insufficient_information"]);
        assert!(level.patterns_identified.is_empty());
        assert_eq!(level.confidence_in_understanding, 0.0);
        assert_eq!(level.emotional_resonance, 0.0);
    }

    #[test]
    fn base_reflection_patterns_and_gaps() {
        let memories: Vec<_> = (0..4).map(|_| memory("work", 0.3, 0)).collect();
        let level = base_reflection(&memories);

        assert!(level.patterns_identified.contains(&"recurring_work".to_string()));
        // four memories on one day
        assert!(level.patterns_identified.contains(&"temporal_clustering".to_string()));
        assert!(level.knowledge_gaps.contains(&"low_confidence_knowledge".to_string()));
        assert!(level.knowledge_gaps.contains(&"limited_perspective".to_string()));
        assert!(!level.knowledge_gaps.contains(&"insufficient_information".to_string()));
        // mean 0.3 + one context bonus 0.05
        assert!((level.confidence_in_understanding - 0.35).abs() < 1e-9);
        assert!((level.emotional_resonance - 0.4).abs() < 1e-9);
    }

    #[test]
    fn diversity_bonus_is_capped() {
        let memories: Vec<_> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .enumerate()
            .map(|(i, c)| memory(c, 0.9, i as i64))
            .collect();
        let level = base_reflection(&memories);
        assert!((level.confidence_in_understanding - 1.0).abs() < 1e-9);
        assert!(level.knowledge_gaps.is_empty());
        assert!(!level.patterns_identified.contains(&"temporal_clustering".to_string()));
    }

    #[test]
    fn deepen_flags_biases_and_counts_methods() {
        let memories: Vec<_> = (0..3).map(|i| memory("work", 0.9, i)).collect();
        let history: Vec<_> = (0..5).map(|_| session(ReasoningMethod::Forward)).collect();
        let base = base_reflection(&memories);

        let level2 = deepen(Some(&base), 2, &memories, &history);
        assert_eq!(level2.meta_questions.len(), 4);
        assert_eq!(level2.reasoning_patterns["forward"], 5);
        assert!(level2.potential_biases.contains(&"recency_bias".to_string()));
        assert!(level2
            .potential_biases
            .contains(&"confirmation_bias_tendency".to_string()));
        assert!(level2
            .uncertainty_areas
            .contains(&"gap: limited_perspective".to_string()));

        let level3 = deepen(Some(&level2), 3, &memories, &history);
        assert_eq!(level3.meta_questions.len(), 7);
        assert!(level3
            .growth_opportunities
            .contains(&"counter recency_bias".to_string()));
    }

    #[test]
    fn deepen_without_previous_level() {
        let level = deepen(None, 2, &[], &[]);
        assert_eq!(level.meta_questions.len(), 4);
        assert!(level.potential_biases.is_empty());
        assert!(level.uncertainty_areas.is_empty());
    }

    #[test]
    fn old_memories_do_not_trigger_recency_bias() {
        let memories: Vec<_> = (0..3).map(|i| memory("work", 0.9, 30 + i)).collect();
        let mixed = vec![
            session(ReasoningMethod::Forward),
            session(ReasoningMethod::Backward),
        ];
        assert!(potential_biases(&memories, &mixed).is_empty());
    }

    #[test]
    fn report_lists_final_level() {
        let base = base_reflection(&[]);
        let report = render_report("rust", ReflectionDepth::Surface, &[base]);
        assert!(report.starts_with("Reflection on \"rust\" (surface, 1 level)"));
        assert!(report.contains("Knowledge gaps: insufficient_information"));
        assert!(!report.contains("Meta-questions"));
    }
}
