//! Core memory type definitions.
//!
//! Defines [`MemoryType`] (the four cognitive memory categories),
//! [`MemoryRecord`] (a stored memory as the reasoning layer sees it), and
//! [`NewMemory`] (the write-side request).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four cognitive memory types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    /// Events, decisions, session logs.
    Episodic,
    /// Facts, knowledge, preferences, derived reflections.
    Semantic,
    /// Workflows, patterns, how-to guides.
    Procedural,
    /// People, places, projects, things.
    Entity,
}

impl MemoryType {
    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Episodic => "episodic",
            Self::Semantic => "semantic",
            Self::Procedural => "procedural",
            Self::Entity => "entity",
        }
    }
}

impl std::fmt::Display for MemoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "episodic" => Ok(Self::Episodic),
            "semantic" => Ok(Self::Semantic),
            "procedural" => Ok(Self::Procedural),
            "entity" => Ok(Self::Entity),
            _ => Err(format!("unknown memory type: {s}")),
        }
    }
}

/// Context assigned when the caller gives none.
pub const DEFAULT_CONTEXT: &str = "general";

/// A stored memory, matching the `memories` table schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// UUID v7 (time-sortable) primary key.
    pub id: String,
    #[serde(rename = "type")]
    pub memory_type: MemoryType,
    pub content: String,
    /// Free-form topic bucket (e.g. `"work"`, `"meta_cognition"`).
    pub context: String,
    /// Confidence score in `[0.0, 1.0]`.
    pub confidence: f64,
    /// Emotional salience in `[0.0, 1.0]`.
    pub emotional_weight: f64,
    pub tags: Vec<String>,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// A memory to be written.
#[derive(Debug, Clone)]
pub struct NewMemory {
    pub content: String,
    pub memory_type: MemoryType,
    pub context: String,
    pub confidence: f64,
    pub emotional_weight: f64,
    pub tags: Vec<String>,
    /// Creation time override; `None` means now.
    pub timestamp: Option<DateTime<Utc>>,
    pub metadata: Option<serde_json::Value>,
}

impl NewMemory {
    pub fn new(content: impl Into<String>, memory_type: MemoryType) -> Self {
        Self {
            content: content.into(),
            memory_type,
            context: DEFAULT_CONTEXT.to_string(),
            confidence: 1.0,
            emotional_weight: 0.0,
            tags: Vec::new(),
            timestamp: None,
            metadata: None,
        }
    }

    pub fn semantic(content: impl Into<String>) -> Self {
        Self::new(content, MemoryType::Semantic)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_emotional_weight(mut self, weight: f64) -> Self {
        self.emotional_weight = weight;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_type_round_trips_through_str() {
        for t in [
            MemoryType::Episodic,
            MemoryType::Semantic,
            MemoryType::Procedural,
            MemoryType::Entity,
        ] {
            assert_eq!(t.as_str().parse::<MemoryType>(), Ok(t));
        }
        assert!("dream".parse::<MemoryType>().is_err());
    }

    #[test]
    fn new_memory_defaults() {
        let m = NewMemory::semantic("water boils at 100C");
        assert_eq!(m.context, DEFAULT_CONTEXT);
        assert_eq!(m.confidence, 1.0);
        assert_eq!(m.emotional_weight, 0.0);
        assert!(m.tags.is_empty());
    }
}
