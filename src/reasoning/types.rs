//! Request, result, and history types shared by the chainers and callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ReasoningError;

/// Which inference mode a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningMethod {
    Forward,
    Backward,
    Abductive,
}

impl ReasoningMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Abductive => "abductive",
        }
    }
}

impl std::fmt::Display for ReasoningMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReasoningMethod {
    type Err = ReasoningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            "abductive" => Ok(Self::Abductive),
            other => Err(ReasoningError::UnknownMethod(other.to_string())),
        }
    }
}

/// A caller's reasoning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningRequest {
    pub premises: Vec<String>,
    pub goal: String,
    pub method: ReasoningMethod,
}

/// One candidate explanation produced by abduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Rule id, or `causal_heuristic` for the effect → cause guess.
    pub source: String,
    pub premises: Vec<String>,
    pub confidence: f64,
    pub plausibility: f64,
}

impl Explanation {
    /// Ranking key: `confidence × plausibility`.
    pub fn score(&self) -> f64 {
        self.confidence * self.plausibility
    }
}

/// Outcome of one inference run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningResult {
    pub conclusion: String,
    pub found: bool,
    pub confidence: f64,
    pub steps: Vec<String>,
    pub method: ReasoningMethod,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explanations: Vec<Explanation>,
}

/// History record appended on every `reason()` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningSession {
    pub premises: Vec<String>,
    pub goal: String,
    pub method: ReasoningMethod,
    pub result: ReasoningResult,
    pub timestamp: DateTime<Utc>,
}
