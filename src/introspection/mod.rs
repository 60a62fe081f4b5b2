//! Integration layer: meta-cognitive reflection and confidence assessment.
//!
//! Both operations read memories through [`MemoryStore`] and write their
//! result back as a new semantic memory. Assessment also runs the reasoning
//! engine over the evidence; reflection needs only the store. Store failures
//! propagate to the caller.

pub mod assessment;
pub mod heuristics;
pub mod reflection;

use crate::config::IntrospectionConfig;
use crate::memory::MemoryStore;
use crate::reasoning::{Reasoner, ReasoningRequest, ReasoningResult};

pub use assessment::{ConfidenceAssessment, ConfidenceBreakdown, ConfidenceLevel, SupportMethod};
pub use reflection::{Reflection, ReflectionDepth, ReflectionLevel};

/// Context tag for written-back reflections.
pub const REFLECTION_CONTEXT: &str = "meta_cognition";
/// Context tag for written-back confidence assessments.
pub const ASSESSMENT_CONTEXT: &str = "confidence_assessment";

/// Borrows a memory store and a reasoning engine for one operation.
pub struct Introspector<'a> {
    store: &'a dyn MemoryStore,
    reasoner: &'a Reasoner,
    config: IntrospectionConfig,
}

/// Run `request` on `reasoner` and, when `record` is set, log the session to
/// the store so later reflections see it.
pub fn reason_and_record(
    reasoner: &mut Reasoner,
    store: &dyn MemoryStore,
    request: &ReasoningRequest,
    record: bool,
) -> anyhow::Result<ReasoningResult> {
    let result = reasoner.reason(request)?;
    if record {
        if let Some(session) = reasoner.last_session() {
            store.record_session(session)?;
        }
    }
    Ok(result)
}

impl<'a> Introspector<'a> {
    pub fn new(store: &'a dyn MemoryStore, reasoner: &'a Reasoner) -> Self {
        Self {
            store,
            reasoner,
            config: IntrospectionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: IntrospectionConfig) -> Self {
        self.config = config;
        self
    }
}
