pub mod assess_confidence;
pub mod clear_facts;
pub mod reason;
pub mod reasoning_stats;
pub mod reflect;
pub mod search_memory;
pub mod store_memory;

use assess_confidence::AssessConfidenceParams;
use clear_facts::ClearFactsParams;
use reason::ReasonParams;
use reasoning_stats::ReasoningStatsParams;
use reflect::ReflectParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use search_memory::SearchMemoryParams;
use std::sync::{Arc, Mutex, MutexGuard};
use store_memory::StoreMemoryParams;

use crate::config::NoesisConfig;
use crate::introspection::{self, Introspector, ReflectionDepth};
use crate::memory::types::{MemoryType, NewMemory};
use crate::memory::{MemoryStore, SqliteMemoryStore};
use crate::reasoning::{Reasoner, ReasoningMethod, ReasoningRequest};

const DEFAULT_SEARCH_LIMIT: usize = 10;
const MAX_SEARCH_LIMIT: usize = 50;

/// The Noesis MCP tool handler. Holds the memory store, the shared reasoning
/// engine, and config, and exposes all MCP tools via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct NoesisTools {
    tool_router: ToolRouter<Self>,
    store: SqliteMemoryStore,
    reasoner: Arc<Mutex<Reasoner>>,
    config: Arc<NoesisConfig>,
}

fn lock_reasoner(reasoner: &Mutex<Reasoner>) -> anyhow::Result<MutexGuard<'_, Reasoner>> {
    reasoner
        .lock()
        .map_err(|e| anyhow::anyhow!("reasoner lock poisoned: {e}"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("serialization failed: {e}"))
}

#[tool_router]
impl NoesisTools {
    pub fn new(
        store: SqliteMemoryStore,
        reasoner: Arc<Mutex<Reasoner>>,
        config: Arc<NoesisConfig>,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
            reasoner,
            config,
        }
    }

    /// Run forward, backward, or abductive reasoning.
    #[tool(description = "Reason over premises toward a goal. Methods: forward (derive consequences until the goal appears), backward (search for support of the goal), abductive (rank explanations of an observation).")]
    async fn reason(&self, Parameters(params): Parameters<ReasonParams>) -> Result<String, String> {
        let method: ReasoningMethod = params.method.parse().map_err(|e| format!("{e}"))?;
        let request = ReasoningRequest {
            premises: params.premises,
            goal: params.goal,
            method,
        };

        tracing::info!(method = %method, goal = %request.goal, "reason called");

        let store = self.store.clone();
        let reasoner = Arc::clone(&self.reasoner);
        let record = self.config.reasoning.record_sessions;

        let result = tokio::task::spawn_blocking(move || {
            let mut reasoner = lock_reasoner(&reasoner)?;
            introspection::reason_and_record(&mut reasoner, &store, &request, record)
        })
        .await
        .map_err(|e| format!("reasoning task failed: {e}"))?
        .map_err(|e| format!("reasoning failed: {e}"))?;

        to_json(&result)
    }

    /// Reflect on what is known about a topic.
    #[tool(description = "Meta-cognitive reflection on a topic: patterns, knowledge gaps, confidence, biases. The report is stored as a memory in context 'meta_cognition'.")]
    async fn reflect(&self, Parameters(params): Parameters<ReflectParams>) -> Result<String, String> {
        let depth: ReflectionDepth = params
            .depth
            .as_deref()
            .unwrap_or("surface")
            .parse()
            .map_err(|e| format!("{e}"))?;

        tracing::info!(topic = %params.topic, depth = %depth, "reflect called");

        let store = self.store.clone();
        let config = self.config.introspection.clone();
        let topic = params.topic;

        let reflection = tokio::task::spawn_blocking(move || {
            introspection::reflection::reflect(&store, &config, &topic, depth)
        })
        .await
        .map_err(|e| format!("reflection task failed: {e}"))?
        .map_err(|e| format!("reflection failed: {e}"))?;

        to_json(&reflection)
    }

    /// Score the credibility of a statement.
    #[tool(description = "Assess confidence in a statement from memory support, reasoning over the given evidence, consistency with stored memories, and source reliability. Returns a level (very_low..very_high), a score, and the breakdown.")]
    async fn assess_confidence(
        &self,
        Parameters(params): Parameters<AssessConfidenceParams>,
    ) -> Result<String, String> {
        let evidence = params.evidence.unwrap_or_default();
        tracing::info!(
            statement = %params.statement,
            evidence = evidence.len(),
            "assess_confidence called"
        );

        let store = self.store.clone();
        let reasoner = Arc::clone(&self.reasoner);
        let config = self.config.introspection.clone();
        let statement = params.statement;

        let assessment = tokio::task::spawn_blocking(move || {
            let reasoner = lock_reasoner(&reasoner)?;
            let introspector = Introspector::new(&store, &reasoner).with_config(config);
            introspector.assess_confidence(&statement, &evidence)
        })
        .await
        .map_err(|e| format!("assessment task failed: {e}"))?
        .map_err(|e| format!("assessment failed: {e}"))?;

        to_json(&assessment)
    }

    /// Engine statistics.
    #[tool(description = "Get reasoning engine statistics: rule count, fact count, session count, and per-rule usage.")]
    async fn reasoning_stats(
        &self,
        Parameters(params): Parameters<ReasoningStatsParams>,
    ) -> Result<String, String> {
        let stats = lock_reasoner(&self.reasoner)
            .map_err(|e| e.to_string())?
            .stats();

        if !params.include_store.unwrap_or(false) {
            return to_json(&stats);
        }

        let store = self.store.clone();
        let store_stats = tokio::task::spawn_blocking(move || {
            let conn = store.lock()?;
            crate::memory::stats::store_stats(&conn, None)
        })
        .await
        .map_err(|e| format!("db task failed: {e}"))?
        .map_err(|e| format!("stats failed: {e}"))?;

        to_json(&serde_json::json!({
            "engine": stats,
            "store": store_stats,
        }))
    }

    /// Reset the asserted facts.
    #[tool(description = "Clear every asserted and derived fact from the reasoning engine. Rules, usage counts, and history are kept. Requires confirm=true.")]
    async fn clear_facts(
        &self,
        Parameters(params): Parameters<ClearFactsParams>,
    ) -> Result<String, String> {
        if !params.confirm {
            return Err("confirm must be true to clear facts".into());
        }
        let mut reasoner = lock_reasoner(&self.reasoner).map_err(|e| e.to_string())?;
        let cleared = reasoner.facts().len();
        reasoner.clear();
        Ok(serde_json::json!({ "cleared": cleared }).to_string())
    }

    /// Store a new memory.
    #[tool(description = "Store a new memory. Types: episodic (events/experiences), semantic (facts/knowledge), procedural (how-to/processes), entity (people/places/things).")]
    async fn store_memory(
        &self,
        Parameters(params): Parameters<StoreMemoryParams>,
    ) -> Result<String, String> {
        let memory_type: MemoryType = match params.r#type.as_deref() {
            Some(t) => t.parse()?,
            None => MemoryType::Semantic,
        };

        let mut memory = NewMemory::new(params.content, memory_type)
            .with_confidence(params.confidence.unwrap_or(1.0))
            .with_emotional_weight(params.emotional_weight.unwrap_or(0.0))
            .with_tags(params.tags.unwrap_or_default());
        if let Some(context) = params.context {
            memory = memory.with_context(context);
        }
        if let Some(metadata) = params.metadata {
            memory = memory.with_metadata(metadata);
        }

        tracing::info!(
            content_len = memory.content.len(),
            memory_type = %memory_type,
            context = %memory.context,
            "store_memory called"
        );

        let store = self.store.clone();
        let record = tokio::task::spawn_blocking(move || store.store(memory))
            .await
            .map_err(|e| format!("db task failed: {e}"))?
            .map_err(|e| format!("store failed: {e}"))?;

        to_json(&record)
    }

    /// Keyword search over memories.
    #[tool(description = "Search memories by keywords (BM25 ranked). Optionally restrict to one context.")]
    async fn search_memory(
        &self,
        Parameters(params): Parameters<SearchMemoryParams>,
    ) -> Result<String, String> {
        let limit = params
            .limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);

        tracing::info!(query = %params.query, limit, "search_memory called");

        let store = self.store.clone();
        let records = tokio::task::spawn_blocking(move || {
            store.search(&params.query, params.context.as_deref(), limit)
        })
        .await
        .map_err(|e| format!("db task failed: {e}"))?
        .map_err(|e| format!("search failed: {e}"))?;

        to_json(&serde_json::json!({
            "total": records.len(),
            "memories": records,
        }))
    }
}

#[tool_handler]
impl ServerHandler for NoesisTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Noesis is a reasoning server over a memory store. Use reason for \
                 forward/backward/abductive inference, reflect and assess_confidence \
                 for meta-cognition, and store_memory/search_memory to manage memories."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
