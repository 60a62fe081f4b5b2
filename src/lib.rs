//! Symbolic reasoning and meta-cognition over a persistent memory store.
//!
//! Noesis pairs a small rule engine (forward, backward, and abductive chaining
//! with confidence propagation) with an introspection layer that reads
//! memories to produce reflections and weighted confidence assessments. It
//! runs as an [MCP](https://modelcontextprotocol.io/) server or from the
//! command line.
//!
//! | Method | Question it answers | Result |
//! |--------|---------------------|--------|
//! | **Forward** | What follows from these premises? | Saturated facts, goal reached or not |
//! | **Backward** | Can this goal be supported? | Depth-bounded proof search |
//! | **Abductive** | What would explain this observation? | Ranked explanations |
//!
//! # Architecture
//!
//! - **Reasoning**: rules shared behind `Arc`, facts owned per call in a
//!   [`reasoning::ReasoningContext`]
//! - **Storage**: SQLite with FTS5 keyword search, behind the
//!   [`memory::MemoryStore`] trait
//! - **Transport**: MCP over stdio (primary) or Streamable HTTP
//!
//! # Modules
//!
//! - [`config`]: configuration loading from TOML files and environment variables
//! - [`db`]: SQLite initialization, schema, and migrations
//! - [`introspection`]: reflection and confidence assessment
//! - [`memory`]: memory store trait and the SQLite implementation
//! - [`reasoning`]: the inference engine

pub mod config;
pub mod db;
pub mod introspection;
pub mod memory;
pub mod reasoning;
