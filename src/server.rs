//! MCP server initialization for stdio and streamable HTTP transports.
//!
//! [`serve_stdio`] and [`serve_http`] wire the memory store, the reasoning
//! engine, and the MCP tool handler into a running server.

use crate::config::NoesisConfig;
use crate::db;
use crate::memory::SqliteMemoryStore;
use crate::reasoning::Reasoner;
use crate::tools::NoesisTools;
use anyhow::{bail, Result};
use rmcp::ServiceExt;
use std::sync::{Arc, Mutex};

/// Open the store and build the engine. Every MCP session shares both.
fn setup_shared_state(
    config: NoesisConfig,
) -> Result<(SqliteMemoryStore, Arc<Mutex<Reasoner>>, Arc<NoesisConfig>)> {
    let db_path = config.resolved_db_path();
    let conn = db::open_database(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");

    let store = SqliteMemoryStore::new(conn);

    let reasoner = Reasoner::from_config(&config.reasoning);
    tracing::info!(
        rules = reasoner.rules().len(),
        persist_facts = config.reasoning.persist_facts,
        "reasoning engine ready"
    );

    Ok((store, Arc::new(Mutex::new(reasoner)), Arc::new(config)))
}

/// Start on the transport named by `server.transport`.
pub async fn serve(config: NoesisConfig) -> Result<()> {
    match config.server.transport.as_str() {
        "stdio" => serve_stdio(config).await,
        "http" => serve_http(config).await,
        other => bail!("unknown transport: {other}. Supported: stdio, http"),
    }
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: NoesisConfig) -> Result<()> {
    tracing::info!("starting Noesis MCP server on stdio");

    let (store, reasoner, config) = setup_shared_state(config)?;

    let tools = NoesisTools::new(store, reasoner, config);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP at `/mcp`.
pub async fn serve_http(config: NoesisConfig) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    tracing::info!(addr = %bind_addr, "starting Noesis MCP server on HTTP");

    let (store, reasoner, config) = setup_shared_state(config)?;

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(NoesisTools::new(store.clone(), reasoner.clone(), config.clone())),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
