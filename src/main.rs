mod cli;
mod config;
mod db;
mod introspection;
mod memory;
mod reasoning;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "noesis", version, about = "Symbolic reasoning and meta-cognition MCP server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server
    Serve {
        /// Transport override: stdio or http
        #[arg(long)]
        transport: Option<String>,
    },
    /// Run forward, backward, or abductive reasoning
    Reason {
        /// Goal to derive, or observation to explain
        goal: String,
        /// Premise asserted before reasoning (repeatable)
        #[arg(short, long = "premise")]
        premises: Vec<String>,
        #[arg(short, long, default_value = "forward")]
        method: String,
        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
    /// Reflect on what is known about a topic
    Reflect {
        topic: String,
        /// surface, deep, or philosophical
        #[arg(short, long, default_value = "surface")]
        depth: String,
    },
    /// Assess confidence in a statement
    Assess {
        statement: String,
        /// Evidence statement (repeatable)
        #[arg(short, long)]
        evidence: Vec<String>,
    },
    /// Store a memory
    Remember {
        content: String,
        #[arg(short = 't', long = "type", default_value = "semantic")]
        memory_type: String,
        #[arg(short, long)]
        context: Option<String>,
        #[arg(long, default_value_t = 1.0)]
        confidence: f64,
        #[arg(long, default_value_t = 0.0)]
        emotional_weight: f64,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Search memories by keyword
    Search {
        query: String,
        #[arg(short, long)]
        context: Option<String>,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Show memory store statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::NoesisConfig::load()?;

    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { transport } => {
            if let Some(transport) = transport {
                config.server.transport = transport;
            }
            server::serve(config).await?;
        }
        Command::Reason {
            goal,
            premises,
            method,
            json,
        } => {
            cli::reason::reason(&config, premises, goal, &method, json)?;
        }
        Command::Reflect { topic, depth } => {
            cli::reflect::reflect(&config, &topic, &depth)?;
        }
        Command::Assess {
            statement,
            evidence,
        } => {
            cli::assess::assess(&config, &statement, &evidence)?;
        }
        Command::Remember {
            content,
            memory_type,
            context,
            confidence,
            emotional_weight,
            tags,
        } => {
            cli::remember::remember(
                &config,
                cli::remember::RememberArgs {
                    content,
                    memory_type,
                    context,
                    confidence,
                    emotional_weight,
                    tags,
                },
            )?;
        }
        Command::Search {
            query,
            context,
            limit,
        } => {
            cli::search::search(&config, &query, context.as_deref(), limit)?;
        }
        Command::Stats => {
            cli::stats::stats(&config)?;
        }
    }

    Ok(())
}
