//! Atlas CLI — knowledge graph inspection and context pack assembly.
//!
//! Usage:
//!   atlas inspect <seed> [--node ID]
//!   atlas pack <seed> --focus a,b [--target-tokens N] [--capsule ID]
//!   atlas mcp [--transport stdio]

use clap::{Parser, Subcommand};
use helios_atlas::{GraphSeed, NodeId, PackQuery};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "atlas",
    version,
    about = "In-memory knowledge graph with context pack assembly"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show node/edge counts for a seeded graph, or one node in full
    Inspect {
        /// Path to a JSON or YAML graph seed file
        seed: PathBuf,
        /// Show this node instead of the overview
        #[arg(long)]
        node: Option<String>,
    },
    /// Assemble a context pack for a set of focus nodes
    Pack {
        /// Path to a JSON or YAML graph seed file
        seed: PathBuf,
        /// Focus node IDs, in order
        #[arg(long, value_delimiter = ',', required = true)]
        focus: Vec<String>,
        /// Token budget (echoed in the pack; budgeting is not yet applied)
        #[arg(long, default_value_t = 2048)]
        target_tokens: u32,
        /// Correlation token echoed in the pack (generated when omitted)
        #[arg(long)]
        capsule: Option<String>,
    },
    /// Start the MCP (Model Context Protocol) server
    Mcp {
        /// Transport type (currently only stdio)
        #[arg(long, default_value = "stdio")]
        transport: String,
    },
}

fn load_seed(path: &PathBuf) -> Result<helios_atlas::Atlas, String> {
    let seed = GraphSeed::from_path(path).map_err(|e| format!("failed to load seed: {}", e))?;
    seed.build().map_err(|e| format!("failed to build graph: {}", e))
}

fn cmd_inspect(seed: &PathBuf, node: Option<&str>) -> i32 {
    let atlas = match load_seed(seed) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match node {
        Some(id) => match atlas.get_node(&NodeId::from(id)) {
            Ok(node) => {
                println!("{}", serde_json::to_string_pretty(node).unwrap_or_default());
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        None => {
            println!("atlas '{}': {} nodes, {} edges", atlas.name, atlas.node_count(), atlas.edge_count());
            println!("{:<40}  {:<12}  {:>9}", "NODE", "TYPE", "NEIGHBORS");
            println!("{}", "-".repeat(65));
            for node in atlas.nodes() {
                let neighbors = atlas
                    .neighbors(&node.id, None)
                    .map(|n| n.len())
                    .unwrap_or(0);
                println!("{:<40}  {:<12}  {:>9}", node.id, node.node_type, neighbors);
            }
            0
        }
    }
}

fn cmd_pack(seed: &PathBuf, focus: Vec<String>, target_tokens: u32, capsule: Option<String>) -> i32 {
    let atlas = match load_seed(seed) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let capsule = capsule.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let query = PackQuery::new(focus)
        .with_target_tokens(target_tokens)
        .with_capsule(capsule);
    match query.assemble(&atlas) {
        Ok(pack) => {
            println!("{}", serde_json::to_string_pretty(&pack).unwrap_or_default());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Inspect { seed, node } => cmd_inspect(&seed, node.as_deref()),
        Commands::Pack {
            seed,
            focus,
            target_tokens,
            capsule,
        } => cmd_pack(&seed, focus, target_tokens, capsule),
        Commands::Mcp { transport } => {
            if transport != "stdio" {
                eprintln!("error: only 'stdio' transport is currently supported");
                std::process::exit(1);
            }
            helios_atlas::mcp::run_mcp_server()
        }
    };
    std::process::exit(code);
}
