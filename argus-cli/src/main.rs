//! argus-cli — analyst frontend for the Argus knowledge-graph service
//!
//! Talks to the Argus HTTP API and renders pathways, subgraphs, and
//! analysis reports as terminal text (or raw JSON with `--json`).
//!
//! # Subcommands
//! - `path <from> <to> [--json]`        — pathways between two nodes
//! - `explore <node> [--depth N] [--json]` — neighborhood of a node
//! - `topic <query>`                     — structured topic overview
//! - `whatif <query>`                    — what-if scenario analysis
//! - `status`                            — show server health

use clap::{Parser, Subcommand};
use serde::Deserialize;

const DEFAULT_SERVER: &str = "http://127.0.0.1:8021";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "argus-cli",
    version,
    about = "Argus knowledge-graph pathway and analysis CLI"
)]
struct Cli {
    /// Argus HTTP server URL (overrides ARGUS_HTTP_URL env var)
    #[arg(long, env = "ARGUS_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find pathways between two nodes
    Path {
        /// Start node (entity name)
        from: String,

        /// End node (entity name)
        to: String,

        /// Output the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Explore the neighborhood of a node
    Explore {
        /// Node to explore (entity name)
        node: String,

        /// Neighborhood depth (0 = direct neighbors)
        #[arg(long, default_value_t = 0)]
        depth: u32,

        /// Output the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Structured topic overview
    Topic {
        /// Topic to analyze
        query: String,
    },

    /// What-if scenario analysis
    Whatif {
        /// Scenario to analyze
        query: String,
    },

    /// Show Argus server status
    Status,
}

// ============================================================================
// API Response Types
// ============================================================================

/// One pathway from POST /get-path-between-nodes
#[derive(Debug, Deserialize)]
pub struct PathwayDto {
    pub path_nodes: Vec<String>,
    pub path_labels: Vec<String>,
}

/// The full pathway response
#[derive(Debug, Deserialize)]
pub struct PathResponse {
    pub node_from: String,
    pub node_to: String,
    pub count: usize,
    pub paths: Vec<PathwayDto>,
}

// ============================================================================
// Rendering
// ============================================================================

/// Render one pathway as an indented node/relationship chain:
///
/// ```text
/// Pathway 1:
///   1
///     └─ INCLUDES
///   8
/// ```
pub fn format_pathway(index: usize, pathway: &PathwayDto) -> String {
    let mut out = format!("Pathway {}:\n", index + 1);
    for (i, node) in pathway.path_nodes.iter().enumerate() {
        out.push_str(&format!("  {}\n", node));
        if let Some(label) = pathway.path_labels.get(i) {
            out.push_str(&format!("    └─ {}\n", label));
        }
    }
    out
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Path { from, to, json } => do_path(&cli.server, &from, &to, json),
        Commands::Explore { node, depth, json } => do_explore(&cli.server, &node, depth, json),
        Commands::Topic { query } => do_analysis(&cli.server, "/api/topic-overview", &query),
        Commands::Whatif { query } => do_analysis(&cli.server, "/api/whatif", &query),
        Commands::Status => do_status(&cli.server),
    }
}

// ============================================================================
// HTTP Client Calls
// ============================================================================

fn http_client(timeout_secs: u64) -> anyhow::Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?)
}

fn post_json(
    server: &str,
    endpoint: &str,
    body: serde_json::Value,
    timeout_secs: u64,
) -> anyhow::Result<serde_json::Value> {
    let client = http_client(timeout_secs)?;
    let url = format!("{}{}", server.trim_end_matches('/'), endpoint);

    let resp = match client.post(&url).json(&body).send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("argus-cli: connection failed to {}: {}", url, e);
            std::process::exit(1);
        }
    };

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        eprintln!("argus-cli: server returned {}: {}", status, body);
        std::process::exit(1);
    }

    match resp.json() {
        Ok(v) => Ok(v),
        Err(e) => {
            eprintln!("argus-cli: failed to parse response: {}", e);
            std::process::exit(1);
        }
    }
}

/// Find and render pathways between two nodes.
fn do_path(server: &str, from: &str, to: &str, json_output: bool) -> anyhow::Result<()> {
    let body = serde_json::json!({ "node_from": from, "node_to": to });
    let value = post_json(server, "/get-path-between-nodes", body, 30)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let resp: PathResponse = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("argus-cli: unexpected pathway response: {}", e);
            std::process::exit(1);
        }
    };

    if resp.paths.is_empty() {
        eprintln!("No pathways found between {} and {}", resp.node_from, resp.node_to);
        return Ok(());
    }

    println!(
        "{} pathway(s) from {} to {}:\n",
        resp.count, resp.node_from, resp.node_to
    );
    for (i, pathway) in resp.paths.iter().enumerate() {
        println!("{}", format_pathway(i, pathway));
    }

    Ok(())
}

/// Explore and render the neighborhood of a node.
fn do_explore(server: &str, node: &str, depth: u32, json_output: bool) -> anyhow::Result<()> {
    let body = serde_json::json!({ "node_start": node, "depth": depth });
    let value = post_json(server, "/retrieve-subgraph", body, 30)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let nodes = value["nodes"].as_array().cloned().unwrap_or_default();
    let edges = value["edges"].as_array().cloned().unwrap_or_default();

    if nodes.is_empty() {
        eprintln!("No node named {} in the graph", node);
        return Ok(());
    }

    println!("Nodes:");
    for n in &nodes {
        println!(
            "  {} [{}]",
            n["label"].as_str().unwrap_or("?"),
            n["group"].as_str().unwrap_or("-")
        );
        if let Some(desc) = n["description"].as_str() {
            if !desc.is_empty() {
                println!("    {}", desc);
            }
        }
    }

    println!("\nEdges:");
    for e in &edges {
        println!(
            "  {} → {} ({})",
            e["from_label"].as_str().unwrap_or("?"),
            e["to_label"].as_str().unwrap_or("?"),
            e["label"].as_str().unwrap_or("-")
        );
    }

    Ok(())
}

/// Run an analysis query and pretty-print the structured reply.
fn do_analysis(server: &str, endpoint: &str, query: &str) -> anyhow::Result<()> {
    // Analysis calls go through the LLM service; allow a longer timeout
    let body = serde_json::json!({ "query": query });
    let value = post_json(server, endpoint, body, 120)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Show the server status by calling GET /health.
fn do_status(server: &str) -> anyhow::Result<()> {
    let client = http_client(10)?;
    let url = format!("{}/health", server.trim_end_matches('/'));
    let resp = client.get(&url).send();

    match resp {
        Ok(r) if r.status().is_success() => {
            let body: serde_json::Value = r.json().unwrap_or_default();
            println!("Argus server: {}", body["status"].as_str().unwrap_or("unknown"));
            println!("Version:      {}", body["version"].as_str().unwrap_or("?"));
            println!("Nodes:        {}", body["nodes"]);
            println!("Edges:        {}", body["edges"]);
            println!("LLM backend:  {}", body["llm_backend"].as_str().unwrap_or("?"));
            println!("Socket:       {}", body["socket"].as_str().unwrap_or("?"));
        }
        Ok(r) => {
            let status = r.status();
            eprintln!("argus-cli: server unhealthy (HTTP {})", status);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("argus-cli: cannot reach {} — {}", url, e);
            std::process::exit(1);
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
