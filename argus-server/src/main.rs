use std::sync::Arc;

use argus_core::llm::HttpLlmClient;
use argus_core::ArgusConfig;
use clap::Parser;
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use argus_server::router::AppState;
use argus_server::{http, server};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "argus.toml")]
    config: String,

    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Init logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Load config
    let config = match ArgusConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // Load the knowledge graph
    let (store, report) = match argus_ingest::load_graph(&config.graph.data_file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!(
                "Failed to load knowledge graph from {}: {}",
                config.graph.data_file, e
            );
            std::process::exit(1);
        }
    };

    if args.health {
        println!("✅ Knowledge graph loaded: {} nodes, {} edges", report.nodes, report.edges);
        if report.skipped > 0 {
            println!("⚠️  Skipped {} malformed extraction records", report.skipped);
        }
        println!("✅ Argus health check passed");
        return Ok(());
    }

    let llm = match HttpLlmClient::new(config.llm.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create LLM client: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        store: Arc::new(store),
        config: config.clone(),
        llm: Arc::new(llm),
    };

    // Shutdown plumbing
    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    // Spawn HTTP REST API server if enabled
    if config.http.enabled {
        let http_state = state.clone();
        let http_shutdown = tx.subscribe();
        tokio::spawn(async move {
            if let Err(e) = http::start_http_server(http_state, http_shutdown).await {
                tracing::error!("HTTP server error: {}", e);
            }
        });
    }

    let socket_path = config.service.socket_path.clone();
    server::run_unix_server(&socket_path, state, tx.subscribe()).await?;

    Ok(())
}
