//! RunInsight — question classifier and stats server for runners.

use std::path::PathBuf;
use std::sync::Arc;

use runinsight_server::{build_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("RUNINSIGHT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_help() {
    println!("RunInsight — question classifier for runners");
    println!();
    println!("Usage: runinsight [command]");
    println!();
    println!("Commands:");
    println!("  (none)                   Start the server");
    println!("  classify <question...>   Classify a question and print the result");
    println!("  help                     Show this help message");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "classify" => {
                if args.len() < 3 {
                    eprintln!("Usage: runinsight classify <question...>");
                    std::process::exit(1);
                }
                let question = args[2..].join(" ");
                let result = runinsight_classify::classify(&question)?;
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'runinsight help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = runinsight_core::ServiceConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = runinsight_store::QuestionStore::open(&config.data_paths.database)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;

    let state = Arc::new(AppState::new(config, store));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("RunInsight server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
