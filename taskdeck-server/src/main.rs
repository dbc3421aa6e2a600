//! Taskdeck API server -- small REST CRUD service for task records.
//!
//! An axum HTTP server exposing the `/todos` endpoints over a JSON
//! document store. The store file is optional: without one the server
//! runs fully in memory.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:5000
//! cargo run --bin taskdeck-server
//!
//! # Run on custom address with an explicit store file
//! cargo run --bin taskdeck-server -- --bind 127.0.0.1:8080 \
//!     --store-path /tmp/tasks.json
//!
//! # Or via environment variables
//! TASKDECK_ADDR=127.0.0.1:8080 cargo run --bin taskdeck-server
//! ```

use std::sync::Arc;

use clap::Parser;
use taskdeck_server::api::{self, AppState};
use taskdeck_server::config::{ServerCliArgs, ServerConfig};
use taskdeck_server::store::TaskStore;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting taskdeck server");

    // A store that cannot be opened is logged, not fatal: the server comes
    // up empty and keeps persisting to the configured path.
    let store = match config.store_path {
        Some(path) => match TaskStore::open(path.clone()) {
            Ok(store) => {
                tracing::info!(path = %path.display(), "task store opened");
                store
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to open task store, starting empty"
                );
                TaskStore::with_path(path)
            }
        },
        None => {
            tracing::info!("no store path configured, running in memory");
            TaskStore::in_memory()
        }
    };

    let state = Arc::new(AppState::new(store));

    match api::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start server");
            std::process::exit(1);
        }
    }
}
