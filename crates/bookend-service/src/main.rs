//! Bookend Service - HTTP REST facade and search proxy.
//!
//! Run with: `cargo run -p bookend-service`

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use bookend_client::{MemoryStore, RecordStore, RestStore};
use bookend_service::{AppState, BookSearchProvider, Config, StoreBackend, api};

/// Bookend Service - HTTP REST facade for the reading log.
#[derive(Parser, Debug)]
#[command(name = "bookend-service")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config).
    #[arg(short, long)]
    bind: Option<String>,

    /// External store base URL (overrides config, selects the REST backend).
    #[arg(short, long)]
    store_url: Option<String>,

    /// Use the in-memory store regardless of config.
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bookend_service=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default().unwrap_or_default(),
    };

    // Override config with CLI args
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(url) = args.store_url {
        config.store.backend = StoreBackend::Rest;
        config.store.base_url = url;
    }
    if args.memory {
        config.store.backend = StoreBackend::Memory;
    }
    config.validate()?;

    // Open the record store
    let store: Arc<dyn RecordStore> = match config.store.backend {
        StoreBackend::Rest => {
            info!("Using external record store at {}", config.store.base_url);
            Arc::new(RestStore::new(&config.store.base_url)?)
        }
        StoreBackend::Memory => {
            info!("Using in-memory record store (data is not persisted)");
            Arc::new(MemoryStore::new())
        }
    };

    // Search provider, if credentials are present
    let search = BookSearchProvider::from_env(&config.search);
    if search.is_none() {
        info!("Search credentials not set; /api/search will report unconfigured");
    }

    let state = AppState::new(store, search);

    // Build the router
    let app = Router::new()
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
