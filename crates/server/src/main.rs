use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filmoteka_core::{
    load_config, seed_from_file, validate_config, GenreResolver, MovieStore, SqliteMovieStore,
};
use filmoteka_server::api::create_router;
use filmoteka_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("FILMOTEKA_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.database.path);

    // Compile the genre table once; handlers only resolve labels
    let genres =
        GenreResolver::new(&config.genres).context("Failed to compile genre patterns")?;
    info!("Compiled {} genre patterns", config.genres.len());

    // Open the movie store
    let store: Arc<dyn MovieStore> = Arc::new(
        SqliteMovieStore::new(&config.database.path).context("Failed to open movie store")?,
    );
    info!("Movie store initialized");

    // Seed an empty store if a seed file is configured
    if let Some(seed_path) = &config.database.seed_path {
        let added = seed_from_file(store.as_ref(), seed_path)
            .with_context(|| format!("Failed to seed movie store from {:?}", seed_path))?;
        if added > 0 {
            info!("Seeded {} movie records from {:?}", added, seed_path);
        }
    }

    // Create app state and router
    let state = Arc::new(AppState::new(store, genres));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
