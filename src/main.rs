use anyhow::{Context, Result};
use clap::Parser;
use speech_citations::{
    create_router, AppState, Config, InMemoryRecordStore, RecordStore, SpeechDbGateway,
};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[derive(Debug, Parser)]
#[command(about = "Read-only citation and transcript API over the speech databases")]
struct Args {
    /// Config file (extension optional)
    #[arg(long, default_value = "config/speech-citations")]
    config: String,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Serve the built-in sample dataset instead of the real stores
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config).context("Failed to load configuration")?;

    if let Some(bind) = args.bind {
        cfg.service.http.bind = bind;
    }
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn RecordStore> = if args.demo {
        info!("Demo mode: serving the in-memory sample dataset");
        Arc::new(InMemoryRecordStore::demo())
    } else {
        info!(
            "Chunks: {}.{}, documents: {} ({}, {}, {})",
            cfg.speech.mongodb_database,
            cfg.speech.chunks_container,
            cfg.speech.cosmosdb_database,
            cfg.speech.files_container,
            cfg.speech.phrases_container,
            cfg.speech.summaries_container
        );
        Arc::new(SpeechDbGateway::new(&cfg.speech))
    };

    let app = create_router(AppState::new(store, cfg.service.request_timeout()));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
