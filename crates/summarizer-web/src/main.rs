use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use summarizer_core::Summarizer;
use summarizer_core::config_file::resolve_config;
use summarizer_pdf_mupdf::MupdfBackend;

mod handlers;
mod models;
mod state;
mod upload;

use state::AppState;

const DEFAULT_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = resolve_config();
    if config.api_key.is_none() {
        tracing::warn!("HF_API_KEY is not set; oracle requests will be unauthenticated");
    }
    tracing::debug!(?config, "configuration resolved");

    let backend = MupdfBackend::new().with_tolerances(config.x_tolerance, config.y_tolerance);
    let summarizer = Summarizer::from_config(config)?;

    let state = Arc::new(AppState {
        summarizer: Arc::new(summarizer),
        backend: Arc::new(backend),
    });

    let addr: SocketAddr = std::env::var("SUMMARIZER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub(crate) fn build_router(state: Arc<AppState>) -> axum::Router {
    // Allow large file uploads (500MB)
    let body_limit = axum::extract::DefaultBodyLimit::max(500 * 1024 * 1024);

    axum::Router::new()
        .route(
            "/summarize_pdf/",
            axum::routing::post(handlers::summarize::summarize_pdf),
        )
        .layer(body_limit)
        .with_state(state)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
