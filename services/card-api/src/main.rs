//! Weather card API service.
//!
//! Serves PNG weather cards for `/{city}` and `/{city}/{country}`.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{extract::Extension, routing::get};
use clap::Parser;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use card_api::config::CardConfig;
use card_api::handlers;
use card_api::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "card-api")]
#[command(about = "Weather card PNG server")]
struct Args {
    /// Listen address
    #[arg(short, long, env = "CARD_LISTEN_ADDR", default_value = "0.0.0.0:5050")]
    listen: String,

    /// Log level or filter directives
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long)]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        info!("Configuring tokio runtime with {} worker threads", threads);
        runtime_builder.worker_threads(threads);
    } else if let Ok(threads_str) = env::var("TOKIO_WORKER_THREADS") {
        if let Ok(threads) = threads_str.parse::<usize>() {
            info!("Configuring tokio runtime with {} worker threads (from env)", threads);
            runtime_builder.worker_threads(threads);
        }
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics exporter initialized");

    let config = CardConfig::from_env()?;
    info!(
        cache_dir = %config.cache_dir.display(),
        assets_dir = %config.assets_dir.display(),
        default_country = %config.default_country,
        ttl_secs = config.cache_ttl.as_secs(),
        "Starting weather card server"
    );

    let state = Arc::new(AppState::new(config)?);
    if !state.fonts.has_faces() {
        tracing::warn!("No fonts loaded; cards will be drawn without text");
    }

    let app = handlers::router(state)
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(prometheus_handle))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address {:?}", args.listen))?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
