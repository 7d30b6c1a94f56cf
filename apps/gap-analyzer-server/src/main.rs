//! Clinical Gap Analyzer Server
//!
//! Scores clinical trial protocols and SOPs against regulatory checklists
//! (ISO 14155, FDA 21 CFR Part 812, ICH GCP, Declaration of Helsinki) and
//! reports per-requirement verdicts with an overall audit readiness tier.
//! Provides REST API endpoints for:
//!
//! - Checklist listing
//! - Document classification
//! - Batch gap analysis as JSON or Markdown
//!
//! Uploaded documents are never stored; every request is scored in a
//! single pass and discarded.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use checklist_engine::{load_definitions, ChecklistRegistry};

mod api;
mod error;
mod render;
mod state;
#[cfg(test)]
mod tests;

use api::{
    handle_analyze, handle_classify, handle_health, handle_list_checklists, handle_report,
};
pub use state::AppState;

/// Command-line arguments for the gap analyzer server
#[derive(Parser, Debug)]
#[command(name = "gap-analyzer-server")]
#[command(about = "Keyword-heuristic compliance gap analysis for clinical trial documents")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "GAP_ANALYZER_PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "GAP_ANALYZER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "GAP_ANALYZER_RATE_LIMIT", default_value = "10")]
    rate_limit: u32,

    /// Largest decoded document accepted, in bytes
    #[arg(long, env = "GAP_ANALYZER_MAX_UPLOAD_BYTES", default_value = "10485760")]
    max_upload_bytes: usize,

    /// Largest request body accepted, in bytes
    #[arg(long, env = "GAP_ANALYZER_MAX_BODY_BYTES", default_value = "33554432")]
    max_body_bytes: usize,

    /// Standards scored when a request names none (default: all)
    #[arg(long, env = "GAP_ANALYZER_STANDARDS", value_delimiter = ',')]
    standards: Vec<String>,

    /// JSON file with extra checklists to register
    #[arg(long, env = "GAP_ANALYZER_CHECKLISTS")]
    checklists: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the API router without transport-level middleware
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/checklists", get(handle_list_checklists))
        .route("/api/classify", post(handle_classify))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/report", post(handle_report))
        .with_state(state)
}

/// Built-in catalog plus any checklists from `path`.
///
/// Invalid definitions abort startup.
fn load_registry(path: Option<&PathBuf>) -> anyhow::Result<ChecklistRegistry> {
    let builtin = ChecklistRegistry::builtin();
    let Some(path) = path else {
        return Ok(builtin.clone());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read checklists from {}", path.display()))?;
    let extra = load_definitions(&json)
        .with_context(|| format!("Invalid checklists in {}", path.display()))?;
    info!("Loaded {} extra checklist(s) from {}", extra.len(), path.display());

    Ok(builtin.extend(extra)?)
}

/// Per-IP burst allowance: twice the sustained rate
fn burst_size(rate_limit: u32) -> u32 {
    rate_limit.saturating_mul(2)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gap analyzer server on {}:{}", args.host, args.port);

    let registry = load_registry(args.checklists.as_ref())?;
    let state = AppState::new(registry, &args.standards, args.max_upload_bytes)?;
    info!("Checklists: {:?}", state.registry.keys());
    info!("Default selection: {:?}", state.default_standards);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(burst_size(args.rate_limit))
            .finish()
            .ok_or_else(|| anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Apply middleware
    let router = app(state)
        .layer(DefaultBodyLimit::max(args.max_body_bytes))
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
