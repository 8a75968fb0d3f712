//! SmartCAPTCHA Verification Server
//!
//! Serves the decision engine to the widget over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 SMARTCAPTCHA SERVER                  │
//! ├──────────────────────────────────────────────────────┤
//! │   widget ──POST /verify──▶ ┌────────────────────┐    │
//! │                            │   API (Axum)       │    │
//! │                            └─────────┬──────────┘    │
//! │                                      ▼               │
//! │                            ┌────────────────────┐    │
//! │                            │  DecisionEngine    │    │
//! │                            │  gate → model      │    │
//! │                            └────────────────────┘    │
//! └──────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use smartcaptcha_core::{load_or_fallback, DecisionEngine, RuleGate};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "smartcaptcha_core=info,captcha_server=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("SmartCAPTCHA server starting...");

    let thresholds = config.thresholds()?;
    tracing::info!(
        policy = %thresholds.policy,
        threshold = thresholds.threshold,
        "Decision policy configured"
    );

    let classifier = load_or_fallback(&config.model_path);
    if classifier.is_none() {
        tracing::warn!(
            "No classifier at {}; non-blocked samples get the fallback verdict",
            config.model_path
        );
    }

    let engine = DecisionEngine::new(RuleGate::default(), classifier, thresholds)?;

    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
    pub config: config::Config,
}

/// Create the router with all routes
fn create_router(state: AppState) -> Router {
    // The widget is embedded on arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/verify", post(handlers::verify::verify))
        .route("/api/v1/engine/status", get(handlers::status::engine_status))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
