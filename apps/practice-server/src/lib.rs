pub mod config;
pub mod error;
pub mod models;
pub mod remote;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::remote::{HttpVocabularyApi, VocabularyApi};
use crate::services::sessions::SessionRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn VocabularyApi>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(api: Arc<dyn VocabularyApi>, config: &Config) -> Self {
        let sessions = SessionRegistry::new(
            api.clone(),
            config.stats_flush_interval,
            config.session_idle_timeout,
            config.session_seed,
        );
        Self {
            api,
            sessions: Arc::new(sessions),
        }
    }
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Card routes
        .route("/api/cards", get(routes::cards::list))
        .route("/api/groups", get(routes::cards::groups))
        .route("/api/groups/{name}", put(routes::groups::rename))
        // Selection routes
        .route("/api/selections", post(routes::selections::create))
        .route(
            "/api/selections/{id}",
            get(routes::selections::get).delete(routes::selections::delete),
        )
        .route("/api/selections/{id}/toggle", post(routes::selections::toggle))
        .route(
            "/api/selections/{id}/toggle-group",
            post(routes::selections::toggle_group),
        )
        .route("/api/selections/{id}/clear", post(routes::selections::clear))
        // Session routes
        .route("/api/sessions", post(routes::sessions::start))
        .route(
            "/api/sessions/{id}",
            get(routes::sessions::get).delete(routes::sessions::end),
        )
        .route("/api/sessions/{id}/flip", post(routes::sessions::flip))
        .route("/api/sessions/{id}/next", post(routes::sessions::next))
        .route("/api/sessions/{id}/previous", post(routes::sessions::previous))
        .route("/api/sessions/{id}/shuffle", post(routes::sessions::shuffle))
        .route("/api/sessions/{id}/skip", post(routes::sessions::skip))
        .route("/api/sessions/{id}/submit", post(routes::sessions::submit))
        // Stats routes
        .route(
            "/api/stats",
            get(routes::stats::get).delete(routes::stats::reset),
        )
        .layer(middleware::from_fn(routes::auth::auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Using vocabulary API at {}", config.vocab_api_url);
    if let Some(seed) = config.session_seed {
        tracing::info!("Sessions use fixed seed {}", seed);
    }

    let api: Arc<dyn VocabularyApi> =
        Arc::new(HttpVocabularyApi::new(config.vocab_api_url.clone()));
    let app = build_router(AppState::new(api, &config));

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
