use anyhow::Context;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

mod config;
mod db;
mod error;
mod handlers;
mod models;

use crate::config::Config;

/// Shared application state — cheap to clone (the pool is Arc-backed).
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_service=debug".parse().unwrap()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    // Connect-or-fail before the listener binds, so no request can observe an
    // uninitialized database handle.
    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(&config.database_url)
        .await?;
    info!("Database connection pool established.");

    info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations complete.");

    let state = AppState { db: pool };
    let app = build_router(state, cors_layer(&config)?);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Catalog service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Products ────────────────────────────────────────────────────────
        .route(
            "/collections/products",
            get(handlers::products::list_products),
        )
        // Legacy alias kept for existing frontends
        .route(
            "/collections/courses",
            get(handlers::products::list_products),
        )
        .route(
            "/collections/products/search",
            get(handlers::products::list_products),
        )
        .route(
            "/collections/products/update-availability",
            put(handlers::products::update_availability),
        )
        .route(
            "/collections/products/title/:title",
            delete(handlers::products::delete_product),
        )

        // ── Orders ──────────────────────────────────────────────────────────
        .route("/collections/orders", post(handlers::orders::create_order))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Restrict CORS to the configured origins; an empty list means fully open.
fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    if config.allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid origin in ALLOWED_ORIGINS: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}
