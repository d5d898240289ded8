/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Router layout
///
/// ```text
/// /
/// ├── /health                  # Health check (public)
/// └── /v1/                     # API v1 (versioned)
///     ├── /auth/               # Authentication endpoints (public)
///     │   ├── POST /register
///     │   └── POST /login
///     └── /employees           # Employee CRUD (session required)
///         ├── POST   /
///         ├── GET    /
///         ├── PUT    /
///         └── DELETE /
/// ```
///
/// The session middleware rejects unauthenticated requests to /v1/employees
/// before any handler (and therefore any resource lookup) runs.

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use chrono::Duration;
use crate::config::Config;
use sqlx::PgPool;
use staffdesk_shared::auth::middleware::session_auth_middleware;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; Arc keeps the clone
/// cheap. The signing secret lives here, read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }

    /// Gets the configured session token lifetime
    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.config.session.token_ttl_hours)
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Employee routes (require a valid session token)
    let secret = state.session_secret().to_string();
    let employee_routes = Router::new()
        .route(
            "/",
            post(routes::employees::create_employee)
                .get(routes::employees::list_employees)
                .put(routes::employees::update_employee)
                .delete(routes::employees::delete_employee),
        )
        .layer(axum::middleware::from_fn(move |req, next| {
            session_auth_middleware(secret.clone(), req, next)
        }));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/employees", employee_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
