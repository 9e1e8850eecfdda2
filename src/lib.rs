pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod submit;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use sqlx::MySqlPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{AllowedOrigin, Config};
use crate::state::{AppState, SharedState};

const MAX_BODY_SIZE: usize = 1024 * 1024;

pub fn build_app(pool: MySqlPool, config: Config) -> Router {
    let cors = cors_layer(&config.allowed_origin);

    let state: SharedState = Arc::new(AppState { pool, config });

    // The allowed-methods and allowed-headers lists are fixed and go out
    // on every response, preflight or not.
    Router::new()
        .merge(routes::routes())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// One CORS policy for the whole router. Preflight OPTIONS requests are
/// answered here and never reach the handlers.
fn cors_layer(origin: &AllowedOrigin) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match origin {
        AllowedOrigin::Any => layer.allow_origin(Any),
        AllowedOrigin::Exact(value) => layer.allow_origin(value.clone()),
    }
}
