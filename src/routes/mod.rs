pub mod submit;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(health))
        .route("/submit", post(submit::submit))
}

async fn health() -> &'static str {
    "Form submission service is running."
}
