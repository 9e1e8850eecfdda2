use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::json;

use crate::db;
use crate::error::AppError;
use crate::state::SharedState;
use crate::submit::{fields, parser};

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let content_type = headers.get("content-type").and_then(|v| v.to_str().ok());

    let raw = parser::parse_body(content_type, &body).map_err(AppError::BadRequest)?;

    // Validation completes fully before the store is touched.
    let fields = fields::extract(&raw)?;

    let id = db::submissions::insert(&state.pool, &fields.name, &fields.value).await?;

    tracing::info!(id, name = %fields.name, "submission stored");

    Ok(Json(json!({
        "message": "Data submitted successfully!",
        "id": id,
        "data": { "name": fields.name, "value": fields.value },
    })))
}
