use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;

use crate::conserje::storage;

use super::types::PagoOut;

#[utoipa::path(
    get,
    path = "/pagos",
    responses(
        (status = 200, description = "All payment methods", body = [PagoOut]),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "pagos"
)]
pub async fn list_pagos(pool: Extension<PgPool>) -> impl IntoResponse {
    match storage::list_pagos(&pool).await {
        Ok(pagos) => (StatusCode::OK, Json(pagos)).into_response(),
        Err(err) => err.into_response(),
    }
}
