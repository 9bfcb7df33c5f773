use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;

use crate::conserje::storage;

use super::types::TipoHabOut;

#[utoipa::path(
    get,
    path = "/tipoHab",
    responses(
        (status = 200, description = "Room types, capped at 10 rows", body = [TipoHabOut]),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "tipos-hab"
)]
pub async fn list_tipos_hab(pool: Extension<PgPool>) -> impl IntoResponse {
    match storage::list_tipos_hab(&pool).await {
        Ok(tipos) => (StatusCode::OK, Json(tipos)).into_response(),
        Err(err) => err.into_response(),
    }
}
