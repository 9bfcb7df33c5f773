use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;

use crate::conserje::storage;

use super::types::CanalReservaOut;

#[utoipa::path(
    get,
    path = "/canal-reservas",
    responses(
        (status = 200, description = "All booking channels", body = [CanalReservaOut]),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "canales"
)]
pub async fn list_canales(pool: Extension<PgPool>) -> impl IntoResponse {
    match storage::list_canales(&pool).await {
        Ok(canales) => (StatusCode::OK, Json(canales)).into_response(),
        Err(err) => err.into_response(),
    }
}
