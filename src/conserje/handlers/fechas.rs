use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;

use crate::conserje::storage;

use super::types::{FechaIn, FechaOut};

#[utoipa::path(
    get,
    path = "/fechas",
    responses(
        (status = 200, description = "Calendar dates, capped at 10 rows", body = [FechaOut]),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "fechas"
)]
pub async fn list_fechas(pool: Extension<PgPool>) -> impl IntoResponse {
    match storage::list_fechas(&pool).await {
        Ok(fechas) => (StatusCode::OK, Json(fechas)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/nueva-fecha",
    request_body = FechaIn,
    responses(
        (status = 200, description = "Existing or newly created date", body = FechaOut),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "fechas"
)]
pub async fn create_fecha(
    pool: Extension<PgPool>,
    payload: Option<Json<FechaIn>>,
) -> impl IntoResponse {
    let fecha: FechaIn = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match storage::get_or_create_fecha(&pool, &fecha).await {
        Ok(row) => (StatusCode::OK, Json(row)).into_response(),
        Err(err) => err.into_response(),
    }
}
