use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;

use crate::conserje::storage;

use super::types::{ReservaIn, ReservaOut};

#[utoipa::path(
    get,
    path = "/reservas",
    responses(
        (status = 200, description = "Reservations with nested entities, capped at 10 rows", body = [ReservaOut]),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "reservas"
)]
pub async fn list_reservas(pool: Extension<PgPool>) -> impl IntoResponse {
    match storage::list_reservas(&pool).await {
        Ok(reservas) => (StatusCode::OK, Json(reservas)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/nueva-reserva",
    request_body = ReservaIn,
    responses(
        (status = 201, description = "Reservation created, returned with nested entities", body = ReservaOut),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "reservas"
)]
pub async fn create_reserva(
    pool: Extension<PgPool>,
    payload: Option<Json<ReservaIn>>,
) -> impl IntoResponse {
    let reserva: ReservaIn = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match storage::insert_reserva(&pool, &reserva).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => err.into_response(),
    }
}
