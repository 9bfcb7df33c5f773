use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;

use crate::conserje::storage;

use super::types::{HabitacionIn, HabitacionOut};

#[utoipa::path(
    get,
    path = "/habitaciones/{hotel_id}",
    params(("hotel_id" = i32, Path, description = "Hotel identity key")),
    responses(
        (status = 200, description = "Rooms of one hotel, each with its room type", body = [HabitacionOut]),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "habitaciones"
)]
pub async fn list_habitaciones(
    Path(hotel_id): Path<i32>,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    match storage::list_habitaciones(&pool, hotel_id).await {
        Ok(habitaciones) => (StatusCode::OK, Json(habitaciones)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/nueva-habitacion",
    request_body = HabitacionIn,
    responses(
        (status = 201, description = "Room created", body = HabitacionOut),
        (status = 404, description = "Referenced hotel does not exist", body = String),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "habitaciones"
)]
pub async fn create_habitacion(
    pool: Extension<PgPool>,
    payload: Option<Json<HabitacionIn>>,
) -> impl IntoResponse {
    let habitacion: HabitacionIn = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match storage::insert_habitacion(&pool, &habitacion).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => err.into_response(),
    }
}
