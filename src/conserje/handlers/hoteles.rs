use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;

use crate::conserje::storage;

use super::types::{HotelIn, HotelOut};

#[utoipa::path(
    get,
    path = "/hoteles",
    responses(
        (status = 200, description = "All hotels", body = [HotelOut]),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "hoteles"
)]
pub async fn list_hoteles(pool: Extension<PgPool>) -> impl IntoResponse {
    match storage::list_hoteles(&pool).await {
        Ok(hoteles) => (StatusCode::OK, Json(hoteles)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/nuevo-hotel",
    request_body = HotelIn,
    responses(
        (status = 201, description = "Hotel created", body = HotelOut),
        (status = 400, description = "A hotel with that name already exists", body = String),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "hoteles"
)]
pub async fn create_hotel(
    pool: Extension<PgPool>,
    payload: Option<Json<HotelIn>>,
) -> impl IntoResponse {
    let hotel: HotelIn = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match storage::insert_hotel(&pool, &hotel).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => err.into_response(),
    }
}
