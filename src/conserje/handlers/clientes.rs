use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;

use crate::conserje::storage;

use super::types::{ClienteIn, ClienteOut};

#[utoipa::path(
    get,
    path = "/clientes",
    responses(
        (status = 200, description = "Clients, capped at 10 rows", body = [ClienteOut]),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "clientes"
)]
pub async fn list_clientes(pool: Extension<PgPool>) -> impl IntoResponse {
    match storage::list_clientes(&pool).await {
        Ok(clientes) => (StatusCode::OK, Json(clientes)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/nuevo-cliente",
    request_body = ClienteIn,
    responses(
        (status = 200, description = "Client created", body = ClienteOut),
        (status = 500, description = "Data-access failure", body = String),
    ),
    tag = "clientes"
)]
pub async fn create_cliente(
    pool: Extension<PgPool>,
    payload: Option<Json<ClienteIn>>,
) -> impl IntoResponse {
    let cliente: ClienteIn = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match storage::insert_cliente(&pool, &cliente).await {
        Ok(created) => (StatusCode::OK, Json(created)).into_response(),
        Err(err) => err.into_response(),
    }
}
