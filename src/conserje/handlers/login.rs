use anyhow::anyhow;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::conserje::error::ApiError;
use crate::conserje::storage;

use super::types::{LoginRequest, LoginResponse};

const MSG_USUARIO_NO_ENCONTRADO: &str = "Usuario no encontrado";
const MSG_CONTRASENA_INCORRECTA: &str = "Contraseña incorrecta";
const MSG_USUARIO_INACTIVO: &str = "Usuario inactivo";
const MSG_LOGIN_EXITOSO: &str = "Inicio de sesión exitoso";

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Unknown user or wrong password", body = String),
        (status = 403, description = "Account disabled", body = String),
    ),
    tag = "login"
)]
#[instrument(skip(pool, payload))]
pub async fn login(
    pool: Extension<PgPool>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match check_credentials(&pool, &request.usuario, &request.contrasena).await {
        Ok(response) => {
            debug!("Login successful for {}", request.usuario);

            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// The single-check login gate: no session or token is issued; a successful
/// result only proves the credential was valid at this instant.
pub async fn check_credentials(
    pool: &PgPool,
    usuario: &str,
    contrasena: &str,
) -> Result<LoginResponse, ApiError> {
    let Some(credencial) = storage::fetch_credencial(pool, usuario).await? else {
        return Err(ApiError::Unauthorized(MSG_USUARIO_NO_ENCONTRADO));
    };

    let parsed = PasswordHash::new(&credencial.password_hash)
        .map_err(|err| ApiError::Internal(anyhow!("invalid stored password hash: {err}")))?;

    if Argon2::default()
        .verify_password(contrasena.as_bytes(), &parsed)
        .is_err()
    {
        return Err(ApiError::Unauthorized(MSG_CONTRASENA_INCORRECTA));
    }

    if !credencial.estado {
        return Err(ApiError::Forbidden(MSG_USUARIO_INACTIVO));
    }

    Ok(LoginResponse {
        mensaje: MSG_LOGIN_EXITOSO.to_string(),
        rol: credencial.rol,
        emp_key: credencial.emp_key,
    })
}
