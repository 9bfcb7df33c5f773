//! Error type shared by all API handlers.
//!
//! Maps the failure taxonomy onto HTTP statuses. Database failures are
//! logged and surfaced with the underlying message so the frontend can show
//! what went wrong during development.

use axum::{http::StatusCode, response::IntoResponse};
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// A referenced entity does not exist.
    NotFound(&'static str),
    /// Credential lookup or password verification failed.
    Unauthorized(&'static str),
    /// The account exists but is disabled.
    Forbidden(&'static str),
    /// A uniqueness rule was violated.
    Conflict(&'static str),
    /// Any data-access failure.
    Database(sqlx::Error),
    /// Invalid stored state (e.g. a malformed password hash).
    Internal(anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message)
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::Conflict(message) => f.write_str(message),
            Self::Database(err) => write!(f, "{err}"),
            Self::Internal(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            Self::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message).into_response(),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, message).into_response(),
            // Duplicate-name creation is reported as a client error, matching
            // the contract the frontend already depends on.
            Self::Conflict(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::Database(err) => {
                error!("Database error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
            Self::Internal(err) => {
                error!("Internal error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

/// SQLSTATE 23505: the storage-level backstop for check-then-insert races.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::NotFound("x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Unauthorized("x").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x").into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Conflict("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
