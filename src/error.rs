use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::auth::error::AuthError;

/// Errors returned from handlers. Response bodies only ever carry fixed text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "request body rejected");
        ApiError::Validation("Invalid request body")
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, *msg),
            ApiError::Auth(AuthError::DuplicateEmail) => {
                (StatusCode::CONFLICT, "Email already exists")
            }
            ApiError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            ApiError::Auth(AuthError::Unauthorized { .. }) => {
                (StatusCode::UNAUTHORIZED, "Not authenticated")
            }
            ApiError::Auth(AuthError::Internal(e)) => {
                error!(error = ?e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let mut response = (status, Json(ErrorBody { detail })).into_response();
        if matches!(self, ApiError::Auth(AuthError::Unauthorized { .. })) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
