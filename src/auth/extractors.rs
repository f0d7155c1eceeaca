use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::{
    auth::{error::AuthError, jwt::JwtKeys, repo::UserRepo, repo_types::User},
    error::ApiError,
    state::AppState,
};

/// Resolves a raw `Authorization` header value to the user it names.
///
/// Every rejection (no header, wrong scheme, bad token, user gone) is the same
/// [`AuthError::Unauthorized`]; the reason is only for logs.
pub async fn authenticate_request(
    auth_header: Option<&str>,
    keys: &JwtKeys,
    users: &dyn UserRepo,
) -> Result<User, AuthError> {
    let header = auth_header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(AuthError::unauthorized("missing authorization header"))?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or(AuthError::unauthorized("malformed authorization header"))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::unauthorized("unsupported auth scheme"));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::unauthorized("empty bearer token"));
    }

    let user_id = keys
        .validate(token)
        .map_err(|_| AuthError::unauthorized("invalid or expired token"))?;

    users
        .find_by_id(user_id)
        .await
        .map_err(AuthError::internal)?
        .ok_or(AuthError::unauthorized("token subject no longer exists"))
}

/// The authenticated user for the current request.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A header that is not valid visible ASCII counts as absent.
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match authenticate_request(header, &state.keys, state.users.as_ref()).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(e) => {
                if let AuthError::Unauthorized { reason } = &e {
                    warn!(reason, "request not authenticated");
                }
                Err(e.into())
            }
        }
    }
}
