use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, MeResponse, RegisterRequest, RegisterResponse, TokenResponse},
        error::AuthError,
        extractors::CurrentUser,
        jwt::JwtKeys,
        service::AuthService,
    },
    error::ApiError,
    state::AppState,
};

pub fn accounts_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/register", post(register))
        .route("/accounts/login", post(login))
        .route("/accounts/me", get(me))
}

#[instrument(skip(auth, payload))]
pub async fn register(
    State(auth): State<AuthService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let Json(mut payload) = payload?;
    payload.normalize()?;

    let user = auth
        .register(&payload.email, &payload.password, payload.full_name.take())
        .await?;

    info!(user_id = user.id, email = %user.email, "account created");
    Ok(Json(RegisterResponse { ok: true }))
}

#[instrument(skip(auth, keys, payload))]
pub async fn login(
    State(auth): State<AuthService>,
    State(keys): State<JwtKeys>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(mut payload) = payload?;
    payload.normalize()?;

    let user = auth.authenticate(&payload.email, &payload.password).await?;
    let token = keys.issue(user.id).map_err(AuthError::Internal)?;

    Ok(Json(TokenResponse { token }))
}

#[instrument(skip_all)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(user.into())
}
