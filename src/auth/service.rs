use std::sync::Arc;

use axum::extract::FromRef;
use lazy_static::lazy_static;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        error::AuthError,
        password::{hash_password, verify_password},
        repo::{InsertError, UserRepo},
        repo_types::{NewUser, User},
    },
    state::AppState,
};

lazy_static! {
    // Verified against when the email is unknown so both login failures do the same work.
    static ref DUMMY_HASH: Option<String> = hash_password("stockboard-timing-equalizer").ok();
}

/// Registration and credential checks on top of a [`UserRepo`].
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepo>,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone())
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepo>) -> Self {
        Self { users }
    }

    #[instrument(skip(self, password, full_name))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<String>,
    ) -> Result<User, AuthError> {
        if self
            .users
            .find_by_email(email)
            .await
            .map_err(AuthError::internal)?
            .is_some()
        {
            warn!("email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = hash_blocking(password.to_owned()).await?;

        let user = self
            .users
            .insert(NewUser {
                email: email.to_owned(),
                password_hash,
                full_name,
            })
            .await
            .map_err(|e| match e {
                InsertError::DuplicateEmail => {
                    warn!("email registered concurrently");
                    AuthError::DuplicateEmail
                }
                InsertError::Other(e) => AuthError::Internal(e),
            })?;

        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(AuthError::internal)?;

        let Some(user) = user else {
            verify_dummy_blocking(password.to_owned()).await?;
            warn!("login unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_blocking(password.to_owned(), user.password_hash.clone()).await? {
            warn!(user_id = user.id, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = user.id, "user logged in");
        Ok(user)
    }
}

// Argon2 is CPU-bound; keep it off the async workers.
async fn hash_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(AuthError::internal)?
        .map_err(AuthError::Internal)
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(AuthError::internal)
}

// First use of DUMMY_HASH runs Argon2 too, so it is only touched on the blocking pool.
async fn verify_dummy_blocking(password: String) -> Result<(), AuthError> {
    tokio::task::spawn_blocking(move || {
        if let Some(dummy) = DUMMY_HASH.as_ref() {
            verify_password(&password, dummy);
        }
    })
    .await
    .map_err(AuthError::internal)
}
