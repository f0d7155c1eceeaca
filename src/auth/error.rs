use thiserror::Error;

/// Outcomes of the auth core that callers must handle. Messages are safe to log;
/// the HTTP layer maps each kind to a fixed response and never echoes them.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already registered")]
    DuplicateEmail,

    /// Unknown email and wrong password both end up here.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// `reason` is for logs only.
    #[error("unauthorized: {reason}")]
    Unauthorized { reason: &'static str },

    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl AuthError {
    pub fn unauthorized(reason: &'static str) -> Self {
        Self::Unauthorized { reason }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}
