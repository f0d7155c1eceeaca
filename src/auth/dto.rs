use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{auth::repo_types::User, error::ApiError};

pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn check_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if !is_valid_email(email) {
        return Err(ApiError::Validation("Invalid email"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation("Password too short"));
    }
    Ok(())
}

/// Request body for user registration.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl RegisterRequest {
    /// Trims the email and display name, then checks the shape of the input.
    pub fn normalize(&mut self) -> Result<(), ApiError> {
        self.email = self.email.trim().to_owned();
        self.full_name = self
            .full_name
            .take()
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());
        check_credentials(&self.email, &self.password)
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

/// Request body for login.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn normalize(&mut self) -> Result<(), ApiError> {
        self.email = self.email.trim().to_owned();
        check_credentials(&self.email, &self.password)
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a b@x.com"));
    }

    #[test]
    fn register_normalize_trims_and_checks() {
        let mut req = RegisterRequest {
            email: "  a@x.com ".into(),
            password: "secret1".into(),
            full_name: Some("   ".into()),
        };
        req.normalize().expect("valid");
        assert_eq!(req.email, "a@x.com");
        assert_eq!(req.full_name, None);

        let mut short = RegisterRequest {
            email: "a@x.com".into(),
            password: "12345".into(),
            full_name: None,
        };
        assert!(matches!(
            short.normalize(),
            Err(ApiError::Validation("Password too short"))
        ));
    }

    #[test]
    fn debug_output_omits_password() {
        let req = LoginRequest {
            email: "a@x.com".into(),
            password: "hunter22".into(),
        };
        let rendered = format!("{req:?}");
        assert!(rendered.contains("a@x.com"));
        assert!(!rendered.contains("hunter22"));
    }

    #[test]
    fn me_response_serialization() {
        let response = MeResponse {
            id: 7,
            email: "test@example.com".to_string(),
            full_name: None,
            created_at: datetime!(2024-03-01 12:00:00 UTC),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "test@example.com");
        assert!(json["full_name"].is_null());
        assert_eq!(json["created_at"], "2024-03-01T12:00:00Z");
    }
}
