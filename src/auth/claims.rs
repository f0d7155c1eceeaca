use serde::{Deserialize, Serialize};

/// Purpose of a token. Only access tokens are ever issued; anything else found in a
/// presented token decodes to `Other` and is rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    #[serde(other)]
    Other,
}

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user ID, decimal
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub iat: i64, // issued at (unix timestamp)
    pub exp: i64, // expires at (unix timestamp)
}
