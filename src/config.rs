use std::{fmt, str::FromStr};

use anyhow::{bail, Context};
use jsonwebtoken::Algorithm;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub expire_minutes: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("expire_minutes", &self.expire_minutes)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl JwtConfig {
    /// Reads the token settings through `get`, so tests can feed a map instead of
    /// the process environment.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = get("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .context("missing environment variable: JWT_SECRET")?;

        let algorithm = match get("JWT_ALGORITHM") {
            Some(raw) => Algorithm::from_str(raw.trim())
                .with_context(|| format!("unknown JWT_ALGORITHM: {raw}"))?,
            None => Algorithm::HS256,
        };
        // The secret is a shared HMAC key; asymmetric algorithms need PEM keys.
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            bail!("unsupported JWT_ALGORITHM {algorithm:?}: only HS256, HS384 and HS512 are allowed");
        }

        let expire_minutes = match get("JWT_EXPIRE_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("invalid JWT_EXPIRE_MINUTES: {raw}"))?,
            None => 60,
        };
        if expire_minutes <= 0 {
            bail!("JWT_EXPIRE_MINUTES must be positive, got {expire_minutes}");
        }

        Ok(Self {
            secret,
            algorithm,
            expire_minutes,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL").context("missing environment variable: DATABASE_URL")?;
        let jwt = JwtConfig::from_lookup(&get)?;
        let port = match get("APP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid APP_PORT: {raw}"))?,
            None => 8080,
        };
        let cors_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            env: get("ENV").unwrap_or_else(|| "development".into()),
            database_url,
            jwt,
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            cors_origins,
        })
    }

    pub fn is_dev(&self) -> bool {
        matches!(
            self.env.to_lowercase().as_str(),
            "dev" | "development" | "local"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn jwt_defaults_apply() {
        let cfg = JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).expect("config");
        assert_eq!(cfg.secret, "s3cret");
        assert_eq!(cfg.algorithm, Algorithm::HS256);
        assert_eq!(cfg.expire_minutes, 60);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = JwtConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));

        let err = JwtConfig::from_lookup(lookup(&[("JWT_SECRET", "   ")])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn rejects_non_hmac_algorithm() {
        let err = JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_ALGORITHM", "RS256"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("unsupported JWT_ALGORITHM"));
    }

    #[test]
    fn rejects_bad_expiry() {
        assert!(JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRE_MINUTES", "0"),
        ]))
        .is_err());
        assert!(JwtConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRE_MINUTES", "soon"),
        ]))
        .is_err());
    }

    #[test]
    fn app_config_reads_everything() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/stockboard"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_ALGORITHM", "HS512"),
            ("JWT_EXPIRE_MINUTES", "15"),
            ("APP_PORT", "9000"),
            ("ENV", "production"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
        ]))
        .expect("config");
        assert_eq!(cfg.jwt.algorithm, Algorithm::HS512);
        assert_eq!(cfg.jwt.expire_minutes, 15);
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert!(!cfg.is_dev());
        assert_eq!(cfg.cors_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn debug_output_redacts_secret() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/stockboard"),
            ("JWT_SECRET", "do-not-print-me"),
        ]))
        .expect("config");
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("do-not-print-me"));
    }

    #[test]
    fn app_config_requires_database_url() {
        let err = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }
}
