use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    auth::{
        jwt::JwtKeys,
        repo::{PgUserRepo, UserRepo},
    },
    config::AppConfig,
};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
    pub users: Arc<dyn UserRepo>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, users: Arc<dyn UserRepo>) -> Self {
        let keys = JwtKeys::new(&config.jwt);
        Self {
            config,
            keys,
            users,
        }
    }

    pub fn with_postgres(config: Arc<AppConfig>, db: PgPool) -> Self {
        Self::new(config, Arc::new(PgUserRepo::new(db)))
    }
}
