use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::{info, warn};

use crate::{auth::repo::PgUserRepo, config::AppConfig};

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

/// Development-only startup work: apply migrations and report what the database holds.
pub async fn prepare_dev(db: &PgPool) {
    if let Err(e) = sqlx::migrate!("./migrations").run(db).await {
        warn!(error = %e, "migration failed; continuing");
        return;
    }

    match PgUserRepo::new(db.clone()).count().await {
        Ok(users) => info!(users, "database ready"),
        Err(e) => warn!(error = %e, "could not count users"),
    }
}
