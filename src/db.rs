use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::config::DatabaseConfig;

/// Open (creating if missing) the SQLite data file behind a pool.
///
/// Every connection waits at most `timeout` on a locked database before the
/// statement fails, and acquiring a pooled connection is bounded the same way.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(&cfg.path)
        .create_if_missing(true)
        .busy_timeout(cfg.timeout);

    let db = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(cfg.timeout)
        .connect_with(options)
        .await
        .with_context(|| format!("open database {}", cfg.path.display()))?;
    Ok(db)
}

/// Apply the `users` schema. Safe to call on an already initialised file.
pub async fn migrate(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run schema migrations")?;
    Ok(())
}
