use crate::error::DbError;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// The embedded, ordered set of schema and seed migrations.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool can be shared across the entire application; it is internally
/// synchronized and safe for concurrent use.
pub async fn connect(database_url: &str) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies all pending migrations.
///
/// Each migration runs at most once; calling this at every startup is safe
/// and keeps the schema up-to-date in deployed environments.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Reverts every applied migration, dropping all tables and seed data.
///
/// Destructive. Backs the `--reset-db` startup flag and is intended for
/// development databases only.
pub async fn reset_migrations(pool: &PgPool) -> Result<(), DbError> {
    MIGRATOR.undo(pool, 0).await?;
    Ok(())
}
