use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to reach the database: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("The requested row was not found in the database.")]
    NotFound,
}
