/// Errors raised by connectors, health checks and schema helpers.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Creating or dropping a table failed
    #[error("Schema error: {0}")]
    SchemaError(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
