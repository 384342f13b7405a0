use std::time::Duration;

/// Failures while establishing or probing the database connection pool
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Query(#[from] sea_orm::DbErr),

    #[error("database unreachable after {attempts} attempts ({waited:?} spent waiting): {source}")]
    Unreachable {
        attempts: u32,
        waited: Duration,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("database health check failed: {0}")]
    Unhealthy(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
