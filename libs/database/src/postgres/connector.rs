use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::{Backoff, DatabaseError, DatabaseResult};

/// Open a pool with the default settings for `database_url`
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(PostgresConfig::new(database_url).into_connect_options()).await
}

pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Open a pool, retrying while the server is not accepting connections yet.
///
/// ```ignore
/// let config = PostgresConfig::from_env()?;
/// let db = connect_with_backoff(config.clone(), config.backoff()).await?;
/// ```
pub async fn connect_with_backoff(
    config: PostgresConfig,
    backoff: Backoff,
) -> DatabaseResult<DatabaseConnection> {
    let options = config.into_connect_options();

    backoff
        .run("PostgreSQL connect", || connect_with_options(options.clone()))
        .await
        .map_err(|e| DatabaseError::Unreachable {
            attempts: e.attempts,
            waited: e.waited,
            source: e.last_error,
        })
}

/// Apply every pending migration of `M`
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Applying pending migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Schema is up to date");
    Ok(())
}
