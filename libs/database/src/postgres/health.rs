use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::{DatabaseError, DatabaseResult};

/// Round-trip `SELECT 1` through the pool; backs the readiness probe
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    let ping = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(ping)
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::Unhealthy(e.to_string()))
}
