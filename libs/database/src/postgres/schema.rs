use sea_orm::sea_query::Table;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};
use tracing::info;

use crate::common::DatabaseError;

/// Create the entity's table if it does not exist yet.
///
/// Existing tables are left as they are; this is not a migration runner.
pub async fn sync_schema<E>(db: &DatabaseConnection, entity: E) -> Result<(), DatabaseError>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut create = Schema::new(backend).create_table_from_entity(entity);
    create.if_not_exists();

    db.execute_raw(backend.build(&create))
        .await
        .map_err(|e| DatabaseError::SchemaError(format!("create {}: {}", entity.table_name(), e)))?;

    info!(table = entity.table_name(), "Schema synchronized");
    Ok(())
}

/// Drop the entity's table and create it empty.
pub async fn reset_schema<E>(db: &DatabaseConnection, entity: E) -> Result<(), DatabaseError>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let drop = Table::drop()
        .table(entity.table_ref())
        .if_exists()
        .to_owned();

    db.execute_raw(backend.build(&drop))
        .await
        .map_err(|e| DatabaseError::SchemaError(format!("drop {}: {}", entity.table_name(), e)))?;

    info!(table = entity.table_name(), "Table dropped");
    sync_schema(db, entity).await
}
