use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Expression indexes are not expressible through the index builder.
const CREATE: &str = "CREATE UNIQUE INDEX IF NOT EXISTS spheres_name_unique ON spheres (LOWER(name))";
const DROP: &str = "DROP INDEX IF EXISTS spheres_name_unique";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(CREATE).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.get_connection().execute_unprepared(DROP).await?;
        Ok(())
    }
}
