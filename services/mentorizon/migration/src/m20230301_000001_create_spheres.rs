use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Spheres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Spheres::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Spheres::Name).string_len(150).not_null())
                    .col(
                        ColumnDef::new(Spheres::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Spheres::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Spheres {
    Table,
    Id,
    Name,
    CreatedAt,
}
