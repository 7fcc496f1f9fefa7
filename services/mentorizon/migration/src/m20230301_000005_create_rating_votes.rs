use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RatingVotes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RatingVotes::MentorId).uuid().not_null())
                    .col(ColumnDef::new(RatingVotes::VoterId).uuid().not_null())
                    .col(
                        ColumnDef::new(RatingVotes::Rate)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(RatingVotes::Rate).between(0, 5)),
                    )
                    .col(
                        ColumnDef::new(RatingVotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RatingVotes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(RatingVotes::MentorId)
                            .col(RatingVotes::VoterId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RatingVotes::Table, RatingVotes::MentorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RatingVotes::Table, RatingVotes::VoterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RatingVotes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RatingVotes {
    Table,
    MentorId,
    VoterId,
    Rate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
