use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Meetings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Meetings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Meetings::MentorId).uuid().not_null())
                    .col(ColumnDef::new(Meetings::Topic).string_len(150).not_null())
                    .col(
                        ColumnDef::new(Meetings::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Meetings::Description).text().not_null())
                    .col(
                        ColumnDef::new(Meetings::LimitOfParticipants)
                            .integer()
                            .not_null()
                            .check(Expr::col(Meetings::LimitOfParticipants).gt(0)),
                    )
                    .col(ColumnDef::new(Meetings::Link).text().not_null())
                    .col(
                        ColumnDef::new(Meetings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Meetings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Meetings::Table, Meetings::MentorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Meetings::Table)
                    .col(Meetings::MentorId)
                    .name("idx_meetings_mentor_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Meetings::Table)
                    .col(Meetings::Date)
                    .name("idx_meetings_date")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Meetings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Meetings {
    Table,
    Id,
    MentorId,
    Topic,
    Date,
    Description,
    LimitOfParticipants,
    Link,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
