use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MeetingParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MeetingParticipants::MeetingId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MeetingParticipants::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(MeetingParticipants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(MeetingParticipants::MeetingId)
                            .col(MeetingParticipants::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MeetingParticipants::Table, MeetingParticipants::MeetingId)
                            .to(Meetings::Table, Meetings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MeetingParticipants::Table, MeetingParticipants::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(MeetingParticipants::Table)
                    .col(MeetingParticipants::UserId)
                    .name("idx_meeting_participants_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MeetingParticipants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MeetingParticipants {
    Table,
    MeetingId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Meetings {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
