use sea_orm::entity::prelude::*;

/// Scheduled session. `mentor_id` binds exactly one owning mentor to the meeting.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "meetings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub topic: String,
    pub date: chrono::DateTime<chrono::Utc>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub limit_of_participants: i32,
    #[sea_orm(column_type = "Text")]
    pub link: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::MentorId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Mentor,
    #[sea_orm(has_many = "super::meeting_participants::Entity")]
    Participants,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mentor.def()
    }
}

impl Related<super::meeting_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
