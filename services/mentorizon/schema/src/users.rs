use sea_orm::entity::prelude::*;

/// Registered user; a user with a `mentor_sphere_id` is a mentor.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mentor_sphere_id: Option<Uuid>,
    pub years_of_experience: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub experience_description: Option<String>,
    /// `UserRole` wire value, echoed in profiles. Not consulted for authorization;
    /// the gateway role header is authoritative.
    pub role: i16,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::spheres::Entity",
        from = "Column::MentorSphereId",
        to = "super::spheres::Column::Id",
        on_delete = "Restrict"
    )]
    Sphere,
    #[sea_orm(has_many = "super::meetings::Entity")]
    Meetings,
    #[sea_orm(has_many = "super::meeting_participants::Entity")]
    MeetingParticipants,
}

impl Related<super::spheres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sphere.def()
    }
}

impl Related<super::meetings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meetings.def()
    }
}

impl Related<super::meeting_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MeetingParticipants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
