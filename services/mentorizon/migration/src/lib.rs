use sea_orm_migration::prelude::*;

mod m20230301_000001_create_spheres;
mod m20230301_000002_create_users;
mod m20230301_000003_create_meetings;
mod m20230301_000004_create_meeting_participants;
mod m20230301_000005_create_rating_votes;
mod m20230305_000006_sphere_name_unique_lower;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230301_000001_create_spheres::Migration),
            Box::new(m20230301_000002_create_users::Migration),
            Box::new(m20230301_000003_create_meetings::Migration),
            Box::new(m20230301_000004_create_meeting_participants::Migration),
            Box::new(m20230301_000005_create_rating_votes::Migration),
            Box::new(m20230305_000006_sphere_name_unique_lower::Migration),
        ]
    }
}
