use crate::domain::clock::Clock;
use crate::domain::repository::{MeetingRepository, SphereRepository, UserRepository};
use crate::domain::types::Dashboard;
use crate::error::MentorizonError;

pub struct GetDashboardUseCase<U, M, S, C>
where
    U: UserRepository,
    M: MeetingRepository,
    S: SphereRepository,
    C: Clock,
{
    pub users: U,
    pub meetings: M,
    pub spheres: S,
    pub clock: C,
}

impl<U, M, S, C> GetDashboardUseCase<U, M, S, C>
where
    U: UserRepository,
    M: MeetingRepository,
    S: SphereRepository,
    C: Clock,
{
    pub async fn execute(&self) -> Result<Dashboard, MentorizonError> {
        Ok(Dashboard {
            mentors: self.users.count_mentors().await?,
            meetings: self.meetings.count_visible(self.clock.now()).await?,
            spheres: self.spheres.count().await?,
        })
    }
}
