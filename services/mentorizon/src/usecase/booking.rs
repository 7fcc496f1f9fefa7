use tracing::info;
use uuid::Uuid;

use crate::domain::clock::Clock;
use crate::domain::repository::{MeetingRepository, UserRepository};
use crate::domain::types::BookingOutcome;
use crate::error::MentorizonError;

// ── ToggleBooking ────────────────────────────────────────────────────────────

pub struct ToggleBookingUseCase<M: MeetingRepository, U: UserRepository, C: Clock> {
    pub meetings: M,
    pub users: U,
    pub clock: C,
}

impl<M: MeetingRepository, U: UserRepository, C: Clock> ToggleBookingUseCase<M, U, C> {
    /// Join the meeting, or leave it if already enrolled.
    pub async fn execute(
        &self,
        actor_id: Uuid,
        meeting_id: Uuid,
    ) -> Result<BookingOutcome, MentorizonError> {
        if self.users.find_by_id(actor_id).await?.is_none() {
            return Err(MentorizonError::UserNotFound);
        }
        let outcome = self
            .meetings
            .toggle_participant(meeting_id, actor_id, self.clock.now())
            .await?;
        info!(meeting_id = %meeting_id, user_id = %actor_id, outcome = ?outcome, "booking toggled");
        Ok(outcome)
    }
}
