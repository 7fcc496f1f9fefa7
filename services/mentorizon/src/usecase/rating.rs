use tracing::info;
use uuid::Uuid;

use mentorizon_domain::rating::Rate;

use crate::domain::clock::Clock;
use crate::domain::policy;
use crate::domain::repository::{RatingRepository, UserRepository};
use crate::domain::types::RateOutcome;
use crate::error::MentorizonError;

// ── SubmitVote ───────────────────────────────────────────────────────────────

pub struct SubmitVoteUseCase<U: UserRepository, R: RatingRepository, C: Clock> {
    pub users: U,
    pub ratings: R,
    pub clock: C,
}

impl<U: UserRepository, R: RatingRepository, C: Clock> SubmitVoteUseCase<U, R, C> {
    /// Record or replace the voter's rate for a user. Voting for oneself is ignored.
    pub async fn execute(
        &self,
        voter_id: Uuid,
        mentor_id: Uuid,
        rate: i64,
    ) -> Result<RateOutcome, MentorizonError> {
        let rate = Rate::try_from(rate)?;
        if self.users.find_by_id(mentor_id).await?.is_none() {
            return Err(MentorizonError::UserNotFound);
        }
        if !policy::can_vote(voter_id, mentor_id) {
            return Ok(RateOutcome::Ignored);
        }
        if self.users.find_by_id(voter_id).await?.is_none() {
            return Err(MentorizonError::UserNotFound);
        }
        self.ratings
            .upsert_vote(mentor_id, voter_id, rate, self.clock.now())
            .await?;
        info!(mentor_id = %mentor_id, voter_id = %voter_id, rate = rate.value(), "vote recorded");
        Ok(RateOutcome::Recorded)
    }
}
