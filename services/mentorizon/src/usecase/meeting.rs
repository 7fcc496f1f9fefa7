use std::collections::HashMap;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use mentorizon_domain::pagination::{Page, PageRequest};

use crate::domain::clock::Clock;
use crate::domain::filter::MeetingFilter;
use crate::domain::policy;
use crate::domain::repository::{MeetingRepository, UserRepository};
use crate::domain::types::{
    Meeting, MeetingDetail, MeetingDraft, MeetingListItem, MeetingSortBy, MeetingSummary,
};
use crate::error::MentorizonError;

use super::ensure_page;

/// Raw meeting fields as submitted; validated into a [`MeetingDraft`].
pub struct MeetingInput {
    pub topic: String,
    pub date: String,
    pub description: String,
    pub limit_of_participants: i64,
    pub link: String,
}

impl MeetingInput {
    fn validate(&self, now: chrono::DateTime<Utc>) -> Result<MeetingDraft, MentorizonError> {
        MeetingDraft::validate(
            &self.topic,
            &self.date,
            &self.description,
            self.limit_of_participants,
            &self.link,
            now,
        )
    }
}

// ── CreateMeeting ────────────────────────────────────────────────────────────

pub struct CreateMeetingUseCase<M: MeetingRepository, U: UserRepository, C: Clock> {
    pub meetings: M,
    pub users: U,
    pub clock: C,
}

impl<M: MeetingRepository, U: UserRepository, C: Clock> CreateMeetingUseCase<M, U, C> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        input: MeetingInput,
    ) -> Result<Meeting, MentorizonError> {
        let actor = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or(MentorizonError::UserNotFound)?;
        if !policy::can_create_meeting(&actor) {
            return Err(MentorizonError::NotAMentor);
        }
        let now = self.clock.now();
        let draft = input.validate(now)?;
        let meeting = Meeting {
            id: Uuid::now_v7(),
            mentor_id: actor.id,
            topic: draft.topic,
            date: draft.date,
            description: draft.description,
            limit_of_participants: draft.limit_of_participants,
            link: draft.link,
            created_at: now,
            updated_at: now,
        };
        self.meetings.create(&meeting).await?;
        info!(meeting_id = %meeting.id, mentor_id = %meeting.mentor_id, "meeting created");
        Ok(meeting)
    }
}

// ── UpdateMeeting ────────────────────────────────────────────────────────────

pub struct UpdateMeetingUseCase<M: MeetingRepository, C: Clock> {
    pub meetings: M,
    pub clock: C,
}

impl<M: MeetingRepository, C: Clock> UpdateMeetingUseCase<M, C> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        meeting_id: Uuid,
        input: MeetingInput,
    ) -> Result<(), MentorizonError> {
        let now = self.clock.now();
        let meeting = self
            .meetings
            .find_visible(meeting_id, now)
            .await?
            .ok_or(MentorizonError::MeetingNotFound)?;
        if !policy::owns_meeting(actor_id, &meeting) {
            return Err(MentorizonError::Forbidden);
        }
        let draft = input.validate(now)?;
        self.meetings.update(meeting_id, &draft, now).await?;
        info!(meeting_id = %meeting_id, limit = draft.limit_of_participants, "meeting updated");
        Ok(())
    }
}

// ── GetMeeting ───────────────────────────────────────────────────────────────

pub struct GetMeetingUseCase<M: MeetingRepository, U: UserRepository, C: Clock> {
    pub meetings: M,
    pub users: U,
    pub clock: C,
}

impl<M: MeetingRepository, U: UserRepository, C: Clock> GetMeetingUseCase<M, U, C> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        meeting_id: Uuid,
    ) -> Result<MeetingDetail, MentorizonError> {
        let meeting = self
            .meetings
            .find_visible(meeting_id, self.clock.now())
            .await?
            .ok_or(MentorizonError::MeetingNotFound)?;
        let mentor = self
            .users
            .find_by_id(meeting.mentor_id)
            .await?
            .ok_or(MentorizonError::MentorNotFound)?;
        let participants = self.meetings.participants(meeting_id).await?;
        let booked_by_actor = participants.iter().any(|u| u.id == actor_id);
        Ok(MeetingDetail {
            summary: MeetingSummary {
                meeting,
                participants: participants.len() as u64,
            },
            mentor,
            participants,
            booked_by_actor,
        })
    }
}

// ── ListMeetings ─────────────────────────────────────────────────────────────

pub struct ListMeetingsUseCase<M: MeetingRepository, U: UserRepository, C: Clock> {
    pub meetings: M,
    pub users: U,
    pub clock: C,
}

impl<M: MeetingRepository, U: UserRepository, C: Clock> ListMeetingsUseCase<M, U, C> {
    pub async fn execute(
        &self,
        filter: &MeetingFilter,
        sort_by: MeetingSortBy,
        page: PageRequest,
    ) -> Result<Page<MeetingListItem>, MentorizonError> {
        let summaries = self
            .meetings
            .list_visible(filter, sort_by, page, self.clock.now())
            .await?;
        let summaries = ensure_page(summaries, page)?;

        let mut mentor_ids: Vec<Uuid> = summaries
            .items
            .iter()
            .map(|s| s.meeting.mentor_id)
            .collect();
        mentor_ids.sort_unstable();
        mentor_ids.dedup();
        let mentors: HashMap<_, _> = self
            .users
            .find_by_ids(&mentor_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let Page {
            items,
            page,
            total_items,
            total_pages,
        } = summaries;
        let items = items
            .into_iter()
            .filter_map(|summary| {
                let mentor = mentors.get(&summary.meeting.mentor_id)?.clone();
                Some(MeetingListItem { summary, mentor })
            })
            .collect();
        Ok(Page {
            items,
            page,
            total_items,
            total_pages,
        })
    }
}

// ── DeleteMeeting ────────────────────────────────────────────────────────────

pub struct DeleteMeetingUseCase<M: MeetingRepository, C: Clock> {
    pub meetings: M,
    pub clock: C,
}

impl<M: MeetingRepository, C: Clock> DeleteMeetingUseCase<M, C> {
    pub async fn execute(&self, actor_id: Uuid, meeting_id: Uuid) -> Result<(), MentorizonError> {
        let meeting = self
            .meetings
            .find_visible(meeting_id, self.clock.now())
            .await?
            .ok_or(MentorizonError::MeetingNotFound)?;
        if !policy::owns_meeting(actor_id, &meeting) {
            return Err(MentorizonError::Forbidden);
        }
        if !self.meetings.delete(meeting_id).await? {
            return Err(MentorizonError::MeetingNotFound);
        }
        info!(meeting_id = %meeting_id, "meeting deleted");
        Ok(())
    }
}
