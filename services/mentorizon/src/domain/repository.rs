#![allow(async_fn_in_trait)]

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use mentorizon_domain::pagination::{Page, PageRequest};
use mentorizon_domain::rating::{AverageRating, Rate};

use crate::domain::filter::{MeetingFilter, MentorFilter, SphereFilter};
use crate::domain::types::{
    BookingOutcome, Meeting, MeetingDraft, MeetingSortBy, MeetingSummary, ProfileUpdate, Sphere,
    User,
};
use crate::error::MentorizonError;

/// Repository for the sphere directory.
pub trait SphereRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sphere>, MentorizonError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Sphere>, MentorizonError>;

    /// Case-insensitive name lookup.
    async fn exists_by_name(&self, name: &str) -> Result<bool, MentorizonError>;

    /// Insert a sphere. A case-insensitive name clash is `SphereAlreadyExists`.
    async fn create(&self, sphere: &Sphere) -> Result<(), MentorizonError>;

    async fn list(
        &self,
        filter: &SphereFilter,
        page: PageRequest,
    ) -> Result<Page<Sphere>, MentorizonError>;

    async fn count(&self) -> Result<u64, MentorizonError>;

    /// Whether any user has this sphere.
    async fn is_referenced(&self, id: Uuid) -> Result<bool, MentorizonError>;

    /// Delete a sphere. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, MentorizonError>;
}

/// Repository for user profiles and the mentor directory.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MentorizonError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, MentorizonError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, MentorizonError>;

    /// Insert a user. A username clash is `UserAlreadyExists`.
    async fn create(&self, user: &User) -> Result<(), MentorizonError>;

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate)
    -> Result<(), MentorizonError>;

    /// Users with a sphere, ordered by last name then first name.
    async fn list_mentors(
        &self,
        filter: &MentorFilter,
        page: PageRequest,
    ) -> Result<Page<User>, MentorizonError>;

    async fn count_mentors(&self) -> Result<u64, MentorizonError>;
}

/// Repository for meetings and their participants.
///
/// Every read takes `now` and only sees meetings dated after it.
pub trait MeetingRepository: Send + Sync {
    async fn find_visible(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<Meeting>, MentorizonError>;

    async fn list_visible(
        &self,
        filter: &MeetingFilter,
        sort_by: MeetingSortBy,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<Page<MeetingSummary>, MentorizonError>;

    /// Meetings owned by `mentor_id`, latest date first.
    async fn list_by_mentor(
        &self,
        mentor_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetingSummary>, MentorizonError>;

    /// Meetings `user_id` is enrolled in, latest date first.
    async fn list_by_participant(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetingSummary>, MentorizonError>;

    async fn participants(&self, meeting_id: Uuid) -> Result<Vec<User>, MentorizonError>;

    async fn count_visible(&self, now: DateTime<Utc>) -> Result<u64, MentorizonError>;

    /// Insert a meeting together with its mentor binding.
    async fn create(&self, meeting: &Meeting) -> Result<(), MentorizonError>;

    /// Apply `draft` while holding the meeting row lock; rejects a limit below
    /// the current participant count.
    async fn update(
        &self,
        id: Uuid,
        draft: &MeetingDraft,
        now: DateTime<Utc>,
    ) -> Result<(), MentorizonError>;

    /// Delete a meeting. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, MentorizonError>;

    /// Join or leave `meeting_id` for `user_id` atomically, following
    /// `policy::decide_booking`.
    async fn toggle_participant(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<BookingOutcome, MentorizonError>;
}

/// Repository for rating votes.
pub trait RatingRepository: Send + Sync {
    /// Insert or overwrite the vote of `voter_id` for `mentor_id`, stamped at `now`.
    async fn upsert_vote(
        &self,
        mentor_id: Uuid,
        voter_id: Uuid,
        rate: Rate,
        now: DateTime<Utc>,
    ) -> Result<(), MentorizonError>;

    async fn find_vote(
        &self,
        mentor_id: Uuid,
        voter_id: Uuid,
    ) -> Result<Option<Rate>, MentorizonError>;

    async fn average(&self, mentor_id: Uuid) -> Result<AverageRating, MentorizonError>;

    /// Averages keyed by mentor id; mentors without votes may be absent.
    async fn averages(
        &self,
        mentor_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, AverageRating>, MentorizonError>;
}
