use chrono::{DateTime, Utc};
use serde::Serialize;

use mentorizon_domain::pagination::Page;
use mentorizon_domain::rating::AverageRating;

use crate::domain::types::{
    Meeting, MeetingDetail, MeetingListItem, MeetingSummary, MentorCard, MentorProfile, Sphere,
    User, UserProfile,
};

// ── Pages ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    pub fn from_page<U>(page: Page<U>, f: impl FnMut(U) -> T) -> Self {
        let has_next = page.has_next();
        let has_previous = page.has_previous();
        let page = page.map(f);
        Self {
            items: page.items,
            page: page.page,
            total_items: page.total_items,
            total_pages: page.total_pages,
            has_next,
            has_previous,
        }
    }
}

// ── Spheres ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SphereResponse {
    pub id: String,
    pub name: String,
    #[serde(serialize_with = "mentorizon_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Sphere> for SphereResponse {
    fn from(sphere: Sphere) -> Self {
        Self {
            id: sphere.id.to_string(),
            name: sphere.name,
            created_at: sphere.created_at,
        }
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mentor_sphere_id: Option<String>,
    pub years_of_experience: u32,
    pub experience_description: Option<String>,
    pub role: u8,
    #[serde(serialize_with = "mentorizon_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "mentorizon_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            mentor_sphere_id: user.mentor_sphere_id.map(|id| id.to_string()),
            years_of_experience: user.years_of_experience,
            experience_description: user.experience_description,
            role: user.role.as_u8(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Short user reference embedded in meeting views.
#[derive(Serialize)]
pub struct UserRef {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserRef {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Serialize)]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub sphere: Option<SphereResponse>,
    pub rating: AverageRating,
    pub mentor_meetings: Vec<MeetingResponse>,
    pub participant_meetings: Vec<MeetingResponse>,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user: profile.user.into(),
            sphere: profile.sphere.map(Into::into),
            rating: profile.rating,
            mentor_meetings: profile.mentor_meetings.into_iter().map(Into::into).collect(),
            participant_meetings: profile
                .participant_meetings
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

// ── Mentors ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MentorCardResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub sphere: SphereResponse,
    pub rating: AverageRating,
}

impl From<MentorCard> for MentorCardResponse {
    fn from(card: MentorCard) -> Self {
        Self {
            user: card.user.into(),
            sphere: card.sphere.into(),
            rating: card.rating,
        }
    }
}

#[derive(Serialize)]
pub struct MentorProfileResponse {
    #[serde(flatten)]
    pub card: MentorCardResponse,
    pub meetings: Vec<MeetingResponse>,
    /// The caller's own vote for this mentor, if any.
    pub my_rate: Option<u8>,
}

impl From<MentorProfile> for MentorProfileResponse {
    fn from(profile: MentorProfile) -> Self {
        Self {
            card: profile.card.into(),
            meetings: profile.meetings.into_iter().map(Into::into).collect(),
            my_rate: profile.actor_vote,
        }
    }
}

// ── Meetings ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeetingResponse {
    pub id: String,
    pub mentor_id: String,
    pub topic: String,
    #[serde(serialize_with = "mentorizon_core::serde::to_rfc3339_ms")]
    pub date: DateTime<Utc>,
    pub description: String,
    pub limit_of_participants: u32,
    pub link: String,
    pub participants: u64,
    pub available_places: u64,
}

impl From<MeetingSummary> for MeetingResponse {
    fn from(summary: MeetingSummary) -> Self {
        let available_places = summary.available_places();
        let Meeting {
            id,
            mentor_id,
            topic,
            date,
            description,
            limit_of_participants,
            link,
            ..
        } = summary.meeting;
        Self {
            id: id.to_string(),
            mentor_id: mentor_id.to_string(),
            topic,
            date,
            description,
            limit_of_participants,
            link,
            participants: summary.participants,
            available_places,
        }
    }
}

impl From<Meeting> for MeetingResponse {
    fn from(meeting: Meeting) -> Self {
        MeetingSummary {
            meeting,
            participants: 0,
        }
        .into()
    }
}

#[derive(Serialize)]
pub struct MeetingListItemResponse {
    #[serde(flatten)]
    pub meeting: MeetingResponse,
    pub mentor: UserRef,
}

impl From<MeetingListItem> for MeetingListItemResponse {
    fn from(item: MeetingListItem) -> Self {
        Self {
            meeting: item.summary.into(),
            mentor: item.mentor.into(),
        }
    }
}

#[derive(Serialize)]
pub struct MeetingDetailResponse {
    #[serde(flatten)]
    pub meeting: MeetingResponse,
    pub mentor: UserRef,
    pub participant_list: Vec<UserRef>,
    pub is_booked: bool,
}

impl From<MeetingDetail> for MeetingDetailResponse {
    fn from(detail: MeetingDetail) -> Self {
        Self {
            meeting: detail.summary.into(),
            mentor: detail.mentor.into(),
            participant_list: detail.participants.into_iter().map(Into::into).collect(),
            is_booked: detail.booked_by_actor,
        }
    }
}
