use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mentorizon_auth_types::identity::IdentityHeaders;

use crate::domain::filter::MeetingFilter;
use crate::domain::types::{BookingOutcome, MeetingSortBy};
use crate::error::MentorizonError;
use crate::handlers::response::{
    MeetingDetailResponse, MeetingListItemResponse, MeetingResponse, PageResponse,
};
use crate::handlers::{parse_page, parse_query};
use crate::state::AppState;
use crate::usecase::booking::ToggleBookingUseCase;
use crate::usecase::meeting::{
    CreateMeetingUseCase, DeleteMeetingUseCase, GetMeetingUseCase, ListMeetingsUseCase,
    MeetingInput, UpdateMeetingUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MeetingRequest {
    pub topic: String,
    /// RFC 3339, or a naive date/time read as UTC.
    pub date: String,
    pub description: String,
    pub limit_of_participants: i64,
    pub link: String,
}

impl From<MeetingRequest> for MeetingInput {
    fn from(body: MeetingRequest) -> Self {
        Self {
            topic: body.topic,
            date: body.date,
            description: body.description,
            limit_of_participants: body.limit_of_participants,
            link: body.link,
        }
    }
}

// ── GET /meetings ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct MeetingListQuery {
    pub topic: Option<String>,
    pub sphere: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
}

pub async fn list_meetings(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<PageResponse<MeetingListItemResponse>>, MentorizonError> {
    let query: MeetingListQuery = parse_query(raw_query.as_deref())?;
    let page = parse_page(query.page.as_deref())?;
    let sort_by = query
        .sort_by
        .as_deref()
        .and_then(MeetingSortBy::from_kebab_case)
        .unwrap_or_default();
    let usecase = ListMeetingsUseCase {
        meetings: state.meeting_repo(),
        users: state.user_repo(),
        clock: state.clock(),
    };
    let filter = MeetingFilter::new(query.topic, query.sphere);
    let meetings = usecase.execute(&filter, sort_by, page).await?;
    Ok(Json(PageResponse::from_page(
        meetings,
        MeetingListItemResponse::from,
    )))
}

// ── POST /meetings ───────────────────────────────────────────────────────────

pub async fn create_meeting(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<MeetingRequest>,
) -> Result<(StatusCode, Json<MeetingResponse>), MentorizonError> {
    let usecase = CreateMeetingUseCase {
        meetings: state.meeting_repo(),
        users: state.user_repo(),
        clock: state.clock(),
    };
    let meeting = usecase.execute(identity.user_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(meeting.into())))
}

// ── GET /meetings/{id} ───────────────────────────────────────────────────────

pub async fn get_meeting(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MeetingDetailResponse>, MentorizonError> {
    let usecase = GetMeetingUseCase {
        meetings: state.meeting_repo(),
        users: state.user_repo(),
        clock: state.clock(),
    };
    let detail = usecase.execute(identity.user_id, id).await?;
    Ok(Json(detail.into()))
}

// ── PUT /meetings/{id} ───────────────────────────────────────────────────────

pub async fn update_meeting(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MeetingRequest>,
) -> Result<StatusCode, MentorizonError> {
    let usecase = UpdateMeetingUseCase {
        meetings: state.meeting_repo(),
        clock: state.clock(),
    };
    usecase.execute(identity.user_id, id, body.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /meetings/{id} ────────────────────────────────────────────────────

pub async fn delete_meeting(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, MentorizonError> {
    let usecase = DeleteMeetingUseCase {
        meetings: state.meeting_repo(),
        clock: state.clock(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /meetings/{id}/booking ──────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingOutcomeResponse {
    Joined,
    Left,
    Unchanged,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub outcome: BookingOutcomeResponse,
}

impl From<BookingOutcome> for BookingResponse {
    fn from(outcome: BookingOutcome) -> Self {
        let outcome = match outcome {
            BookingOutcome::Joined => BookingOutcomeResponse::Joined,
            BookingOutcome::Left => BookingOutcomeResponse::Left,
            BookingOutcome::Unchanged => BookingOutcomeResponse::Unchanged,
        };
        Self { outcome }
    }
}

pub async fn toggle_booking(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, MentorizonError> {
    let usecase = ToggleBookingUseCase {
        meetings: state.meeting_repo(),
        users: state.user_repo(),
        clock: state.clock(),
    };
    let outcome = usecase.execute(identity.user_id, id).await?;
    Ok(Json(outcome.into()))
}
