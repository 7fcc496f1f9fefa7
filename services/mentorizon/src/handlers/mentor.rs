use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use mentorizon_auth_types::identity::IdentityHeaders;

use crate::domain::filter::MentorFilter;
use crate::error::MentorizonError;
use crate::handlers::response::{MentorCardResponse, MentorProfileResponse, PageResponse};
use crate::handlers::{parse_page, parse_query};
use crate::state::AppState;
use crate::usecase::mentor::{GetMentorUseCase, ListMentorsUseCase};
use crate::usecase::rating::SubmitVoteUseCase;

// ── GET /mentors ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct MentorListQuery {
    pub last_name: Option<String>,
    pub sphere: Option<String>,
    pub page: Option<String>,
}

pub async fn list_mentors(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<PageResponse<MentorCardResponse>>, MentorizonError> {
    let query: MentorListQuery = parse_query(raw_query.as_deref())?;
    let page = parse_page(query.page.as_deref())?;
    let usecase = ListMentorsUseCase {
        users: state.user_repo(),
        spheres: state.sphere_repo(),
        ratings: state.rating_repo(),
    };
    let filter = MentorFilter::new(query.last_name, query.sphere);
    let mentors = usecase.execute(&filter, page).await?;
    Ok(Json(PageResponse::from_page(
        mentors,
        MentorCardResponse::from,
    )))
}

// ── GET /mentors/{id} ────────────────────────────────────────────────────────

pub async fn get_mentor(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MentorProfileResponse>, MentorizonError> {
    let usecase = GetMentorUseCase {
        users: state.user_repo(),
        spheres: state.sphere_repo(),
        meetings: state.meeting_repo(),
        ratings: state.rating_repo(),
        clock: state.clock(),
    };
    let profile = usecase.execute(identity.user_id, id).await?;
    Ok(Json(profile.into()))
}

// ── PUT /mentors/{id}/rating ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RateRequest {
    pub rate: i64,
}

/// Self-votes are dropped and still answer 204.
pub async fn rate_mentor(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RateRequest>,
) -> Result<StatusCode, MentorizonError> {
    let usecase = SubmitVoteUseCase {
        users: state.user_repo(),
        ratings: state.rating_repo(),
        clock: state.clock(),
    };
    usecase.execute(identity.user_id, id, body.rate).await?;
    Ok(StatusCode::NO_CONTENT)
}
