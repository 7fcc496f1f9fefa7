use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use mentorizon_auth_types::identity::IdentityHeaders;

use crate::domain::filter::SphereFilter;
use crate::error::MentorizonError;
use crate::handlers::response::{PageResponse, SphereResponse};
use crate::handlers::{parse_page, parse_query};
use crate::state::AppState;
use crate::usecase::sphere::{CreateSphereUseCase, DeleteSphereUseCase, ListSpheresUseCase};

// ── GET /spheres ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SphereListQuery {
    pub name: Option<String>,
    pub page: Option<String>,
}

pub async fn list_spheres(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<PageResponse<SphereResponse>>, MentorizonError> {
    let query: SphereListQuery = parse_query(raw_query.as_deref())?;
    let page = parse_page(query.page.as_deref())?;
    let usecase = ListSpheresUseCase {
        repo: state.sphere_repo(),
    };
    let spheres = usecase.execute(&SphereFilter::new(query.name), page).await?;
    Ok(Json(PageResponse::from_page(spheres, SphereResponse::from)))
}

// ── POST /spheres ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSphereRequest {
    pub name: String,
}

pub async fn create_sphere(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateSphereRequest>,
) -> Result<(StatusCode, Json<SphereResponse>), MentorizonError> {
    let usecase = CreateSphereUseCase {
        repo: state.sphere_repo(),
        clock: state.clock(),
    };
    let sphere = usecase.execute(&body.name).await?;
    Ok((StatusCode::CREATED, Json(sphere.into())))
}

// ── DELETE /spheres/{id} ─────────────────────────────────────────────────────

pub async fn delete_sphere(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, MentorizonError> {
    let usecase = DeleteSphereUseCase {
        repo: state.sphere_repo(),
    };
    usecase.execute(identity.user_role, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
