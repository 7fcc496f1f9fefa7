use axum::{Json, extract::State};
use serde::Serialize;

use mentorizon_auth_types::identity::IdentityHeaders;

use crate::error::MentorizonError;
use crate::state::AppState;
use crate::usecase::dashboard::GetDashboardUseCase;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub mentors: u64,
    pub meetings: u64,
    pub spheres: u64,
}

// ── GET /dashboard ───────────────────────────────────────────────────────────

pub async fn get_dashboard(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, MentorizonError> {
    let usecase = GetDashboardUseCase {
        users: state.user_repo(),
        meetings: state.meeting_repo(),
        spheres: state.sphere_repo(),
        clock: state.clock(),
    };
    let dashboard = usecase.execute().await?;
    Ok(Json(DashboardResponse {
        mentors: dashboard.mentors,
        meetings: dashboard.meetings,
        spheres: dashboard.spheres,
    }))
}
