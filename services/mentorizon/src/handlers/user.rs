use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use mentorizon_auth_types::identity::IdentityHeaders;

use crate::error::MentorizonError;
use crate::handlers::response::{UserProfileResponse, UserResponse};
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetUserProfileUseCase, UpdateUserInput, UpdateUserUseCase,
};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), MentorizonError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
        clock: state.clock(),
    };
    let user = usecase
        .execute(CreateUserInput {
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfileResponse>, MentorizonError> {
    let usecase = GetUserProfileUseCase {
        users: state.user_repo(),
        spheres: state.sphere_repo(),
        meetings: state.meeting_repo(),
        ratings: state.rating_repo(),
        clock: state.clock(),
    };
    let profile = usecase.execute(id).await?;
    Ok(Json(profile.into()))
}

// ── PATCH /users/{id} ────────────────────────────────────────────────────────

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub mentor_sphere_id: Option<Option<Uuid>>,
    pub years_of_experience: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub experience_description: Option<Option<String>>,
}

pub async fn update_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, MentorizonError> {
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
        spheres: state.sphere_repo(),
        clock: state.clock(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            id,
            UpdateUserInput {
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                mentor_sphere_id: body.mentor_sphere_id,
                years_of_experience: body.years_of_experience,
                experience_description: body.experience_description,
            },
        )
        .await?;
    Ok(Json(user.into()))
}
