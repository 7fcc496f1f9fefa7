use tracing::info;
use uuid::Uuid;

use mentorizon_domain::user::UserRole;

use crate::domain::clock::Clock;
use crate::domain::policy;
use crate::domain::repository::{
    MeetingRepository, RatingRepository, SphereRepository, UserRepository,
};
use crate::domain::types::{
    ProfileUpdate, User, UserProfile, required_text, validate_email, validate_username,
};
use crate::error::MentorizonError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

pub struct CreateUserUseCase<R: UserRepository, C: Clock> {
    pub repo: R,
    pub clock: C,
}

impl<R: UserRepository, C: Clock> CreateUserUseCase<R, C> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, MentorizonError> {
        let username = validate_username(&input.username)?;
        let first_name = required_text("first_name", &input.first_name)?;
        let last_name = required_text("last_name", &input.last_name)?;
        let email = validate_email(&input.email)?;
        if self.repo.exists_by_username(&username).await? {
            return Err(MentorizonError::UserAlreadyExists);
        }
        let now = self.clock.now();
        let user = User {
            id: Uuid::now_v7(),
            username,
            first_name,
            last_name,
            email,
            mentor_sphere_id: None,
            years_of_experience: 0,
            experience_description: None,
            role: UserRole::Member,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        info!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }
}

// ── GetUserProfile ───────────────────────────────────────────────────────────

pub struct GetUserProfileUseCase<U, S, M, R, C>
where
    U: UserRepository,
    S: SphereRepository,
    M: MeetingRepository,
    R: RatingRepository,
    C: Clock,
{
    pub users: U,
    pub spheres: S,
    pub meetings: M,
    pub ratings: R,
    pub clock: C,
}

impl<U, S, M, R, C> GetUserProfileUseCase<U, S, M, R, C>
where
    U: UserRepository,
    S: SphereRepository,
    M: MeetingRepository,
    R: RatingRepository,
    C: Clock,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<UserProfile, MentorizonError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(MentorizonError::UserNotFound)?;
        let sphere = match user.mentor_sphere_id {
            Some(sphere_id) => self.spheres.find_by_id(sphere_id).await?,
            None => None,
        };
        let now = self.clock.now();
        let rating = self.ratings.average(user.id).await?;
        let mentor_meetings = self.meetings.list_by_mentor(user.id, now).await?;
        let participant_meetings = self.meetings.list_by_participant(user.id, now).await?;
        Ok(UserProfile {
            user,
            sphere,
            rating,
            mentor_meetings,
            participant_meetings,
        })
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

/// Partial profile update. `mentor_sphere_id: Some(None)` clears the sphere.
#[derive(Default)]
pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mentor_sphere_id: Option<Option<Uuid>>,
    pub years_of_experience: Option<i64>,
    pub experience_description: Option<Option<String>>,
}

impl UpdateUserInput {
    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.mentor_sphere_id.is_none()
            && self.years_of_experience.is_none()
            && self.experience_description.is_none()
    }
}

pub struct UpdateUserUseCase<U: UserRepository, S: SphereRepository, C: Clock> {
    pub users: U,
    pub spheres: S,
    pub clock: C,
}

impl<U: UserRepository, S: SphereRepository, C: Clock> UpdateUserUseCase<U, S, C> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, MentorizonError> {
        if !policy::can_update_profile(actor_id, user_id) {
            return Err(MentorizonError::Forbidden);
        }
        if input.is_empty() {
            return Err(MentorizonError::MissingData);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(MentorizonError::UserNotFound)?;

        let mentor_sphere_id = match input.mentor_sphere_id {
            Some(Some(sphere_id)) => {
                if self.spheres.find_by_id(sphere_id).await?.is_none() {
                    return Err(MentorizonError::SphereNotFound);
                }
                Some(sphere_id)
            }
            Some(None) => None,
            None => user.mentor_sphere_id,
        };
        let years_of_experience = match input.years_of_experience {
            Some(years) => u32::try_from(years)
                .ok()
                .filter(|&y| y <= i32::MAX as u32)
                .ok_or(MentorizonError::InvalidField {
                    field: "years_of_experience",
                    reason: "must be a non-negative integer",
                })?,
            None => user.years_of_experience,
        };
        let update = ProfileUpdate {
            first_name: match input.first_name {
                Some(v) => required_text("first_name", &v)?,
                None => user.first_name.clone(),
            },
            last_name: match input.last_name {
                Some(v) => required_text("last_name", &v)?,
                None => user.last_name.clone(),
            },
            email: match input.email {
                Some(v) => validate_email(&v)?,
                None => user.email.clone(),
            },
            mentor_sphere_id,
            years_of_experience,
            experience_description: match input.experience_description {
                Some(v) => v.map(|d| d.trim().to_owned()).filter(|d| !d.is_empty()),
                None => user.experience_description.clone(),
            },
            updated_at: self.clock.now(),
        };
        self.users.update_profile(user_id, &update).await?;
        info!(user_id = %user_id, is_mentor = update.mentor_sphere_id.is_some(), "user profile updated");
        Ok(User {
            first_name: update.first_name,
            last_name: update.last_name,
            email: update.email,
            mentor_sphere_id: update.mentor_sphere_id,
            years_of_experience: update.years_of_experience,
            experience_description: update.experience_description,
            updated_at: update.updated_at,
            ..user
        })
    }
}
