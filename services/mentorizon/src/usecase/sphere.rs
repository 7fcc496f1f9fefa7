use tracing::info;
use uuid::Uuid;

use mentorizon_domain::pagination::{Page, PageRequest};
use mentorizon_domain::user::UserRole;

use crate::domain::clock::Clock;
use crate::domain::filter::SphereFilter;
use crate::domain::policy;
use crate::domain::repository::SphereRepository;
use crate::domain::types::{Sphere, validate_sphere_name};
use crate::error::MentorizonError;

use super::ensure_page;

// ── CreateSphere ─────────────────────────────────────────────────────────────

pub struct CreateSphereUseCase<R: SphereRepository, C: Clock> {
    pub repo: R,
    pub clock: C,
}

impl<R: SphereRepository, C: Clock> CreateSphereUseCase<R, C> {
    pub async fn execute(&self, name: &str) -> Result<Sphere, MentorizonError> {
        let name = validate_sphere_name(name)?;
        if self.repo.exists_by_name(&name).await? {
            return Err(MentorizonError::SphereAlreadyExists);
        }
        let sphere = Sphere {
            id: Uuid::now_v7(),
            name,
            created_at: self.clock.now(),
        };
        self.repo.create(&sphere).await?;
        info!(sphere_id = %sphere.id, name = %sphere.name, "sphere created");
        Ok(sphere)
    }
}

// ── ListSpheres ──────────────────────────────────────────────────────────────

pub struct ListSpheresUseCase<R: SphereRepository> {
    pub repo: R,
}

impl<R: SphereRepository> ListSpheresUseCase<R> {
    pub async fn execute(
        &self,
        filter: &SphereFilter,
        page: PageRequest,
    ) -> Result<Page<Sphere>, MentorizonError> {
        let result = self.repo.list(filter, page).await?;
        ensure_page(result, page)
    }
}

// ── DeleteSphere ─────────────────────────────────────────────────────────────

pub struct DeleteSphereUseCase<R: SphereRepository> {
    pub repo: R,
}

impl<R: SphereRepository> DeleteSphereUseCase<R> {
    pub async fn execute(&self, actor_role: UserRole, id: Uuid) -> Result<(), MentorizonError> {
        if !policy::can_delete_sphere(actor_role) {
            return Err(MentorizonError::Forbidden);
        }
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(MentorizonError::SphereNotFound);
        }
        if self.repo.is_referenced(id).await? {
            return Err(MentorizonError::SphereInUse);
        }
        if !self.repo.delete(id).await? {
            return Err(MentorizonError::SphereNotFound);
        }
        info!(sphere_id = %id, "sphere deleted");
        Ok(())
    }
}
