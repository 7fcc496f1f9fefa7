use std::collections::HashMap;

use uuid::Uuid;

use mentorizon_domain::pagination::{Page, PageRequest};

use crate::domain::clock::Clock;
use crate::domain::filter::MentorFilter;
use crate::domain::repository::{
    MeetingRepository, RatingRepository, SphereRepository, UserRepository,
};
use crate::domain::types::{MentorCard, MentorProfile};
use crate::error::MentorizonError;

use super::ensure_page;

// ── ListMentors ──────────────────────────────────────────────────────────────

pub struct ListMentorsUseCase<U: UserRepository, S: SphereRepository, R: RatingRepository> {
    pub users: U,
    pub spheres: S,
    pub ratings: R,
}

impl<U: UserRepository, S: SphereRepository, R: RatingRepository> ListMentorsUseCase<U, S, R> {
    pub async fn execute(
        &self,
        filter: &MentorFilter,
        page: PageRequest,
    ) -> Result<Page<MentorCard>, MentorizonError> {
        let mentors = ensure_page(self.users.list_mentors(filter, page).await?, page)?;

        let mut sphere_ids: Vec<Uuid> = mentors
            .items
            .iter()
            .filter_map(|u| u.mentor_sphere_id)
            .collect();
        sphere_ids.sort_unstable();
        sphere_ids.dedup();
        let spheres: HashMap<_, _> = self
            .spheres
            .find_by_ids(&sphere_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mentor_ids: Vec<Uuid> = mentors.items.iter().map(|u| u.id).collect();
        let ratings = self.ratings.averages(&mentor_ids).await?;

        let Page {
            items,
            page,
            total_items,
            total_pages,
        } = mentors;
        let cards = items
            .into_iter()
            .filter_map(|user| {
                let sphere = spheres.get(&user.mentor_sphere_id?)?.clone();
                let rating = ratings.get(&user.id).copied().unwrap_or_default();
                Some(MentorCard {
                    user,
                    sphere,
                    rating,
                })
            })
            .collect();
        Ok(Page {
            items: cards,
            page,
            total_items,
            total_pages,
        })
    }
}

// ── GetMentor ────────────────────────────────────────────────────────────────

pub struct GetMentorUseCase<U, S, M, R, C>
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

impl<U, S, M, R, C> GetMentorUseCase<U, S, M, R, C>
where
    U: UserRepository,
    S: SphereRepository,
    M: MeetingRepository,
    R: RatingRepository,
    C: Clock,
{
    /// A user without a sphere is not a mentor and reads as not found.
    pub async fn execute(
        &self,
        actor_id: Uuid,
        mentor_id: Uuid,
    ) -> Result<MentorProfile, MentorizonError> {
        let user = self
            .users
            .find_by_id(mentor_id)
            .await?
            .ok_or(MentorizonError::MentorNotFound)?;
        let sphere_id = user
            .mentor_sphere_id
            .ok_or(MentorizonError::MentorNotFound)?;
        let sphere = self
            .spheres
            .find_by_id(sphere_id)
            .await?
            .ok_or(MentorizonError::MentorNotFound)?;
        let rating = self.ratings.average(mentor_id).await?;
        let meetings = self
            .meetings
            .list_by_mentor(mentor_id, self.clock.now())
            .await?;
        let actor_vote = self
            .ratings
            .find_vote(mentor_id, actor_id)
            .await?
            .map(|rate| rate.value());
        Ok(MentorProfile {
            card: MentorCard {
                user,
                sphere,
                rating,
            },
            meetings,
            actor_vote,
        })
    }
}
