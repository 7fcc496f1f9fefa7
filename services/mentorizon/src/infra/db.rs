use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use mentorizon_core::sea_ext::eq_ignore_case;
use mentorizon_domain::pagination::{PAGE_SIZE, Page, PageRequest, Sort};
use mentorizon_domain::rating::{AverageRating, Rate};
use mentorizon_domain::user::UserRole;
use mentorizon_schema::{meeting_participants, meetings, rating_votes, spheres, users};

use crate::domain::filter::{MeetingFilter, MentorFilter, SphereFilter};
use crate::domain::policy::{self, BookingDecision};
use crate::domain::repository::{
    MeetingRepository, RatingRepository, SphereRepository, UserRepository,
};
use crate::domain::types::{
    BookingOutcome, Meeting, MeetingDraft, MeetingSortBy, MeetingSummary, ProfileUpdate, Sphere,
    User,
};
use crate::error::MentorizonError;
use crate::infra::query;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

// ── Sphere repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSphereRepository {
    pub db: DatabaseConnection,
}

impl SphereRepository for DbSphereRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sphere>, MentorizonError> {
        let model = spheres::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find sphere by id")?;
        Ok(model.map(sphere_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Sphere>, MentorizonError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = spheres::Entity::find()
            .filter(spheres::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find spheres by ids")?;
        Ok(models.into_iter().map(sphere_from_model).collect())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, MentorizonError> {
        let count = spheres::Entity::find()
            .filter(eq_ignore_case((spheres::Entity, spheres::Column::Name), name))
            .count(&self.db)
            .await
            .context("count spheres by name")?;
        Ok(count > 0)
    }

    async fn create(&self, sphere: &Sphere) -> Result<(), MentorizonError> {
        let result = spheres::ActiveModel {
            id: Set(sphere.id),
            name: Set(sphere.name.clone()),
            created_at: Set(sphere.created_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(MentorizonError::SphereAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create sphere").into()),
        }
    }

    async fn list(
        &self,
        filter: &SphereFilter,
        page: PageRequest,
    ) -> Result<Page<Sphere>, MentorizonError> {
        let paginator = spheres::Entity::find()
            .filter(query::sphere_condition(filter))
            .order_by_asc(spheres::Column::Name)
            .order_by_asc(spheres::Column::Id)
            .paginate(&self.db, PAGE_SIZE);
        let total = paginator.num_items().await.context("count spheres")?;
        if !page.is_within(total.div_ceil(PAGE_SIZE)) {
            return Ok(Page::new(Vec::new(), page, total));
        }
        let models = paginator
            .fetch_page(page.index())
            .await
            .context("list spheres")?;
        Ok(Page::new(
            models.into_iter().map(sphere_from_model).collect(),
            page,
            total,
        ))
    }

    async fn count(&self) -> Result<u64, MentorizonError> {
        let count = spheres::Entity::find()
            .count(&self.db)
            .await
            .context("count spheres")?;
        Ok(count)
    }

    async fn is_referenced(&self, id: Uuid) -> Result<bool, MentorizonError> {
        let count = users::Entity::find()
            .filter(users::Column::MentorSphereId.eq(id))
            .count(&self.db)
            .await
            .context("count users of sphere")?;
        Ok(count > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, MentorizonError> {
        match spheres::Entity::delete_by_id(id).exec(&self.db).await {
            Ok(result) => Ok(result.rows_affected > 0),
            Err(e) if is_foreign_key_violation(&e) => Err(MentorizonError::SphereInUse),
            Err(e) => Err(anyhow::Error::new(e).context("delete sphere").into()),
        }
    }
}

fn sphere_from_model(model: spheres::Model) -> Sphere {
    Sphere {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MentorizonError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, MentorizonError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, MentorizonError> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await
            .context("count users by username")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &User) -> Result<(), MentorizonError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            email: Set(user.email.clone()),
            mentor_sphere_id: Set(user.mentor_sphere_id),
            years_of_experience: Set(user.years_of_experience as i32),
            experience_description: Set(user.experience_description.clone()),
            role: Set(i16::from(user.role.as_u8())),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(MentorizonError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<(), MentorizonError> {
        let am = users::ActiveModel {
            id: Set(id),
            first_name: Set(update.first_name.clone()),
            last_name: Set(update.last_name.clone()),
            email: Set(update.email.clone()),
            mentor_sphere_id: Set(update.mentor_sphere_id),
            years_of_experience: Set(update.years_of_experience as i32),
            experience_description: Set(update.experience_description.clone()),
            updated_at: Set(update.updated_at),
            ..Default::default()
        };
        match am.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(MentorizonError::UserNotFound),
            Err(e) if is_foreign_key_violation(&e) => Err(MentorizonError::SphereNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update user profile").into()),
        }
    }

    async fn list_mentors(
        &self,
        filter: &MentorFilter,
        page: PageRequest,
    ) -> Result<Page<User>, MentorizonError> {
        let paginator = users::Entity::find()
            .filter(query::mentor_condition(filter))
            .order_by_asc(users::Column::LastName)
            .order_by_asc(users::Column::FirstName)
            .order_by_asc(users::Column::Id)
            .paginate(&self.db, PAGE_SIZE);
        let total = paginator.num_items().await.context("count mentors")?;
        if !page.is_within(total.div_ceil(PAGE_SIZE)) {
            return Ok(Page::new(Vec::new(), page, total));
        }
        let models = paginator
            .fetch_page(page.index())
            .await
            .context("list mentors")?;
        Ok(Page::new(
            models.into_iter().map(user_from_model).collect(),
            page,
            total,
        ))
    }

    async fn count_mentors(&self) -> Result<u64, MentorizonError> {
        let count = users::Entity::find()
            .filter(query::mentor_condition(&MentorFilter::default()))
            .count(&self.db)
            .await
            .context("count mentors")?;
        Ok(count)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        mentor_sphere_id: model.mentor_sphere_id,
        years_of_experience: u32::try_from(model.years_of_experience).unwrap_or_default(),
        experience_description: model.experience_description,
        role: u8::try_from(model.role)
            .ok()
            .and_then(UserRole::from_u8)
            .unwrap_or(UserRole::Member),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Meeting repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMeetingRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct ParticipantCount {
    meeting_id: Uuid,
    participants: i64,
}

async fn participant_counts<C: ConnectionTrait>(
    conn: &C,
    meeting_ids: &[Uuid],
) -> Result<HashMap<Uuid, u64>, MentorizonError> {
    if meeting_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = meeting_participants::Entity::find()
        .select_only()
        .column(meeting_participants::Column::MeetingId)
        .column_as(
            Expr::col(meeting_participants::Column::UserId).count(),
            "participants",
        )
        .filter(meeting_participants::Column::MeetingId.is_in(meeting_ids.iter().copied()))
        .group_by(meeting_participants::Column::MeetingId)
        .into_model::<ParticipantCount>()
        .all(conn)
        .await
        .context("count meeting participants")?;
    Ok(rows
        .into_iter()
        .map(|r| (r.meeting_id, u64::try_from(r.participants).unwrap_or_default()))
        .collect())
}

async fn summarize<C: ConnectionTrait>(
    conn: &C,
    models: Vec<meetings::Model>,
) -> Result<Vec<MeetingSummary>, MentorizonError> {
    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let counts = participant_counts(conn, &ids).await?;
    Ok(models
        .into_iter()
        .map(|model| {
            let participants = counts.get(&model.id).copied().unwrap_or(0);
            MeetingSummary {
                meeting: meeting_from_model(model),
                participants,
            }
        })
        .collect())
}

async fn count_participants<C: ConnectionTrait>(
    conn: &C,
    meeting_id: Uuid,
) -> Result<u64, MentorizonError> {
    let count = meeting_participants::Entity::find()
        .filter(meeting_participants::Column::MeetingId.eq(meeting_id))
        .count(conn)
        .await
        .context("count participants")?;
    Ok(count)
}

impl MeetingRepository for DbMeetingRepository {
    async fn find_visible(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<Meeting>, MentorizonError> {
        let model = meetings::Entity::find_by_id(id)
            .filter(query::visible_at(now))
            .one(&self.db)
            .await
            .context("find meeting by id")?;
        Ok(model.map(meeting_from_model))
    }

    async fn list_visible(
        &self,
        filter: &MeetingFilter,
        sort_by: MeetingSortBy,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<Page<MeetingSummary>, MentorizonError> {
        let mut select = meetings::Entity::find()
            .filter(query::visible_at(now))
            .filter(query::meeting_condition(filter));
        select = match sort_by {
            MeetingSortBy::Date(Sort::Desc) => select.order_by_desc(meetings::Column::Date),
            MeetingSortBy::Date(Sort::Asc) => select.order_by_asc(meetings::Column::Date),
        };
        let paginator = select
            .order_by_asc(meetings::Column::Id)
            .paginate(&self.db, PAGE_SIZE);
        let total = paginator.num_items().await.context("count meetings")?;
        if !page.is_within(total.div_ceil(PAGE_SIZE)) {
            return Ok(Page::new(Vec::new(), page, total));
        }
        let models = paginator
            .fetch_page(page.index())
            .await
            .context("list meetings")?;
        let items = summarize(&self.db, models).await?;
        Ok(Page::new(items, page, total))
    }

    async fn list_by_mentor(
        &self,
        mentor_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetingSummary>, MentorizonError> {
        let models = meetings::Entity::find()
            .filter(meetings::Column::MentorId.eq(mentor_id))
            .filter(query::visible_at(now))
            .order_by_desc(meetings::Column::Date)
            .all(&self.db)
            .await
            .context("list meetings by mentor")?;
        summarize(&self.db, models).await
    }

    async fn list_by_participant(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetingSummary>, MentorizonError> {
        let models = meetings::Entity::find()
            .inner_join(meeting_participants::Entity)
            .filter(meeting_participants::Column::UserId.eq(user_id))
            .filter(query::visible_at(now))
            .order_by_desc(meetings::Column::Date)
            .all(&self.db)
            .await
            .context("list meetings by participant")?;
        summarize(&self.db, models).await
    }

    async fn participants(&self, meeting_id: Uuid) -> Result<Vec<User>, MentorizonError> {
        let models = users::Entity::find()
            .inner_join(meeting_participants::Entity)
            .filter(meeting_participants::Column::MeetingId.eq(meeting_id))
            .order_by_asc(meeting_participants::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list meeting participants")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn count_visible(&self, now: DateTime<Utc>) -> Result<u64, MentorizonError> {
        let count = meetings::Entity::find()
            .filter(query::visible_at(now))
            .count(&self.db)
            .await
            .context("count meetings")?;
        Ok(count)
    }

    async fn create(&self, meeting: &Meeting) -> Result<(), MentorizonError> {
        meetings::ActiveModel {
            id: Set(meeting.id),
            mentor_id: Set(meeting.mentor_id),
            topic: Set(meeting.topic.clone()),
            date: Set(meeting.date),
            description: Set(meeting.description.clone()),
            limit_of_participants: Set(meeting.limit_of_participants as i32),
            link: Set(meeting.link.clone()),
            created_at: Set(meeting.created_at),
            updated_at: Set(meeting.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create meeting")?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &MeetingDraft,
        now: DateTime<Utc>,
    ) -> Result<(), MentorizonError> {
        let txn = self.db.begin().await.context("begin meeting update")?;
        let locked = meetings::Entity::find_by_id(id)
            .filter(query::visible_at(now))
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock meeting")?;
        if locked.is_none() {
            return Err(MentorizonError::MeetingNotFound);
        }
        let participants = count_participants(&txn, id).await?;
        policy::check_participant_limit(draft.limit_of_participants, participants)?;

        meetings::ActiveModel {
            id: Set(id),
            topic: Set(draft.topic.clone()),
            date: Set(draft.date),
            description: Set(draft.description.clone()),
            limit_of_participants: Set(draft.limit_of_participants as i32),
            link: Set(draft.link.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .context("update meeting")?;
        txn.commit().await.context("commit meeting update")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, MentorizonError> {
        let result = meetings::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete meeting")?;
        Ok(result.rows_affected > 0)
    }

    async fn toggle_participant(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<BookingOutcome, MentorizonError> {
        let txn = self.db.begin().await.context("begin booking")?;
        let meeting = meetings::Entity::find_by_id(meeting_id)
            .filter(query::visible_at(now))
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock meeting")?
            .map(meeting_from_model)
            .ok_or(MentorizonError::MeetingNotFound)?;
        let enrolled = meeting_participants::Entity::find_by_id((meeting_id, user_id))
            .one(&txn)
            .await
            .context("find participant")?
            .is_some();
        let participants = count_participants(&txn, meeting_id).await?;

        let outcome = match policy::decide_booking(user_id, &meeting, enrolled, participants) {
            BookingDecision::Ignore => BookingOutcome::Unchanged,
            BookingDecision::Full => return Err(MentorizonError::MeetingFullyBooked),
            BookingDecision::Leave => {
                meeting_participants::Entity::delete_by_id((meeting_id, user_id))
                    .exec(&txn)
                    .await
                    .context("remove participant")?;
                BookingOutcome::Left
            }
            BookingDecision::Join => {
                meeting_participants::ActiveModel {
                    meeting_id: Set(meeting_id),
                    user_id: Set(user_id),
                    created_at: Set(now),
                }
                .insert(&txn)
                .await
                .context("add participant")?;
                BookingOutcome::Joined
            }
        };
        txn.commit().await.context("commit booking")?;
        Ok(outcome)
    }
}

fn meeting_from_model(model: meetings::Model) -> Meeting {
    Meeting {
        id: model.id,
        mentor_id: model.mentor_id,
        topic: model.topic,
        date: model.date,
        description: model.description,
        limit_of_participants: u32::try_from(model.limit_of_participants).unwrap_or_default(),
        link: model.link,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Rating repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRatingRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct VoteTotals {
    mentor_id: Uuid,
    total: i64,
    votes: i64,
}

impl RatingRepository for DbRatingRepository {
    async fn upsert_vote(
        &self,
        mentor_id: Uuid,
        voter_id: Uuid,
        rate: Rate,
        now: DateTime<Utc>,
    ) -> Result<(), MentorizonError> {
        let vote = rating_votes::ActiveModel {
            mentor_id: Set(mentor_id),
            voter_id: Set(voter_id),
            rate: Set(i16::from(rate.value())),
            created_at: Set(now),
            updated_at: Set(now),
        };
        rating_votes::Entity::insert(vote)
            .on_conflict(
                OnConflict::columns([rating_votes::Column::MentorId, rating_votes::Column::VoterId])
                    .update_columns([rating_votes::Column::Rate, rating_votes::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert rating vote")?;
        Ok(())
    }

    async fn find_vote(
        &self,
        mentor_id: Uuid,
        voter_id: Uuid,
    ) -> Result<Option<Rate>, MentorizonError> {
        let model = rating_votes::Entity::find_by_id((mentor_id, voter_id))
            .one(&self.db)
            .await
            .context("find rating vote")?;
        let rate = model
            .map(|m| Rate::try_from(i64::from(m.rate)))
            .transpose()
            .context("stored rate out of range")?;
        Ok(rate)
    }

    async fn average(&self, mentor_id: Uuid) -> Result<AverageRating, MentorizonError> {
        let averages = self.averages(&[mentor_id]).await?;
        Ok(averages.get(&mentor_id).copied().unwrap_or_default())
    }

    async fn averages(
        &self,
        mentor_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, AverageRating>, MentorizonError> {
        if mentor_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = rating_votes::Entity::find()
            .select_only()
            .column(rating_votes::Column::MentorId)
            .column_as(Expr::col(rating_votes::Column::Rate).sum(), "total")
            .column_as(Expr::col(rating_votes::Column::VoterId).count(), "votes")
            .filter(rating_votes::Column::MentorId.is_in(mentor_ids.iter().copied()))
            .group_by(rating_votes::Column::MentorId)
            .into_model::<VoteTotals>()
            .all(&self.db)
            .await
            .context("aggregate rating votes")?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let average = AverageRating::from_totals(
                    u64::try_from(r.total).unwrap_or_default(),
                    u64::try_from(r.votes).unwrap_or_default(),
                );
                (r.mentor_id, average)
            })
            .collect())
    }
}
