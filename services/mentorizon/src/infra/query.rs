//! SQL translations of the directory filters in `domain::filter`.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{ColumnTrait, Condition};

use mentorizon_core::sea_ext::contains_ignore_case;
use mentorizon_schema::{meetings, spheres, users};

use crate::domain::filter::{MeetingFilter, MentorFilter, SphereFilter};

/// Meetings dated strictly after `now`.
pub fn visible_at(now: DateTime<Utc>) -> Condition {
    Condition::all().add(meetings::Column::Date.gt(now))
}

pub fn mentor_condition(filter: &MentorFilter) -> Condition {
    let mut cond = Condition::all().add(users::Column::MentorSphereId.is_not_null());
    if let Some(last_name) = &filter.last_name {
        cond = cond.add(contains_ignore_case(
            (users::Entity, users::Column::LastName),
            last_name,
        ));
    }
    if let Some(sphere) = &filter.sphere {
        cond = cond.add(
            users::Column::MentorSphereId.in_subquery(
                Query::select()
                    .column(spheres::Column::Id)
                    .from(spheres::Entity)
                    .and_where(Expr::col(spheres::Column::Name).eq(sphere.as_str()))
                    .to_owned(),
            ),
        );
    }
    cond
}

pub fn meeting_condition(filter: &MeetingFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(topic) = &filter.topic {
        cond = cond.add(contains_ignore_case(
            (meetings::Entity, meetings::Column::Topic),
            topic,
        ));
    }
    if let Some(sphere) = &filter.sphere {
        cond = cond.add(
            meetings::Column::MentorId.in_subquery(
                Query::select()
                    .column((users::Entity, users::Column::Id))
                    .from(users::Entity)
                    .inner_join(
                        spheres::Entity,
                        Expr::col((users::Entity, users::Column::MentorSphereId))
                            .equals((spheres::Entity, spheres::Column::Id)),
                    )
                    .and_where(
                        Expr::col((spheres::Entity, spheres::Column::Name)).eq(sphere.as_str()),
                    )
                    .to_owned(),
            ),
        );
    }
    cond
}

pub fn sphere_condition(filter: &SphereFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(name) = &filter.name {
        cond = cond.add(contains_ignore_case(
            (spheres::Entity, spheres::Column::Name),
            name,
        ));
    }
    cond
}
