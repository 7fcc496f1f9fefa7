//! Directory filters.
//!
//! Each filter is an explicit value whose parts combine with AND. A missing or
//! blank part means "no restriction". `matches` is the reference predicate;
//! `infra::query` translates the same filters to SQL conditions.

use crate::domain::types::{Meeting, Sphere, User};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Case-insensitive substring match.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn sphere_matches(expected: Option<&str>, actual: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => actual == Some(expected),
    }
}

/// Mentor directory filter: last name text search and sphere category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorFilter {
    pub last_name: Option<String>,
    pub sphere: Option<String>,
}

impl MentorFilter {
    pub fn new(last_name: Option<String>, sphere: Option<String>) -> Self {
        Self {
            last_name: non_blank(last_name),
            sphere: non_blank(sphere),
        }
    }

    /// `sphere_name` is the name of the user's mentor sphere, if any.
    pub fn matches(&self, user: &User, sphere_name: Option<&str>) -> bool {
        user.is_mentor()
            && self
                .last_name
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&user.last_name, needle))
            && sphere_matches(self.sphere.as_deref(), sphere_name)
    }
}

/// Meeting list filter: topic text search and the owning mentor's sphere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingFilter {
    pub topic: Option<String>,
    pub sphere: Option<String>,
}

impl MeetingFilter {
    pub fn new(topic: Option<String>, sphere: Option<String>) -> Self {
        Self {
            topic: non_blank(topic),
            sphere: non_blank(sphere),
        }
    }

    /// `mentor_sphere_name` is the sphere name of the meeting's mentor.
    pub fn matches(&self, meeting: &Meeting, mentor_sphere_name: Option<&str>) -> bool {
        self.topic
            .as_deref()
            .is_none_or(|needle| contains_ignore_case(&meeting.topic, needle))
            && sphere_matches(self.sphere.as_deref(), mentor_sphere_name)
    }
}

/// Sphere directory filter: name text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SphereFilter {
    pub name: Option<String>,
}

impl SphereFilter {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name: non_blank(name),
        }
    }

    pub fn matches(&self, sphere: &Sphere) -> bool {
        self.name
            .as_deref()
            .is_none_or(|needle| contains_ignore_case(&sphere.name, needle))
    }
}
