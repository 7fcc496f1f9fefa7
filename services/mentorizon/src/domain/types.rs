use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use mentorizon_domain::pagination::Sort;
use mentorizon_domain::rating::AverageRating;
use mentorizon_domain::user::UserRole;

use crate::error::MentorizonError;

/// Maximum length of names, usernames, topics.
pub const NAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;

/// Topic category a mentor belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sphere {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Registered user. Becoming a mentor means having a sphere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mentor_sphere_id: Option<Uuid>,
    pub years_of_experience: u32,
    pub experience_description: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_mentor(&self) -> bool {
        self.mentor_sphere_id.is_some()
    }
}

/// Scheduled session owned by exactly one mentor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub topic: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub limit_of_participants: u32,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    /// Meetings are visible only while they are still ahead of `now`.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.date > now
    }
}

/// A meeting together with its current participant count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSummary {
    pub meeting: Meeting,
    pub participants: u64,
}

impl MeetingSummary {
    pub fn available_places(&self) -> u64 {
        u64::from(self.meeting.limit_of_participants).saturating_sub(self.participants)
    }
}

/// Meeting list entry: summary plus the owning mentor.
#[derive(Debug, Clone)]
pub struct MeetingListItem {
    pub summary: MeetingSummary,
    pub mentor: User,
}

/// Full meeting view.
#[derive(Debug, Clone)]
pub struct MeetingDetail {
    pub summary: MeetingSummary,
    pub mentor: User,
    pub participants: Vec<User>,
    pub booked_by_actor: bool,
}

/// Mentor directory entry.
#[derive(Debug, Clone)]
pub struct MentorCard {
    pub user: User,
    pub sphere: Sphere,
    pub rating: AverageRating,
}

/// Mentor page: card plus upcoming meetings.
#[derive(Debug, Clone)]
pub struct MentorProfile {
    pub card: MentorCard,
    pub meetings: Vec<MeetingSummary>,
    pub actor_vote: Option<u8>,
}

/// User page: the user, their sphere and upcoming meetings on both sides.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub sphere: Option<Sphere>,
    pub rating: AverageRating,
    pub mentor_meetings: Vec<MeetingSummary>,
    pub participant_meetings: Vec<MeetingSummary>,
}

/// Landing page counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dashboard {
    pub mentors: u64,
    pub meetings: u64,
    pub spheres: u64,
}

/// Result of toggling a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    Joined,
    Left,
    /// The mentor of the meeting tried to book it.
    Unchanged,
}

/// Result of submitting a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOutcome {
    Recorded,
    /// Self-votes are dropped without an error.
    Ignored,
}

/// Sort options for the meeting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingSortBy {
    Date(Sort),
}

impl Default for MeetingSortBy {
    fn default() -> Self {
        Self::Date(Sort::Desc)
    }
}

impl MeetingSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "date-desc" => Some(Self::Date(Sort::Desc)),
            "date-asc" => Some(Self::Date(Sort::Asc)),
            _ => None,
        }
    }
}

/// Validated meeting fields, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDraft {
    pub topic: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub limit_of_participants: u32,
    pub link: String,
}

/// Validated profile fields for a user update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mentor_sphere_id: Option<Uuid>,
    pub years_of_experience: u32,
    pub experience_description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

// ── Validation ───────────────────────────────────────────────────────────────

fn invalid(field: &'static str, reason: &'static str) -> MentorizonError {
    MentorizonError::InvalidField { field, reason }
}

/// Trim and check a required short text field.
pub fn required_text(field: &'static str, value: &str) -> Result<String, MentorizonError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid(field, "this field is required"));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(invalid(field, "ensure this value has at most 150 characters"));
    }
    Ok(value.to_owned())
}

/// Username: 1-150 characters, letters, digits and `@` `.` `+` `-` `_` only.
pub fn validate_username(username: &str) -> Result<String, MentorizonError> {
    let username = required_text("username", username)?;
    let allowed = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !allowed {
        return Err(invalid(
            "username",
            "letters, digits and @/./+/-/_ only",
        ));
    }
    Ok(username)
}

/// Email is optional; when given it must look like `local@domain`.
pub fn validate_email(email: &str) -> Result<String, MentorizonError> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(String::new());
    }
    if email.len() > EMAIL_MAX_LEN || email.chars().any(char::is_whitespace) {
        return Err(invalid("email", "enter a valid email address"));
    }
    match email.rsplit_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
            Ok(email.to_owned())
        }
        _ => Err(invalid("email", "enter a valid email address")),
    }
}

/// Sphere names are stored with an upper-case first letter and the rest lower case.
pub fn capitalize_sphere_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn validate_sphere_name(name: &str) -> Result<String, MentorizonError> {
    required_text("name", name).map(|n| capitalize_sphere_name(&n))
}

const LINK_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Accept an absolute URL, or a bare host/path which gets `http://` prepended.
pub fn normalize_link(link: &str) -> Result<String, MentorizonError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(invalid("link", "this field is required"));
    }
    let candidate = match url::Url::parse(link) {
        Ok(_) => link.to_owned(),
        Err(url::ParseError::RelativeUrlWithoutBase) => format!("http://{link}"),
        Err(_) => return Err(invalid("link", "enter a valid URL")),
    };
    let parsed = url::Url::parse(&candidate).map_err(|_| invalid("link", "enter a valid URL"))?;
    if !LINK_SCHEMES.contains(&parsed.scheme()) || parsed.host_str().is_none() {
        return Err(invalid("link", "enter a valid URL"));
    }
    Ok(candidate)
}

const NAIVE_DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%y %H:%M",
    "%d.%m.%y %H:%M",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M",
];

/// Parse a meeting date: RFC 3339, or one of the naive formats read as UTC.
pub fn parse_meeting_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

impl MeetingDraft {
    /// Validate raw meeting fields; `date` must be strictly after `now`.
    pub fn validate(
        topic: &str,
        date: &str,
        description: &str,
        limit_of_participants: i64,
        link: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, MentorizonError> {
        let topic = required_text("topic", topic)?;
        let date = parse_meeting_date(date).ok_or_else(|| invalid("date", "enter a valid date/time"))?;
        if date <= now {
            return Err(MentorizonError::MeetingDateNotInFuture);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(invalid("description", "this field is required"));
        }
        let limit_of_participants = u32::try_from(limit_of_participants)
            .ok()
            .filter(|&l| l > 0 && l <= i32::MAX as u32)
            .ok_or_else(|| invalid("limit_of_participants", "must be a positive integer"))?;
        let link = normalize_link(link)?;
        Ok(Self {
            topic,
            date,
            description: description.to_owned(),
            limit_of_participants,
            link,
        })
    }
}
