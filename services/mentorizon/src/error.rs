use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use mentorizon_domain::rating::InvalidRate;

/// Mentorizon service error variants.
#[derive(Debug, thiserror::Error)]
pub enum MentorizonError {
    #[error("user not found")]
    UserNotFound,
    #[error("mentor not found")]
    MentorNotFound,
    #[error("meeting not found")]
    MeetingNotFound,
    #[error("sphere not found")]
    SphereNotFound,
    #[error("page not found")]
    PageNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("Sphere with this name already exists.")]
    SphereAlreadyExists,
    #[error("sphere is referenced by mentors")]
    SphereInUse,
    #[error("Unfortunately, there are no available places")]
    MeetingFullyBooked,
    #[error("Meeting date and time should be in future")]
    MeetingDateNotInFuture,
    #[error("Limit of participants can't be less than current number of participants: {0}")]
    LimitBelowParticipants(u64),
    #[error(transparent)]
    InvalidRate(#[from] InvalidRate),
    #[error("{field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    #[error("missing data")]
    MissingData,
    #[error("only mentors can create meetings")]
    NotAMentor,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MentorizonError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::MentorNotFound => "MENTOR_NOT_FOUND",
            Self::MeetingNotFound => "MEETING_NOT_FOUND",
            Self::SphereNotFound => "SPHERE_NOT_FOUND",
            Self::PageNotFound => "PAGE_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::SphereAlreadyExists => "SPHERE_ALREADY_EXISTS",
            Self::SphereInUse => "SPHERE_IN_USE",
            Self::MeetingFullyBooked => "MEETING_FULLY_BOOKED",
            Self::MeetingDateNotInFuture => "MEETING_DATE_NOT_IN_FUTURE",
            Self::LimitBelowParticipants(_) => "LIMIT_BELOW_PARTICIPANTS",
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::InvalidField { .. } => "INVALID_FIELD",
            Self::MissingData => "MISSING_DATA",
            Self::NotAMentor => "NOT_A_MENTOR",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for MentorizonError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::MentorNotFound
            | Self::MeetingNotFound
            | Self::SphereNotFound
            | Self::PageNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists
            | Self::SphereAlreadyExists
            | Self::SphereInUse
            | Self::MeetingFullyBooked => StatusCode::CONFLICT,
            Self::MeetingDateNotInFuture
            | Self::LimitBelowParticipants(_)
            | Self::InvalidRate(_)
            | Self::InvalidField { .. }
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::NotAMentor | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // TraceLayer records method, uri and status for every request; only 500s get logged here.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
