//! Authorization and state-transition rules, as pure functions of the actor
//! and the entity involved.

use uuid::Uuid;

use mentorizon_domain::user::UserRole;

use crate::domain::types::{Meeting, User};
use crate::error::MentorizonError;

/// Only mentors own meetings.
pub fn can_create_meeting(actor: &User) -> bool {
    actor.is_mentor()
}

/// Update and delete are reserved to the meeting's mentor.
pub fn owns_meeting(actor_id: Uuid, meeting: &Meeting) -> bool {
    meeting.mentor_id == actor_id
}

/// Mentors cannot rate themselves.
pub fn can_vote(voter_id: Uuid, mentor_id: Uuid) -> bool {
    voter_id != mentor_id
}

/// Users edit only their own profile.
pub fn can_update_profile(actor_id: Uuid, user_id: Uuid) -> bool {
    actor_id == user_id
}

pub fn can_delete_sphere(role: UserRole) -> bool {
    role.is_staff()
}

/// What a booking toggle does for the current state of one (meeting, user) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingDecision {
    Join,
    Leave,
    Ignore,
    Full,
}

pub fn decide_booking(
    actor_id: Uuid,
    meeting: &Meeting,
    enrolled: bool,
    participants: u64,
) -> BookingDecision {
    if owns_meeting(actor_id, meeting) {
        BookingDecision::Ignore
    } else if enrolled {
        BookingDecision::Leave
    } else if participants < u64::from(meeting.limit_of_participants) {
        BookingDecision::Join
    } else {
        BookingDecision::Full
    }
}

/// The participant limit may not drop below the number already enrolled.
pub fn check_participant_limit(new_limit: u32, participants: u64) -> Result<(), MentorizonError> {
    if u64::from(new_limit) < participants {
        return Err(MentorizonError::LimitBelowParticipants(participants));
    }
    Ok(())
}
