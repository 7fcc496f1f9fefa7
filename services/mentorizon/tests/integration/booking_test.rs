use mentorizon::domain::clock::FixedClock;
use mentorizon::domain::types::BookingOutcome;
use mentorizon::error::MentorizonError;
use mentorizon::usecase::booking::ToggleBookingUseCase;
use mentorizon::usecase::meeting::{MeetingInput, UpdateMeetingUseCase};
use uuid::Uuid;

use crate::helpers::{MemMeetingRepo, MemUserRepo, Store, clock, in_days};

fn booking(store: &Store) -> ToggleBookingUseCase<MemMeetingRepo, MemUserRepo, FixedClock> {
    ToggleBookingUseCase {
        meetings: store.meetings(),
        users: store.users(),
        clock: clock(),
    }
}

// ── Join / leave ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_join_then_leave_on_second_toggle() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let user = store.add_user("Petro", "Petrenko", None);
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 2);
    let usecase = booking(&store);

    let first = usecase.execute(user.id, meeting.id).await.unwrap();
    assert_eq!(first, BookingOutcome::Joined);
    assert_eq!(store.participant_count(meeting.id), 1);

    let second = usecase.execute(user.id, meeting.id).await.unwrap();
    assert_eq!(second, BookingOutcome::Left);
    assert_eq!(store.participant_count(meeting.id), 0);
}

#[tokio::test]
async fn should_leave_a_full_meeting() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let user = store.add_user("Petro", "Petrenko", None);
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 1);
    store.enrol(&meeting, &user);

    let result = booking(&store).execute(user.id, meeting.id).await.unwrap();
    assert_eq!(result, BookingOutcome::Left);
}

#[tokio::test]
async fn should_leave_participants_unchanged_when_mentor_books_own_meeting() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 2);

    let result = booking(&store).execute(mentor.id, meeting.id).await.unwrap();
    assert_eq!(result, BookingOutcome::Unchanged);
    assert_eq!(store.participant_count(meeting.id), 0);
}

// ── Rejections ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_join_when_fully_booked() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let first = store.add_user("Petro", "Petrenko", None);
    let second = store.add_user("Olena", "Shevchenko", None);
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 1);
    store.enrol(&meeting, &first);

    let result = booking(&store).execute(second.id, meeting.id).await;
    assert!(
        matches!(result, Err(MentorizonError::MeetingFullyBooked)),
        "expected MeetingFullyBooked, got {result:?}"
    );
    assert_eq!(store.participant_count(meeting.id), 1);
}

#[tokio::test]
async fn should_not_book_past_meeting() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let user = store.add_user("Petro", "Petrenko", None);
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(-1), 2);

    let result = booking(&store).execute(user.id, meeting.id).await;
    assert!(
        matches!(result, Err(MentorizonError::MeetingNotFound)),
        "expected MeetingNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_actor() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 2);

    let result = booking(&store).execute(Uuid::now_v7(), meeting.id).await;
    assert!(
        matches!(result, Err(MentorizonError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_never_exceed_limit_with_simultaneous_joins() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 2);
    let users: Vec<_> = (0..4)
        .map(|i| store.add_user("User", &format!("Number{i}"), None))
        .collect();
    let usecase = booking(&store);

    let (a, b, c, d) = tokio::join!(
        usecase.execute(users[0].id, meeting.id),
        usecase.execute(users[1].id, meeting.id),
        usecase.execute(users[2].id, meeting.id),
        usecase.execute(users[3].id, meeting.id),
    );
    let joined = [a, b, c, d]
        .into_iter()
        .filter(|r| matches!(r, Ok(BookingOutcome::Joined)))
        .count();

    assert_eq!(joined, 2);
    assert_eq!(store.participant_count(meeting.id), 2);
}

// ── Limit changes ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_refuse_limit_below_current_participants() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 3);
    for i in 0..2 {
        let user = store.add_user("User", &format!("Number{i}"), None);
        store.enrol(&meeting, &user);
    }
    let usecase = UpdateMeetingUseCase {
        meetings: store.meetings(),
        clock: clock(),
    };

    let input = MeetingInput {
        topic: "Drawing".into(),
        date: "2023-03-07 10:00".into(),
        description: "Still drawing".into(),
        limit_of_participants: 1,
        link: "google.com".into(),
    };
    let err = usecase
        .execute(mentor.id, meeting.id, input)
        .await
        .unwrap_err();

    assert!(matches!(err, MentorizonError::LimitBelowParticipants(2)));
    assert_eq!(
        err.to_string(),
        "Limit of participants can't be less than current number of participants: 2"
    );
    assert_eq!(store.meeting(meeting.id).unwrap().limit_of_participants, 3);
}
