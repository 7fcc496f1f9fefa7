use mentorizon::domain::clock::FixedClock;
use mentorizon::domain::filter::MeetingFilter;
use mentorizon::domain::types::{MeetingListItem, MeetingSortBy};
use mentorizon::error::MentorizonError;
use mentorizon::usecase::meeting::{
    CreateMeetingUseCase, DeleteMeetingUseCase, GetMeetingUseCase, ListMeetingsUseCase,
    MeetingInput, UpdateMeetingUseCase,
};
use mentorizon_domain::pagination::{PageRequest, Sort};

use crate::helpers::{MemMeetingRepo, MemUserRepo, Store, clock, in_days, now};

fn input(topic: &str, date: &str) -> MeetingInput {
    MeetingInput {
        topic: topic.into(),
        date: date.into(),
        description: "This is a test".into(),
        limit_of_participants: 2,
        link: "google.com".into(),
    }
}

fn list(store: &Store) -> ListMeetingsUseCase<MemMeetingRepo, MemUserRepo, FixedClock> {
    ListMeetingsUseCase {
        meetings: store.meetings(),
        users: store.users(),
        clock: clock(),
    }
}

fn topics(items: &[MeetingListItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.summary.meeting.topic.clone())
        .collect()
}

// ── CreateMeeting ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_meeting_owned_by_mentor() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let usecase = CreateMeetingUseCase {
        meetings: store.meetings(),
        users: store.users(),
        clock: clock(),
    };

    let meeting = usecase
        .execute(mentor.id, input("Drawing", "2023-03-06 10:00"))
        .await
        .unwrap();

    assert_eq!(meeting.mentor_id, mentor.id);
    assert_eq!(meeting.link, "http://google.com");
    assert_eq!(meeting.created_at, now());
    assert_eq!(meeting.updated_at, now());
    assert_eq!(store.meeting(meeting.id), Some(meeting));
}

#[tokio::test]
async fn should_not_let_non_mentor_create_meeting() {
    let store = Store::default();
    let user = store.add_user("Petro", "Petrenko", None);
    let usecase = CreateMeetingUseCase {
        meetings: store.meetings(),
        users: store.users(),
        clock: clock(),
    };

    let result = usecase
        .execute(user.id, input("Drawing", "2023-03-06 10:00"))
        .await;

    assert!(
        matches!(result, Err(MentorizonError::NotAMentor)),
        "expected NotAMentor, got {result:?}"
    );
    assert!(store.data.lock().unwrap().meetings.is_empty());
}

#[tokio::test]
async fn should_reject_meeting_dated_in_the_past() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let usecase = CreateMeetingUseCase {
        meetings: store.meetings(),
        users: store.users(),
        clock: clock(),
    };

    let result = usecase
        .execute(mentor.id, input("Drawing", "2023-03-04 10:00"))
        .await;

    assert!(
        matches!(result, Err(MentorizonError::MeetingDateNotInFuture)),
        "expected MeetingDateNotInFuture, got {result:?}"
    );
}

// ── ListMeetings ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sort_by_date_both_ways() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    store.add_meeting(&mentor, "Second", in_days(2), 2);
    store.add_meeting(&mentor, "First", in_days(1), 2);
    store.add_meeting(&mentor, "Third", in_days(3), 2);

    let desc = list(&store)
        .execute(
            &MeetingFilter::default(),
            MeetingSortBy::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(topics(&desc.items), ["Third", "Second", "First"]);

    let asc = list(&store)
        .execute(
            &MeetingFilter::default(),
            MeetingSortBy::Date(Sort::Asc),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(topics(&asc.items), ["First", "Second", "Third"]);
    assert_eq!(asc.items[0].mentor.id, mentor.id);
}

#[tokio::test]
async fn should_filter_by_topic_and_mentor_sphere() {
    let store = Store::default();
    let art = store.add_sphere("Art");
    let languages = store.add_sphere("Languages");
    let painter = store.add_user("Ivan", "Ivanenko", Some(&art));
    let linguist = store.add_user("Olena", "Shevchenko", Some(&languages));
    store.add_meeting(&painter, "Test meeting1", in_days(1), 2);
    store.add_meeting(&linguist, "Test meeting2", in_days(2), 2);

    let by_topic = list(&store)
        .execute(
            &MeetingFilter::new(Some("MEETING1".into()), None),
            MeetingSortBy::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(topics(&by_topic.items), ["Test meeting1"]);

    let by_sphere = list(&store)
        .execute(
            &MeetingFilter::new(None, Some("Languages".into())),
            MeetingSortBy::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(topics(&by_sphere.items), ["Test meeting2"]);
}

#[tokio::test]
async fn should_hide_past_meetings_from_list() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    store.add_meeting(&mentor, "Yesterday", in_days(-1), 2);
    store.add_meeting(&mentor, "Tomorrow", in_days(1), 2);

    let page = list(&store)
        .execute(
            &MeetingFilter::default(),
            MeetingSortBy::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(topics(&page.items), ["Tomorrow"]);
    assert_eq!(page.total_items, 1);
}

#[tokio::test]
async fn should_report_page_past_the_end_as_not_found() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    store.add_meeting(&mentor, "Only", in_days(1), 2);

    let result = list(&store)
        .execute(
            &MeetingFilter::default(),
            MeetingSortBy::default(),
            PageRequest::new(2),
        )
        .await;

    assert!(
        matches!(result, Err(MentorizonError::PageNotFound)),
        "expected PageNotFound, got {:?}",
        result.map(|p| p.total_items)
    );
}

// ── GetMeeting ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_mark_meeting_booked_for_participant() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let user = store.add_user("Petro", "Petrenko", None);
    let other = store.add_user("Olena", "Shevchenko", None);
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 3);
    store.enrol(&meeting, &user);
    let usecase = GetMeetingUseCase {
        meetings: store.meetings(),
        users: store.users(),
        clock: clock(),
    };

    let detail = usecase.execute(user.id, meeting.id).await.unwrap();
    assert!(detail.booked_by_actor);
    assert_eq!(detail.summary.participants, 1);
    assert_eq!(detail.summary.available_places(), 2);
    assert_eq!(detail.participants[0].id, user.id);
    assert_eq!(detail.mentor.id, mentor.id);

    let detail = usecase.execute(other.id, meeting.id).await.unwrap();
    assert!(!detail.booked_by_actor);
}

#[tokio::test]
async fn should_not_find_past_meeting() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(-1), 3);

    let result = GetMeetingUseCase {
        meetings: store.meetings(),
        users: store.users(),
        clock: clock(),
    }
    .execute(mentor.id, meeting.id)
    .await;

    assert!(
        matches!(result, Err(MentorizonError::MeetingNotFound)),
        "expected MeetingNotFound, got {:?}",
        result.map(|d| d.summary.meeting.id)
    );
}

// ── UpdateMeeting / DeleteMeeting ────────────────────────────────────────────

#[tokio::test]
async fn should_update_own_meeting() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 2);

    UpdateMeetingUseCase {
        meetings: store.meetings(),
        clock: clock(),
    }
    .execute(mentor.id, meeting.id, input("Painting", "2023-03-08 09:30"))
    .await
    .unwrap();

    let updated = store.meeting(meeting.id).unwrap();
    assert_eq!(updated.topic, "Painting");
    assert_eq!(updated.date.to_rfc3339(), "2023-03-08T09:30:00+00:00");
}

#[tokio::test]
async fn should_forbid_other_users_from_changing_meeting() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let intruder = store.add_user("Petro", "Petrenko", Some(&sphere));
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 2);

    let update = UpdateMeetingUseCase {
        meetings: store.meetings(),
        clock: clock(),
    }
    .execute(intruder.id, meeting.id, input("Hijacked", "2023-03-08 09:30"))
    .await;
    assert!(
        matches!(update, Err(MentorizonError::Forbidden)),
        "expected Forbidden, got {update:?}"
    );

    let delete = DeleteMeetingUseCase {
        meetings: store.meetings(),
        clock: clock(),
    }
    .execute(intruder.id, meeting.id)
    .await;
    assert!(
        matches!(delete, Err(MentorizonError::Forbidden)),
        "expected Forbidden, got {delete:?}"
    );

    assert_eq!(store.meeting(meeting.id), Some(meeting));
}

#[tokio::test]
async fn should_delete_own_meeting_with_its_participants() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let user = store.add_user("Petro", "Petrenko", None);
    let meeting = store.add_meeting(&mentor, "Drawing", in_days(1), 2);
    store.enrol(&meeting, &user);

    DeleteMeetingUseCase {
        meetings: store.meetings(),
        clock: clock(),
    }
    .execute(mentor.id, meeting.id)
    .await
    .unwrap();

    assert!(store.meeting(meeting.id).is_none());
    assert_eq!(store.participant_count(meeting.id), 0);
}
