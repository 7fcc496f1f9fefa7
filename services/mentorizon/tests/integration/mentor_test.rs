use mentorizon::domain::clock::FixedClock;
use mentorizon::domain::filter::MentorFilter;
use mentorizon::error::MentorizonError;
use mentorizon::usecase::mentor::{GetMentorUseCase, ListMentorsUseCase};
use mentorizon::usecase::user::{
    CreateUserInput, CreateUserUseCase, GetUserProfileUseCase, UpdateUserInput, UpdateUserUseCase,
};
use mentorizon_domain::pagination::PageRequest;
use uuid::Uuid;

use crate::helpers::{
    MemMeetingRepo, MemRatingRepo, MemSphereRepo, MemUserRepo, Store, clock, in_days, now,
};

fn list(store: &Store) -> ListMentorsUseCase<MemUserRepo, MemSphereRepo, MemRatingRepo> {
    ListMentorsUseCase {
        users: store.users(),
        spheres: store.spheres(),
        ratings: store.ratings(),
    }
}

fn profile(
    store: &Store,
) -> GetMentorUseCase<MemUserRepo, MemSphereRepo, MemMeetingRepo, MemRatingRepo, FixedClock> {
    GetMentorUseCase {
        users: store.users(),
        spheres: store.spheres(),
        meetings: store.meetings(),
        ratings: store.ratings(),
        clock: clock(),
    }
}

// ── ListMentors ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_users_with_sphere() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    store.add_user("Ivan", "Ivanenko", Some(&sphere));
    store.add_user("Petro", "Petrenko", None);

    let page = list(&store)
        .execute(&MentorFilter::default(), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].user.last_name, "Ivanenko");
    assert_eq!(page.items[0].sphere.name, "Art");
}

#[tokio::test]
async fn should_filter_by_last_name_and_sphere() {
    let store = Store::default();
    let art = store.add_sphere("Art");
    let languages = store.add_sphere("Languages");
    store.add_user("Ivan", "Ivanenko", Some(&art));
    store.add_user("Olena", "Shevchenko", Some(&languages));
    store.add_user("Taras", "Ivanov", Some(&languages));

    let by_name = list(&store)
        .execute(
            &MentorFilter::new(Some("IVAN".into()), None),
            PageRequest::default(),
        )
        .await
        .unwrap();
    let names: Vec<_> = by_name.items.iter().map(|c| c.user.last_name.as_str()).collect();
    assert_eq!(names, ["Ivanenko", "Ivanov"]);

    let both = list(&store)
        .execute(
            &MentorFilter::new(Some("ivan".into()), Some("Languages".into())),
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(both.items.len(), 1);
    assert_eq!(both.items[0].user.last_name, "Ivanov");
}

#[tokio::test]
async fn should_paginate_mentors_by_six() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    for i in 0..7 {
        store.add_user("Mentor", &format!("Number{i}"), Some(&sphere));
    }

    let first = list(&store)
        .execute(&MentorFilter::default(), PageRequest::new(1))
        .await
        .unwrap();
    assert_eq!(first.items.len(), 6);
    assert_eq!(first.total_pages, 2);
    assert!(first.has_next());

    let second = list(&store)
        .execute(&MentorFilter::default(), PageRequest::new(2))
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);
    assert!(second.has_previous());
    assert!(!second.has_next());

    let third = list(&store)
        .execute(&MentorFilter::default(), PageRequest::new(3))
        .await;
    assert!(matches!(third, Err(MentorizonError::PageNotFound)));
}

#[tokio::test]
async fn should_return_empty_first_page_when_nothing_matches() {
    let store = Store::default();

    let page = list(&store)
        .execute(
            &MentorFilter::new(Some("nobody".into()), None),
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 0);
}

// ── GetMentor ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_find_mentor_without_sphere() {
    let store = Store::default();
    let user = store.add_user("Petro", "Petrenko", None);

    let result = profile(&store).execute(user.id, user.id).await;
    assert!(
        matches!(result, Err(MentorizonError::MentorNotFound)),
        "expected MentorNotFound, got {result:?}"
    );

    let result = profile(&store).execute(user.id, Uuid::now_v7()).await;
    assert!(matches!(result, Err(MentorizonError::MentorNotFound)));
}

#[tokio::test]
async fn should_show_only_upcoming_meetings_on_mentor_page() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    store.add_meeting(&mentor, "Past", in_days(-2), 2);
    let upcoming = store.add_meeting(&mentor, "Upcoming", in_days(2), 2);

    let mentor_profile = profile(&store).execute(mentor.id, mentor.id).await.unwrap();

    assert_eq!(mentor_profile.meetings.len(), 1);
    assert_eq!(mentor_profile.meetings[0].meeting.id, upcoming.id);
    assert_eq!(mentor_profile.card.sphere.id, sphere.id);
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_meetings_on_both_sides_of_user_profile() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let other = store.add_user("Olena", "Shevchenko", Some(&sphere));
    let own = store.add_meeting(&mentor, "Own", in_days(1), 2);
    let joined = store.add_meeting(&other, "Joined", in_days(2), 2);
    let past = store.add_meeting(&other, "Past", in_days(-1), 2);
    store.enrol(&joined, &mentor);
    store.enrol(&past, &mentor);

    let user_profile = GetUserProfileUseCase {
        users: store.users(),
        spheres: store.spheres(),
        meetings: store.meetings(),
        ratings: store.ratings(),
        clock: clock(),
    }
    .execute(mentor.id)
    .await
    .unwrap();

    assert_eq!(user_profile.sphere.map(|s| s.id), Some(sphere.id));
    assert_eq!(user_profile.mentor_meetings.len(), 1);
    assert_eq!(user_profile.mentor_meetings[0].meeting.id, own.id);
    assert_eq!(user_profile.participant_meetings.len(), 1);
    assert_eq!(user_profile.participant_meetings[0].meeting.id, joined.id);
    assert_eq!(user_profile.participant_meetings[0].participants, 1);
    assert_eq!(user_profile.rating.to_string(), "0");
}

#[tokio::test]
async fn should_reject_duplicate_username() {
    let store = Store::default();
    let usecase = CreateUserUseCase {
        repo: store.users(),
        clock: clock(),
    };
    let input = || CreateUserInput {
        username: "ivan.ivanenko".into(),
        first_name: "Ivan".into(),
        last_name: "Ivanenko".into(),
        email: String::new(),
    };

    let user = usecase.execute(input()).await.unwrap();
    assert!(!user.is_mentor());
    assert_eq!(user.created_at, now());

    let result = usecase.execute(input()).await;
    assert!(
        matches!(result, Err(MentorizonError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_become_mentor_by_choosing_sphere() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let user = store.add_user("Petro", "Petrenko", None);
    let usecase = UpdateUserUseCase {
        users: store.users(),
        spheres: store.spheres(),
        clock: clock(),
    };

    let updated = usecase
        .execute(
            user.id,
            user.id,
            UpdateUserInput {
                mentor_sphere_id: Some(Some(sphere.id)),
                years_of_experience: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.is_mentor());
    assert_eq!(updated.years_of_experience, 5);
    assert_eq!(updated.last_name, "Petrenko");
    assert_eq!(store.data.lock().unwrap().users[0].updated_at, now());

    let mentors = list(&store)
        .execute(&MentorFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(mentors.total_items, 1);

    let cleared = usecase
        .execute(
            user.id,
            user.id,
            UpdateUserInput {
                mentor_sphere_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!cleared.is_mentor());
}

#[tokio::test]
async fn should_forbid_editing_someone_elses_profile() {
    let store = Store::default();
    let owner = store.add_user("Petro", "Petrenko", None);
    let other = store.add_user("Olena", "Shevchenko", None);

    let result = UpdateUserUseCase {
        users: store.users(),
        spheres: store.spheres(),
        clock: clock(),
    }
    .execute(
        other.id,
        owner.id,
        UpdateUserInput {
            first_name: Some("Hacked".into()),
            ..Default::default()
        },
    )
    .await;

    assert!(
        matches!(result, Err(MentorizonError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}
