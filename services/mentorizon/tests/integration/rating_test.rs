use mentorizon::domain::clock::FixedClock;
use mentorizon::domain::filter::MentorFilter;
use mentorizon::domain::types::RateOutcome;
use mentorizon::error::MentorizonError;
use mentorizon::usecase::mentor::{GetMentorUseCase, ListMentorsUseCase};
use mentorizon::usecase::rating::SubmitVoteUseCase;
use mentorizon_domain::pagination::PageRequest;
use mentorizon_domain::rating::InvalidRate;
use uuid::Uuid;

use crate::helpers::{MemRatingRepo, MemUserRepo, Store, clock};

fn submit(store: &Store) -> SubmitVoteUseCase<MemUserRepo, MemRatingRepo, FixedClock> {
    SubmitVoteUseCase {
        users: store.users(),
        ratings: store.ratings(),
        clock: clock(),
    }
}

// ── Averages ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_display_average_with_one_decimal() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let usecase = submit(&store);
    for rate in [5, 3] {
        let voter = store.add_user("Voter", &format!("Rate{rate}"), None);
        usecase.execute(voter.id, mentor.id, rate).await.unwrap();
    }

    let profile = GetMentorUseCase {
        users: store.users(),
        spheres: store.spheres(),
        meetings: store.meetings(),
        ratings: store.ratings(),
        clock: clock(),
    }
    .execute(mentor.id, mentor.id)
    .await
    .unwrap();

    assert_eq!(profile.card.rating.to_string(), "4.0");
    assert_eq!(profile.actor_vote, None);
}

#[tokio::test]
async fn should_display_zero_without_votes() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    store.add_user("Ivan", "Ivanenko", Some(&sphere));

    let mentors = ListMentorsUseCase {
        users: store.users(),
        spheres: store.spheres(),
        ratings: store.ratings(),
    }
    .execute(&MentorFilter::default(), PageRequest::default())
    .await
    .unwrap();

    assert_eq!(mentors.items.len(), 1);
    assert_eq!(mentors.items[0].rating.to_string(), "0");
    assert!(!mentors.items[0].rating.has_votes());
}

// ── Voting ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_previous_vote_of_same_voter() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let voter = store.add_user("Petro", "Petrenko", None);
    let usecase = submit(&store);

    usecase.execute(voter.id, mentor.id, 1).await.unwrap();
    let outcome = usecase.execute(voter.id, mentor.id, 4).await.unwrap();

    assert_eq!(outcome, RateOutcome::Recorded);
    let data = store.data.lock().unwrap();
    assert_eq!(data.votes.len(), 1);
    assert_eq!(data.votes[&(mentor.id, voter.id)].value(), 4);
}

#[tokio::test]
async fn should_ignore_vote_for_oneself() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));

    let outcome = submit(&store).execute(mentor.id, mentor.id, 5).await.unwrap();

    assert_eq!(outcome, RateOutcome::Ignored);
    assert!(store.data.lock().unwrap().votes.is_empty());
}

#[tokio::test]
async fn should_reject_rate_out_of_range() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let voter = store.add_user("Petro", "Petrenko", None);

    for rate in [-1, 6] {
        let result = submit(&store).execute(voter.id, mentor.id, rate).await;
        assert!(
            matches!(result, Err(MentorizonError::InvalidRate(InvalidRate(r))) if r == rate),
            "expected InvalidRate, got {result:?}"
        );
    }
    assert!(store.data.lock().unwrap().votes.is_empty());
}

#[tokio::test]
async fn should_accept_zero_rate() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let voter = store.add_user("Petro", "Petrenko", None);

    let outcome = submit(&store).execute(voter.id, mentor.id, 0).await.unwrap();
    assert_eq!(outcome, RateOutcome::Recorded);
}

#[tokio::test]
async fn should_reject_vote_for_unknown_user() {
    let store = Store::default();
    let voter = store.add_user("Petro", "Petrenko", None);

    let result = submit(&store).execute(voter.id, Uuid::now_v7(), 3).await;
    assert!(
        matches!(result, Err(MentorizonError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_show_callers_own_vote_on_mentor_profile() {
    let store = Store::default();
    let sphere = store.add_sphere("Art");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&sphere));
    let voter = store.add_user("Petro", "Petrenko", None);
    submit(&store).execute(voter.id, mentor.id, 2).await.unwrap();

    let profile = GetMentorUseCase {
        users: store.users(),
        spheres: store.spheres(),
        meetings: store.meetings(),
        ratings: store.ratings(),
        clock: clock(),
    }
    .execute(voter.id, mentor.id)
    .await
    .unwrap();

    assert_eq!(profile.actor_vote, Some(2));
    assert_eq!(profile.card.rating.to_string(), "2.0");
}
