use mentorizon::domain::types::Dashboard;
use mentorizon::usecase::dashboard::GetDashboardUseCase;

use crate::helpers::{Store, clock, in_days};

#[tokio::test]
async fn should_count_mentors_upcoming_meetings_and_spheres() {
    let store = Store::default();
    let art = store.add_sphere("Art");
    store.add_sphere("Languages");
    let mentor = store.add_user("Ivan", "Ivanenko", Some(&art));
    store.add_user("Petro", "Petrenko", None);
    store.add_meeting(&mentor, "Past", in_days(-1), 2);
    store.add_meeting(&mentor, "Upcoming", in_days(1), 2);

    let dashboard = GetDashboardUseCase {
        users: store.users(),
        meetings: store.meetings(),
        spheres: store.spheres(),
        clock: clock(),
    }
    .execute()
    .await
    .unwrap();

    assert_eq!(
        dashboard,
        Dashboard {
            mentors: 1,
            meetings: 1,
            spheres: 2,
        }
    );
}
