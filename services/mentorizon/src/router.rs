use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use mentorizon_core::health::{healthz, readyz};
use mentorizon_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    dashboard::get_dashboard,
    meeting::{
        create_meeting, delete_meeting, get_meeting, list_meetings, toggle_booking,
        update_meeting,
    },
    mentor::{get_mentor, list_mentors, rate_mentor},
    sphere::{create_sphere, delete_sphere, list_spheres},
    user::{create_user, get_user, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Dashboard
        .route("/dashboard", get(get_dashboard))
        // Users
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user).patch(update_user))
        // Mentors
        .route("/mentors", get(list_mentors))
        .route("/mentors/{id}", get(get_mentor))
        .route("/mentors/{id}/rating", put(rate_mentor))
        // Meetings
        .route("/meetings", get(list_meetings).post(create_meeting))
        .route(
            "/meetings/{id}",
            get(get_meeting).put(update_meeting).delete(delete_meeting),
        )
        .route("/meetings/{id}/booking", post(toggle_booking))
        // Spheres
        .route("/spheres", get(list_spheres).post(create_sphere))
        .route("/spheres/{id}", delete(delete_sphere))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
