use crate::state::RosterState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub mod students;

pub fn build_router(state: RosterState) -> Router {
    Router::new()
        .route(
            "/students",
            get(students::get_all_students).post(students::add_student),
        )
        .route(
            "/students/{id}",
            get(students::get_student_by_id)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
