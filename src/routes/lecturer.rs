use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Lecturer Router Module
///
/// The lecturer's own read-only views under /api/lecturer. Every handler
/// verifies the LECTURER role; the identity comes from the `AuthUser`
/// extractor, so a lecturer can only ever see their own data.
pub fn lecturer_routes() -> Router<AppState> {
    Router::new()
        // GET /api/lecturer/dashboard
        .route("/dashboard", get(handlers::lecturer_dashboard))
        // GET /api/lecturer/profile
        .route("/profile", get(handlers::lecturer_profile))
        // GET /api/lecturer/my-subjects
        // The lecturer's subject snapshot with per-subject counts.
        .route("/my-subjects", get(handlers::lecturer_my_subjects))
        // GET /api/lecturer/my-students
        // Distinct students across the lecturer's subjects, each annotated
        // with the shared subject names.
        .route("/my-students", get(handlers::lecturer_my_students))
}
