use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Student Router Module
///
/// The student's own read-only views under /api/student. Every handler
/// verifies the STUDENT role and operates on the authenticated identity
/// only.
pub fn student_routes() -> Router<AppState> {
    Router::new()
        // GET /api/student/dashboard
        .route("/dashboard", get(handlers::student_dashboard))
        // GET /api/student/profile
        .route("/profile", get(handlers::student_profile))
        // GET /api/student/my-subjects
        // The student's subjects, each with the lecturers teaching it.
        .route("/my-subjects", get(handlers::student_my_subjects))
        // GET /api/student/my-lecturers
        // Distinct lecturers across the student's subjects, each annotated
        // with the shared subject names.
        .route("/my-lecturers", get(handlers::student_my_lecturers))
}
