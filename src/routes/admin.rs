use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Admin Router Module
///
/// Routes exclusively accessible to the 'ADMIN' role, nested under
/// /api/admin: lecturer and student management plus the subject-assignment
/// surface.
///
/// Access Control:
/// The router is wrapped in the authentication middleware in `lib.rs`; each
/// handler then explicitly checks for the ADMIN role before touching the
/// repository.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /api/admin/dashboard
        .route("/dashboard", get(handlers::admin_dashboard))
        // --- Student management ---
        // GET lists every student; POST creates one on a student's behalf.
        .route(
            "/students",
            get(handlers::get_all_students).post(handlers::create_student),
        )
        // GET/PUT/DELETE a single student record.
        .route(
            "/students/{id}",
            get(handlers::get_student_by_id)
                .put(handlers::update_student)
                .delete(handlers::delete_student),
        )
        // --- Lecturer management ---
        .route(
            "/lecturers",
            get(handlers::get_all_lecturers).post(handlers::create_lecturer),
        )
        // GET /api/admin/lecturers/with-subjects
        // Every lecturer with their assigned subject set.
        .route(
            "/lecturers/with-subjects",
            get(handlers::get_lecturers_with_subjects),
        )
        .route(
            "/lecturers/{id}",
            get(handlers::get_lecturer_by_id)
                .put(handlers::update_lecturer)
                .delete(handlers::delete_lecturer),
        )
        // --- Subject assignment ---
        // POST /api/admin/assign/lecturer
        // Replaces a lecturer's subject set, at most three subjects.
        .route(
            "/assign/lecturer",
            post(handlers::assign_subjects_to_lecturer),
        )
        // POST /api/admin/assign/student
        // Replaces a student's subject set, at most five subjects.
        .route("/assign/student", post(handlers::assign_subjects_to_student))
        // DELETE /api/admin/assign/lecturer/{lecturer_id}/subject/{subject_id}
        // Idempotent single-subject removal.
        .route(
            "/assign/lecturer/{lecturer_id}/subject/{subject_id}",
            delete(handlers::remove_subject_from_lecturer),
        )
        .route(
            "/assign/student/{student_id}/subject/{subject_id}",
            delete(handlers::remove_subject_from_student),
        )
}
