use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Subject Router Module
///
/// The subject catalogue under /api/subjects. Reads are open to every
/// authenticated role; create/update/delete require the ADMIN role, checked
/// inside the handlers. The whole router sits behind the authentication
/// middleware applied in `lib.rs`.
pub fn subject_routes() -> Router<AppState> {
    Router::new()
        // GET lists all subjects with counts; POST creates one (admin).
        .route(
            "/",
            get(handlers::get_all_subjects).post(handlers::create_subject),
        )
        // GET /api/subjects/search?name=...
        // Partial-name search, available to every role.
        .route("/search", get(handlers::search_subjects))
        // GET /api/subjects/code/{code}
        .route("/code/{code}", get(handlers::get_subject_by_code))
        // GET/PUT/DELETE a single subject. Mutations are admin-only; delete
        // is refused while any lecturer or student is still linked.
        .route(
            "/{id}",
            get(handlers::get_subject_by_id)
                .put(handlers::update_subject)
                .delete(handlers::delete_subject),
        )
}
