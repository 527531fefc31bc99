use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a token: the health check for load balancer
/// probes and the /api/auth login/registration surface. Everything here
/// either issues tokens or reveals nothing sensitive (the lecturer username
/// dropdown is public by design, the login form needs it).
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Returns "ok" immediately to verify the service is responsive.
        .route("/health", get(|| async { "ok" }))
        // POST /api/auth/admin/login
        // OAuth-shaped admin login, restricted to the configured email.
        .route("/api/auth/admin/login", post(handlers::admin_login))
        // GET /api/auth/lecturer/usernames
        // Populates the lecturer login dropdown.
        .route(
            "/api/auth/lecturer/usernames",
            get(handlers::lecturer_usernames),
        )
        // POST /api/auth/lecturer/login
        .route("/api/auth/lecturer/login", post(handlers::lecturer_login))
        // POST /api/auth/student/register
        // Student self-registration; uniqueness collisions return 409.
        .route(
            "/api/auth/student/register",
            post(handlers::student_register),
        )
        // POST /api/auth/student/login
        .route("/api/auth/student/login", post(handlers::student_login))
}
