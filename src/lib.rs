use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod assignment;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod views;

// Module for routing segregation (Public, Admin, Subjects, Lecturer, Student).
pub mod routes;
use auth::AuthUser;
use routes::{admin, lecturer, public, student, subjects};

// --- Public Re-exports ---

// Makes core state types easily accessible to the application entry point.
pub use assignment::AssignmentEngine;
pub use config::AppConfig;
pub use repository::{PostgresRepository, RepositoryState};
pub use views::QueryService;

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application by aggregating all annotated paths and schemas. The
/// resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::admin_login, handlers::lecturer_usernames, handlers::lecturer_login,
        handlers::student_register, handlers::student_login,
        handlers::get_all_students, handlers::get_student_by_id, handlers::create_student,
        handlers::update_student, handlers::delete_student, handlers::admin_dashboard,
        handlers::create_lecturer, handlers::get_all_lecturers,
        handlers::get_lecturers_with_subjects, handlers::get_lecturer_by_id,
        handlers::update_lecturer, handlers::delete_lecturer,
        handlers::assign_subjects_to_lecturer, handlers::assign_subjects_to_student,
        handlers::remove_subject_from_lecturer, handlers::remove_subject_from_student,
        handlers::create_subject, handlers::get_all_subjects, handlers::get_subject_by_id,
        handlers::get_subject_by_code, handlers::search_subjects, handlers::update_subject,
        handlers::delete_subject,
        handlers::lecturer_dashboard, handlers::lecturer_profile,
        handlers::lecturer_my_subjects, handlers::lecturer_my_students,
        handlers::student_dashboard, handlers::student_profile,
        handlers::student_my_subjects, handlers::student_my_lecturers
    ),
    components(
        schemas(
            models::Role, models::Lecturer, models::Student, models::Admin, models::Subject,
            models::AdminLoginRequest, models::LecturerLoginRequest, models::StudentLoginRequest,
            models::StudentSignupRequest, models::StudentUpdateRequest,
            models::LecturerCreateRequest, models::LecturerUpdateRequest, models::SubjectRequest,
            models::AssignSubjectsToLecturerRequest, models::AssignSubjectsToStudentRequest,
            models::AuthResponse, models::MessageResponse, models::LecturerUsernamesResponse,
            models::SubjectResponse, models::SubjectSummary, models::LecturerResponse,
            models::LecturerSubjectsView, models::StudentWithSharedSubjects,
            models::LecturerStudentsView, models::LecturerSummary, models::SubjectWithLecturers,
            models::StudentSubjectsView, models::LecturerWithSharedSubjects,
            models::StudentLecturersView,
        )
    ),
    tags(
        (name = "campus-portal", description = "Student/Lecturer/Subject Management API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe, immutable container holding all application
/// services and configuration, shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: abstracts database access via the PgPool connection.
    pub repo: RepositoryState,
    /// The subject-assignment engine (capacity limits, clear-then-add).
    pub assignments: AssignmentEngine,
    /// The read side: derived cross-entity views.
    pub views: QueryService,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Wires the engine and query façade onto a repository handle.
    pub fn new(repo: RepositoryState, config: AppConfig) -> Self {
        AppState {
            assignments: AssignmentEngine::new(repo.clone()),
            views: QueryService::new(repo.clone()),
            repo,
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

// These allow extractors and handlers to selectively pull components from
// the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for the protected routers. The `AuthUser`
/// extractor performs the JWT validation and DB lookup; a failure rejects
/// the request with 401 before the handler runs. Role checks happen inside
/// the handlers afterwards.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes: no middleware applied.
        .merge(public::public_routes())
        // Protected routers, each behind the authentication middleware.
        // The role check is performed inside the handlers after the request
        // passes the authentication layer.
        .nest(
            "/api/admin",
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/api/subjects",
            subjects::subject_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/api/lecturer",
            lecturer::lecturer_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/api/student",
            student::student_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // Apply the unified state to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID generation: a unique id for every request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request tracing: wraps the request/response lifecycle
                // in a span carrying the generated request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID propagation back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS layer.
        .layer(cors)
}

/// trace_span_logger
///
/// Helper used by `TraceLayer` to customize span creation: extracts the
/// `x-request-id` header and includes it in the structured logging metadata
/// alongside the HTTP method and URI, so every log line for a request is
/// correlated by a unique id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
