use crate::{
    AppState,
    auth::{AuthUser, hash_password, issue_token, verify_password},
    error::ApiError,
    models::{
        AdminLoginRequest, AssignSubjectsToLecturerRequest, AssignSubjectsToStudentRequest,
        AuthResponse, Lecturer, LecturerCreateRequest, LecturerLoginRequest, LecturerResponse,
        LecturerStudentsView, LecturerSubjectsView, LecturerUpdateRequest,
        LecturerUsernamesResponse, MessageResponse, NewAdmin, NewLecturer, NewStudent, Role,
        Student, StudentLecturersView, StudentLoginRequest, StudentSignupRequest,
        StudentSubjectsView, StudentUpdateRequest, SubjectRequest, SubjectResponse,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

// --- Filter Structs ---

/// SubjectSearchFilter
///
/// Query parameters for GET /api/subjects/search.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct SubjectSearchFilter {
    /// Partial subject name, matched case-insensitively.
    pub name: String,
}

// --- Shared helpers ---

fn require_role(auth: &AuthUser, role: Role) -> Result<(), ApiError> {
    if auth.role != role {
        return Err(ApiError::forbidden(format!("{role} role required")));
    }
    Ok(())
}

fn validated<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|e| ApiError::validation(e.to_string()))
}

// ==================== AUTH ====================

/// admin_login
///
/// [Public Route] OAuth-shaped admin login. Only the configured admin email
/// is accepted; the admin row is created lazily on first success.
#[utoipa::path(
    post,
    path = "/api/auth/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthResponse),
        (status = 401, description = "Email not on the allow-list")
    )
)]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if !payload
        .email
        .eq_ignore_ascii_case(&state.config.admin_email)
    {
        return Err(ApiError::unauthorized("Unauthorized admin email"));
    }

    let admin = match state.repo.find_admin_by_email(&payload.email).await? {
        Some(admin) => admin,
        None => {
            state
                .repo
                .create_admin(NewAdmin {
                    name: "System Admin".to_string(),
                    email: payload.email.clone(),
                    oauth_provider: payload.oauth_provider.clone(),
                    // The email doubles as the OAuth subject reference.
                    oauth_id: payload.email.clone(),
                })
                .await?
        }
    };

    let token = issue_token(admin.id, Role::Admin, &state.config.jwt_secret)?;
    Ok(Json(AuthResponse {
        token,
        username: admin.username,
        role: Role::Admin,
    }))
}

/// lecturer_usernames
///
/// [Public Route] Usernames for the lecturer login dropdown.
#[utoipa::path(
    get,
    path = "/api/auth/lecturer/usernames",
    responses((status = 200, description = "Usernames", body = LecturerUsernamesResponse))
)]
pub async fn lecturer_usernames(
    State(state): State<AppState>,
) -> Result<Json<LecturerUsernamesResponse>, ApiError> {
    let usernames = state.repo.lecturer_usernames().await?;
    Ok(Json(LecturerUsernamesResponse { usernames }))
}

/// lecturer_login
///
/// [Public Route] Username/password login for lecturers.
#[utoipa::path(
    post,
    path = "/api/auth/lecturer/login",
    request_body = LecturerLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn lecturer_login(
    State(state): State<AppState>,
    Json(payload): Json<LecturerLoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let lecturer = state
        .repo
        .find_lecturer_by_username(&payload.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&payload.password, &lecturer.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = issue_token(lecturer.id, Role::Lecturer, &state.config.jwt_secret)?;
    Ok(Json(AuthResponse {
        token,
        username: lecturer.username,
        role: Role::Lecturer,
    }))
}

/// student_register
///
/// [Public Route] Student self-registration.
#[utoipa::path(
    post,
    path = "/api/auth/student/register",
    request_body = StudentSignupRequest,
    responses(
        (status = 201, description = "Registered", body = MessageResponse),
        (status = 409, description = "Username or student id already taken")
    )
)]
pub async fn student_register(
    State(state): State<AppState>,
    Json(payload): Json<StudentSignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    validated(&payload)?;
    let student = create_student_record(&state, &payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Student registered successfully with ID: {}", student.id),
        }),
    ))
}

/// student_login
///
/// [Public Route] Username/password login for students.
#[utoipa::path(
    post,
    path = "/api/auth/student/login",
    request_body = StudentLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn student_login(
    State(state): State<AppState>,
    Json(payload): Json<StudentLoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let student = state
        .repo
        .find_student_by_username(&payload.username)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&payload.password, &student.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = issue_token(student.id, Role::Student, &state.config.jwt_secret)?;
    Ok(Json(AuthResponse {
        token,
        username: student.username,
        role: Role::Student,
    }))
}

// Uniqueness checks, hashing and insertion shared by self-registration and
// the admin-side create endpoint.
async fn create_student_record(
    state: &AppState,
    payload: &StudentSignupRequest,
) -> Result<Student, ApiError> {
    if state.repo.username_taken(&payload.username).await? {
        return Err(ApiError::conflict("Username already exists"));
    }
    if state.repo.student_matric_taken(&payload.student_id).await? {
        return Err(ApiError::conflict("Student ID already exists"));
    }

    let password_hash = hash_password(&payload.password)?;
    Ok(state
        .repo
        .create_student(NewStudent {
            name: payload.name.clone(),
            username: payload.username.clone(),
            password_hash,
            student_id: payload.student_id.clone(),
            faculty: payload.faculty.clone(),
            mobile_no: payload.mobile_no.clone(),
            enrollment_date: chrono::Utc::now().date_naive(),
        })
        .await?)
}

// ==================== ADMIN: STUDENT MANAGEMENT ====================

/// get_all_students
///
/// [Admin Route] Lists every student.
#[utoipa::path(
    get,
    path = "/api/admin/students",
    responses((status = 200, description = "All students", body = [Student]))
)]
pub async fn get_all_students(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    require_role(&auth, Role::Admin)?;
    Ok(Json(state.repo.list_students().await?))
}

/// get_student_by_id
///
/// [Admin Route] Fetches one student record.
#[utoipa::path(
    get,
    path = "/api/admin/students/{id}",
    params(("id" = i64, Path, description = "Student row id")),
    responses(
        (status = 200, description = "Found", body = Student),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_student_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, ApiError> {
    require_role(&auth, Role::Admin)?;
    let student = state
        .repo
        .find_student(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Student not found with id: {id}")))?;
    Ok(Json(student))
}

/// create_student
///
/// [Admin Route] Creates a student on a student's behalf.
#[utoipa::path(
    post,
    path = "/api/admin/students",
    request_body = StudentSignupRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 409, description = "Username or student id already taken")
    )
)]
pub async fn create_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<StudentSignupRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    require_role(&auth, Role::Admin)?;
    validated(&payload)?;
    let student = create_student_record(&state, &payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Student created successfully",
            "id": student.id,
            "student_id": student.student_id,
            "username": student.username,
        })),
    ))
}

/// update_student
///
/// [Admin Route] Updates a student's identity fields, re-checking
/// uniqueness for any changed username or student id.
#[utoipa::path(
    put,
    path = "/api/admin/students/{id}",
    params(("id" = i64, Path, description = "Student row id")),
    request_body = StudentUpdateRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Username or student id already taken")
    )
)]
pub async fn update_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StudentUpdateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_role(&auth, Role::Admin)?;
    validated(&payload)?;

    let student = state
        .repo
        .find_student(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Student not found with id: {id}")))?;

    if student.username != payload.username && state.repo.username_taken(&payload.username).await? {
        return Err(ApiError::conflict("Username already exists"));
    }
    if student.student_id != payload.student_id
        && state.repo.student_matric_taken(&payload.student_id).await?
    {
        return Err(ApiError::conflict("Student ID already exists"));
    }

    let updated = state
        .repo
        .update_student(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Student not found with id: {id}")))?;

    Ok(Json(json!({
        "message": "Student updated successfully",
        "student": updated,
    })))
}

/// delete_student
///
/// [Admin Route] Deletes a student together with their enrollment links.
#[utoipa::path(
    delete,
    path = "/api/admin/students/{id}",
    params(("id" = i64, Path, description = "Student row id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_role(&auth, Role::Admin)?;
    if !state.repo.delete_student(id).await? {
        return Err(ApiError::not_found(format!(
            "Student not found with id: {id}"
        )));
    }
    Ok(Json(MessageResponse {
        message: "Student deleted successfully".to_string(),
    }))
}

/// admin_dashboard
///
/// [Admin Route] Greeting endpoint for the admin landing page.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses((status = 200, description = "Greeting", body = MessageResponse))
)]
pub async fn admin_dashboard(auth: AuthUser) -> Result<Json<MessageResponse>, ApiError> {
    require_role(&auth, Role::Admin)?;
    Ok(Json(MessageResponse {
        message: "Welcome to Admin Dashboard".to_string(),
    }))
}

// ==================== ADMIN: LECTURER MANAGEMENT ====================

/// create_lecturer
///
/// [Admin Route] Creates a lecturer account.
#[utoipa::path(
    post,
    path = "/api/admin/lecturers",
    request_body = LecturerCreateRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 409, description = "Username or lecturer id already taken")
    )
)]
pub async fn create_lecturer(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<LecturerCreateRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    require_role(&auth, Role::Admin)?;
    validated(&payload)?;

    if state.repo.username_taken(&payload.username).await? {
        return Err(ApiError::conflict("Username already exists"));
    }
    if state
        .repo
        .lecturer_staff_id_taken(&payload.lecturer_id)
        .await?
    {
        return Err(ApiError::conflict("Lecturer ID already exists"));
    }

    let password_hash = hash_password(&payload.password)?;
    let lecturer = state
        .repo
        .create_lecturer(NewLecturer {
            name: payload.name,
            username: payload.username,
            password_hash,
            lecturer_id: payload.lecturer_id,
            department: payload.department,
            email: payload.email,
            mobile_no: payload.mobile_no,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Lecturer created successfully",
            "id": lecturer.id,
            "lecturer_id": lecturer.lecturer_id,
            "username": lecturer.username,
        })),
    ))
}

/// get_all_lecturers
///
/// [Admin Route] Lists every lecturer, without subject sets.
#[utoipa::path(
    get,
    path = "/api/admin/lecturers",
    responses((status = 200, description = "All lecturers", body = [Lecturer]))
)]
pub async fn get_all_lecturers(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Lecturer>>, ApiError> {
    require_role(&auth, Role::Admin)?;
    Ok(Json(state.repo.list_lecturers().await?))
}

/// get_lecturers_with_subjects
///
/// [Admin Route] Lists every lecturer with their assigned subject sets.
#[utoipa::path(
    get,
    path = "/api/admin/lecturers/with-subjects",
    responses((status = 200, description = "Lecturers with subjects", body = [LecturerResponse]))
)]
pub async fn get_lecturers_with_subjects(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<LecturerResponse>>, ApiError> {
    require_role(&auth, Role::Admin)?;
    Ok(Json(state.views.all_lecturer_responses().await?))
}

/// get_lecturer_by_id
///
/// [Admin Route] One lecturer with their subject set.
#[utoipa::path(
    get,
    path = "/api/admin/lecturers/{id}",
    params(("id" = i64, Path, description = "Lecturer row id")),
    responses(
        (status = 200, description = "Found", body = LecturerResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_lecturer_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LecturerResponse>, ApiError> {
    require_role(&auth, Role::Admin)?;
    Ok(Json(state.views.lecturer_response(id).await?))
}

/// update_lecturer
///
/// [Admin Route] Updates a lecturer's profile fields.
#[utoipa::path(
    put,
    path = "/api/admin/lecturers/{id}",
    params(("id" = i64, Path, description = "Lecturer row id")),
    request_body = LecturerUpdateRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_lecturer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<LecturerUpdateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_role(&auth, Role::Admin)?;
    validated(&payload)?;

    let updated = state
        .repo
        .update_lecturer(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Lecturer not found with id: {id}")))?;

    Ok(Json(json!({
        "message": "Lecturer updated successfully",
        "lecturer": updated,
    })))
}

/// delete_lecturer
///
/// [Admin Route] Deletes a lecturer together with their subject links.
#[utoipa::path(
    delete,
    path = "/api/admin/lecturers/{id}",
    params(("id" = i64, Path, description = "Lecturer row id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_lecturer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_role(&auth, Role::Admin)?;
    if !state.repo.delete_lecturer(id).await? {
        return Err(ApiError::not_found(format!(
            "Lecturer not found with id: {id}"
        )));
    }
    Ok(Json(MessageResponse {
        message: "Lecturer deleted successfully".to_string(),
    }))
}

// ==================== ADMIN: SUBJECT ASSIGNMENT ====================

// The four assignment endpoints keep the original surface: any failure is a
// 400 with an `{"error": …}` body, success is a 200 with a message.

fn assignment_error(err: ApiError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}

/// assign_subjects_to_lecturer
///
/// [Admin Route] Replaces a lecturer's subject set (max 3).
#[utoipa::path(
    post,
    path = "/api/admin/assign/lecturer",
    request_body = AssignSubjectsToLecturerRequest,
    responses(
        (status = 200, description = "Assigned", body = MessageResponse),
        (status = 400, description = "Unknown id or capacity exceeded")
    )
)]
pub async fn assign_subjects_to_lecturer(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<AssignSubjectsToLecturerRequest>,
) -> Result<Response, ApiError> {
    require_role(&auth, Role::Admin)?;
    match state
        .assignments
        .assign_subjects_to_lecturer(payload.lecturer_id, &payload.subject_ids)
        .await
    {
        Ok(count) => Ok(Json(MessageResponse {
            message: format!("Successfully assigned {count} subject(s) to lecturer"),
        })
        .into_response()),
        Err(err) => Ok(assignment_error(err)),
    }
}

/// assign_subjects_to_student
///
/// [Admin Route] Replaces a student's subject set (max 5).
#[utoipa::path(
    post,
    path = "/api/admin/assign/student",
    request_body = AssignSubjectsToStudentRequest,
    responses(
        (status = 200, description = "Enrolled", body = MessageResponse),
        (status = 400, description = "Unknown id or capacity exceeded")
    )
)]
pub async fn assign_subjects_to_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<AssignSubjectsToStudentRequest>,
) -> Result<Response, ApiError> {
    require_role(&auth, Role::Admin)?;
    match state
        .assignments
        .assign_subjects_to_student(payload.student_id, &payload.subject_ids)
        .await
    {
        Ok(count) => Ok(Json(MessageResponse {
            message: format!("Successfully enrolled student in {count} subject(s)"),
        })
        .into_response()),
        Err(err) => Ok(assignment_error(err)),
    }
}

/// remove_subject_from_lecturer
///
/// [Admin Route] Unlinks one subject from a lecturer. Removing a subject
/// that is not assigned succeeds without effect.
#[utoipa::path(
    delete,
    path = "/api/admin/assign/lecturer/{lecturer_id}/subject/{subject_id}",
    params(
        ("lecturer_id" = i64, Path, description = "Lecturer row id"),
        ("subject_id" = i64, Path, description = "Subject id")
    ),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 400, description = "Unknown id")
    )
)]
pub async fn remove_subject_from_lecturer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((lecturer_id, subject_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    require_role(&auth, Role::Admin)?;
    match state
        .assignments
        .remove_subject_from_lecturer(lecturer_id, subject_id)
        .await
    {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Subject removed from lecturer successfully".to_string(),
        })
        .into_response()),
        Err(err) => Ok(assignment_error(err)),
    }
}

/// remove_subject_from_student
///
/// [Admin Route] Unlinks one subject from a student, idempotently.
#[utoipa::path(
    delete,
    path = "/api/admin/assign/student/{student_id}/subject/{subject_id}",
    params(
        ("student_id" = i64, Path, description = "Student row id"),
        ("subject_id" = i64, Path, description = "Subject id")
    ),
    responses(
        (status = 200, description = "Removed", body = MessageResponse),
        (status = 400, description = "Unknown id")
    )
)]
pub async fn remove_subject_from_student(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((student_id, subject_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    require_role(&auth, Role::Admin)?;
    match state
        .assignments
        .remove_subject_from_student(student_id, subject_id)
        .await
    {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Subject removed from student successfully".to_string(),
        })
        .into_response()),
        Err(err) => Ok(assignment_error(err)),
    }
}

// ==================== SUBJECTS ====================

/// create_subject
///
/// [Admin Route] Creates a subject with a unique code.
#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = SubjectRequest,
    responses(
        (status = 201, description = "Created", body = SubjectResponse),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_subject(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), ApiError> {
    require_role(&auth, Role::Admin)?;
    validated(&payload)?;

    if state.repo.subject_code_taken(&payload.subject_code).await? {
        return Err(ApiError::conflict(format!(
            "Subject with code {} already exists",
            payload.subject_code
        )));
    }

    let subject = state.repo.create_subject(&payload).await?;
    // A freshly created subject has no links yet.
    Ok((
        StatusCode::CREATED,
        Json(SubjectResponse {
            id: subject.id,
            subject_name: subject.subject_name,
            subject_code: subject.subject_code,
            lecturer_count: 0,
            student_count: 0,
        }),
    ))
}

/// get_all_subjects
///
/// [Any Role] Lists all subjects ordered by name, with counts.
#[utoipa::path(
    get,
    path = "/api/subjects",
    responses((status = 200, description = "All subjects", body = [SubjectResponse]))
)]
pub async fn get_all_subjects(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubjectResponse>>, ApiError> {
    Ok(Json(state.repo.list_subjects_with_counts().await?))
}

/// get_subject_by_id
///
/// [Any Role] One subject with counts.
#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    params(("id" = i64, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Found", body = SubjectResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_subject_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let subject = state
        .repo
        .subject_with_counts(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Subject not found with id: {id}")))?;
    Ok(Json(subject))
}

/// get_subject_by_code
///
/// [Any Role] Subject lookup by its unique code.
#[utoipa::path(
    get,
    path = "/api/subjects/code/{code}",
    params(("code" = String, Path, description = "Subject code")),
    responses(
        (status = 200, description = "Found", body = SubjectResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_subject_by_code(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let subject = state
        .repo
        .find_subject_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Subject not found with code: {code}")))?;
    let enriched = state
        .repo
        .subject_with_counts(subject.id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Subject not found with code: {code}")))?;
    Ok(Json(enriched))
}

/// search_subjects
///
/// [Any Role] Partial-name subject search.
#[utoipa::path(
    get,
    path = "/api/subjects/search",
    params(SubjectSearchFilter),
    responses((status = 200, description = "Matching subjects", body = [SubjectResponse]))
)]
pub async fn search_subjects(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<SubjectSearchFilter>,
) -> Result<Json<Vec<SubjectResponse>>, ApiError> {
    Ok(Json(state.repo.search_subjects(&filter.name).await?))
}

/// update_subject
///
/// [Admin Route] Renames a subject and/or changes its code, keeping codes
/// unique.
#[utoipa::path(
    put,
    path = "/api/subjects/{id}",
    params(("id" = i64, Path, description = "Subject id")),
    request_body = SubjectRequest,
    responses(
        (status = 200, description = "Updated", body = SubjectResponse),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn update_subject(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SubjectRequest>,
) -> Result<Json<SubjectResponse>, ApiError> {
    require_role(&auth, Role::Admin)?;
    validated(&payload)?;

    let subject = state
        .repo
        .find_subject(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Subject not found with id: {id}")))?;

    if subject.subject_code != payload.subject_code
        && state.repo.subject_code_taken(&payload.subject_code).await?
    {
        return Err(ApiError::conflict(format!(
            "Subject with code {} already exists",
            payload.subject_code
        )));
    }

    let updated = state
        .repo
        .update_subject(id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Subject not found with id: {id}")))?;

    let (lecturer_count, student_count) = state.repo.subject_link_counts(updated.id).await?;
    Ok(Json(SubjectResponse {
        id: updated.id,
        subject_name: updated.subject_name,
        subject_code: updated.subject_code,
        lecturer_count,
        student_count,
    }))
}

/// delete_subject
///
/// [Admin Route] Deletes a subject. Refused while any lecturer or student
/// is still linked to it.
#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    params(("id" = i64, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Still assigned")
    )
)]
pub async fn delete_subject(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    require_role(&auth, Role::Admin)?;

    if state.repo.find_subject(id).await?.is_none() {
        return Err(ApiError::not_found(format!(
            "Subject not found with id: {id}"
        )));
    }

    let (lecturer_count, student_count) = state.repo.subject_link_counts(id).await?;
    if lecturer_count > 0 || student_count > 0 {
        return Err(ApiError::conflict(
            "Cannot delete subject that is assigned to lecturers or students",
        ));
    }

    state.repo.delete_subject(id).await?;
    Ok(Json(MessageResponse {
        message: "Subject deleted successfully".to_string(),
    }))
}

// ==================== LECTURER ====================

/// lecturer_dashboard
///
/// [Lecturer Route] Greeting endpoint for the lecturer landing page.
#[utoipa::path(
    get,
    path = "/api/lecturer/dashboard",
    responses((status = 200, description = "Greeting"))
)]
pub async fn lecturer_dashboard(auth: AuthUser) -> Result<Json<serde_json::Value>, ApiError> {
    require_role(&auth, Role::Lecturer)?;
    Ok(Json(json!({
        "message": "Welcome to Lecturer Dashboard",
        "username": auth.username,
    })))
}

/// lecturer_profile
///
/// [Lecturer Route] The authenticated lecturer's session identity.
#[utoipa::path(
    get,
    path = "/api/lecturer/profile",
    responses((status = 200, description = "Profile"))
)]
pub async fn lecturer_profile(auth: AuthUser) -> Result<Json<serde_json::Value>, ApiError> {
    require_role(&auth, Role::Lecturer)?;
    Ok(Json(json!({
        "username": auth.username,
        "role": Role::Lecturer,
    })))
}

/// lecturer_my_subjects
///
/// [Lecturer Route] The authenticated lecturer's subjects with counts.
#[utoipa::path(
    get,
    path = "/api/lecturer/my-subjects",
    responses((status = 200, description = "My subjects", body = LecturerSubjectsView))
)]
pub async fn lecturer_my_subjects(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<LecturerSubjectsView>, ApiError> {
    require_role(&auth, Role::Lecturer)?;
    Ok(Json(state.views.lecturer_subjects_view(auth.id).await?))
}

/// lecturer_my_students
///
/// [Lecturer Route] Distinct students enrolled in the lecturer's subjects,
/// annotated with the shared subject names.
#[utoipa::path(
    get,
    path = "/api/lecturer/my-students",
    responses((status = 200, description = "My students", body = LecturerStudentsView))
)]
pub async fn lecturer_my_students(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<LecturerStudentsView>, ApiError> {
    require_role(&auth, Role::Lecturer)?;
    Ok(Json(state.views.lecturer_students_view(auth.id).await?))
}

// ==================== STUDENT ====================

/// student_dashboard
///
/// [Student Route] Greeting endpoint for the student landing page.
#[utoipa::path(
    get,
    path = "/api/student/dashboard",
    responses((status = 200, description = "Greeting"))
)]
pub async fn student_dashboard(auth: AuthUser) -> Result<Json<serde_json::Value>, ApiError> {
    require_role(&auth, Role::Student)?;
    Ok(Json(json!({
        "message": "Welcome to Student Dashboard",
        "username": auth.username,
    })))
}

/// student_profile
///
/// [Student Route] The authenticated student's session identity.
#[utoipa::path(
    get,
    path = "/api/student/profile",
    responses((status = 200, description = "Profile"))
)]
pub async fn student_profile(auth: AuthUser) -> Result<Json<serde_json::Value>, ApiError> {
    require_role(&auth, Role::Student)?;
    Ok(Json(json!({
        "username": auth.username,
        "role": Role::Student,
    })))
}

/// student_my_subjects
///
/// [Student Route] The authenticated student's subjects, each with the
/// lecturers teaching it.
#[utoipa::path(
    get,
    path = "/api/student/my-subjects",
    responses((status = 200, description = "My subjects", body = StudentSubjectsView))
)]
pub async fn student_my_subjects(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<StudentSubjectsView>, ApiError> {
    require_role(&auth, Role::Student)?;
    Ok(Json(state.views.student_subjects_view(auth.id).await?))
}

/// student_my_lecturers
///
/// [Student Route] Distinct lecturers across the student's subjects,
/// annotated with the shared subject names.
#[utoipa::path(
    get,
    path = "/api/student/my-lecturers",
    responses((status = 200, description = "My lecturers", body = StudentLecturersView))
)]
pub async fn student_my_lecturers(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<StudentLecturersView>, ApiError> {
    require_role(&auth, Role::Student)?;
    Ok(Json(state.views.student_lecturers_view(auth.id).await?))
}
