use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

// --- Core Application Schemas (Mapped to Database) ---

/// Role
///
/// Discriminator for the user hierarchy. Each role has its own table
/// (`admins`, `lecturers`, `students`); the tag travels in JWT claims and
/// selects which table an identity resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Role {
    Admin,
    Lecturer,
    Student,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Lecturer => write!(f, "LECTURER"),
            Role::Student => write!(f, "STUDENT"),
        }
    }
}

/// Lecturer
///
/// Canonical lecturer record from the `lecturers` table. Subject links live
/// in the `lecturer_subjects` join table, never on the row itself; a
/// lecturer may hold at most three of them at a time.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Lecturer {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub mobile_no: Option<String>,
    pub username: String,
    // Argon2 hash. Never serialized out.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    // Staff identifier, unique among lecturers (e.g. "LEC-1042").
    pub lecturer_id: String,
    pub department: String,
    pub email: String,
}

/// Student
///
/// Student record from the `students` table. Enrollments live in the
/// `student_subjects` join table, capped at five per student.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub mobile_no: Option<String>,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    // Matriculation number, unique among students.
    pub student_id: String,
    pub faculty: String,
    #[ts(type = "string")]
    pub enrollment_date: NaiveDate,
}

/// Admin
///
/// Administrator record from the `admins` table. Created lazily on the first
/// successful login from the configured admin email; authentication is
/// OAuth-shaped, so there is no password hash here.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub oauth_provider: String,
    pub oauth_id: String,
}

/// Subject
///
/// A subject/course from the `subjects` table. Which lecturers teach it and
/// which students take it are derived views over the two join tables.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Subject {
    pub id: i64,
    pub subject_name: String,
    // Unique course code (e.g. "CS2012").
    pub subject_code: String,
    #[ts(type = "string")]
    pub created_at: NaiveDateTime,
    #[ts(type = "string")]
    pub updated_at: NaiveDateTime,
}

// --- Repository Input Records (Internal Use) ---

/// NewLecturer
///
/// Insertion record for the lecturers table. The password arrives already
/// hashed; uniqueness of username and lecturer_id is checked by the caller.
#[derive(Debug, Clone)]
pub struct NewLecturer {
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub lecturer_id: String,
    pub department: String,
    pub email: String,
    pub mobile_no: Option<String>,
}

/// NewStudent
///
/// Insertion record for the students table.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub student_id: String,
    pub faculty: String,
    pub mobile_no: Option<String>,
    pub enrollment_date: NaiveDate,
}

/// NewAdmin
///
/// Insertion record for the lazily created admin row.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub oauth_provider: String,
    pub oauth_id: String,
}

// --- Request Payloads (Input Schemas) ---

/// AdminLoginRequest
///
/// Input for POST /api/auth/admin/login. The email must match the configured
/// admin allow-list entry or the login is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AdminLoginRequest {
    pub email: String,
    pub oauth_provider: String,
}

/// LecturerLoginRequest
///
/// Input for POST /api/auth/lecturer/login. The username is picked from the
/// dropdown populated by GET /api/auth/lecturer/usernames.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LecturerLoginRequest {
    pub username: String,
    pub password: String,
}

/// StudentLoginRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct StudentLoginRequest {
    pub username: String,
    pub password: String,
}

/// StudentSignupRequest
///
/// Input for student self-registration and for admin-side student creation.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct StudentSignupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1, max = 20))]
    pub student_id: String,
    #[validate(length(min = 1, max = 100))]
    pub faculty: String,
    pub mobile_no: Option<String>,
}

/// StudentUpdateRequest
///
/// Admin-side update of a student's identity fields. Password is not
/// touched here.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct StudentUpdateRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 20))]
    pub student_id: String,
    #[validate(length(min = 1, max = 100))]
    pub faculty: String,
    pub mobile_no: Option<String>,
}

/// LecturerCreateRequest
///
/// Admin-side lecturer creation (POST /api/admin/lecturers).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct LecturerCreateRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1, max = 20))]
    pub lecturer_id: String,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
    #[validate(email)]
    pub email: String,
    pub mobile_no: Option<String>,
}

/// LecturerUpdateRequest
///
/// Admin-side update of a lecturer's profile fields. Username, staff id and
/// password stay as they are.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct LecturerUpdateRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
    #[validate(email)]
    pub email: String,
    pub mobile_no: Option<String>,
}

/// SubjectRequest
///
/// Create/update payload for a subject. Column widths mirror the table
/// definition (name 100, code 20).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct SubjectRequest {
    #[validate(length(min = 1, max = 100))]
    pub subject_name: String,
    #[validate(length(min = 1, max = 20))]
    pub subject_code: String,
}

/// AssignSubjectsToLecturerRequest
///
/// Input for POST /api/admin/assign/lecturer. The list replaces the
/// lecturer's entire subject set (clear-then-add), at most three entries.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AssignSubjectsToLecturerRequest {
    pub lecturer_id: i64,
    pub subject_ids: Vec<i64>,
}

/// AssignSubjectsToStudentRequest
///
/// Input for POST /api/admin/assign/student, at most five entries.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AssignSubjectsToStudentRequest {
    pub student_id: i64,
    pub subject_ids: Vec<i64>,
}

// --- Response Schemas (Output) ---

/// AuthResponse
///
/// Token envelope returned by every successful login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
}

/// MessageResponse
///
/// Generic `{"message": …}` body used by mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

/// LecturerUsernamesResponse
///
/// Payload for the lecturer login dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LecturerUsernamesResponse {
    pub usernames: Vec<String>,
}

/// SubjectResponse
///
/// Subject enriched with how many lecturers teach it and how many students
/// take it. The counts are aggregated over the join tables in the
/// repository query.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct SubjectResponse {
    pub id: i64,
    pub subject_name: String,
    pub subject_code: String,
    pub lecturer_count: i64,
    pub student_count: i64,
}

/// SubjectSummary
///
/// Minimal subject reference embedded in lecturer/student views.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SubjectSummary {
    pub id: i64,
    pub subject_name: String,
    pub subject_code: String,
}

impl From<Subject> for SubjectSummary {
    fn from(s: Subject) -> Self {
        SubjectSummary {
            id: s.id,
            subject_name: s.subject_name,
            subject_code: s.subject_code,
        }
    }
}

/// LecturerResponse
///
/// Admin-facing lecturer view: profile fields plus the current subject set.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LecturerResponse {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub lecturer_id: String,
    pub department: String,
    pub email: String,
    pub mobile_no: Option<String>,
    pub subjects: Vec<SubjectSummary>,
    pub subject_count: usize,
}

// --- Derived View Schemas (Query Façade Output) ---

/// LecturerSubjectsView
///
/// GET /api/lecturer/my-subjects: the lecturer's subject snapshot with
/// per-subject teaching/enrollment counts.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LecturerSubjectsView {
    pub lecturer_name: String,
    pub department: String,
    pub subject_count: usize,
    pub subjects: Vec<SubjectResponse>,
}

/// StudentWithSharedSubjects
///
/// One row of a lecturer's student roster: the student plus the names of
/// the subjects they share with the lecturer.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct StudentWithSharedSubjects {
    pub id: i64,
    pub name: String,
    pub student_id: String,
    pub faculty: String,
    pub username: String,
    pub enrolled_subjects: Vec<String>,
}

/// LecturerStudentsView
///
/// GET /api/lecturer/my-students: distinct students enrolled in any of the
/// lecturer's subjects.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LecturerStudentsView {
    pub lecturer_name: String,
    pub student_count: usize,
    pub students: Vec<StudentWithSharedSubjects>,
}

/// LecturerSummary
///
/// Minimal lecturer reference embedded in student-facing views.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LecturerSummary {
    pub name: String,
    pub department: String,
    pub email: String,
}

/// SubjectWithLecturers
///
/// One row of a student's subject list: the subject plus the lecturers
/// teaching it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SubjectWithLecturers {
    pub id: i64,
    pub subject_name: String,
    pub subject_code: String,
    pub lecturers: Vec<LecturerSummary>,
}

/// StudentSubjectsView
///
/// GET /api/student/my-subjects.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct StudentSubjectsView {
    pub student_name: String,
    pub student_id: String,
    pub faculty: String,
    pub subject_count: usize,
    pub subjects: Vec<SubjectWithLecturers>,
}

/// LecturerWithSharedSubjects
///
/// One row of a student's lecturer roster: the lecturer plus the names of
/// the subjects shared with the student.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LecturerWithSharedSubjects {
    pub name: String,
    pub lecturer_id: String,
    pub department: String,
    pub email: String,
    pub subjects: Vec<String>,
}

/// StudentLecturersView
///
/// GET /api/student/my-lecturers: distinct lecturers across the student's
/// subjects.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct StudentLecturersView {
    pub student_name: String,
    pub lecturer_count: usize,
    pub lecturers: Vec<LecturerWithSharedSubjects>,
}
