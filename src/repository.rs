use crate::models::{
    Admin, Lecturer, LecturerUpdateRequest, NewAdmin, NewLecturer, NewStudent, Student,
    StudentUpdateRequest, Subject, SubjectRequest, SubjectResponse,
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

/// Repository Trait
///
/// The abstract contract for all persistence operations: per-entity CRUD,
/// the join-record operations backing subject assignment, and the derived
/// lookups the read side is built from. Handlers and services only ever see
/// this trait, so tests swap in an in-memory implementation.
///
/// Relationships are stored exclusively as join records
/// (`lecturer_subjects`, `student_subjects`); "reverse" views such as a
/// subject's lecturers are lookups over those records, never stored
/// back-references.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable across Axum's task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Lecturers ---
    async fn create_lecturer(&self, new: NewLecturer) -> Result<Lecturer, sqlx::Error>;
    async fn find_lecturer(&self, id: i64) -> Result<Option<Lecturer>, sqlx::Error>;
    async fn find_lecturer_by_username(&self, username: &str)
    -> Result<Option<Lecturer>, sqlx::Error>;
    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, sqlx::Error>;
    // Usernames for the login dropdown, sorted.
    async fn lecturer_usernames(&self) -> Result<Vec<String>, sqlx::Error>;
    async fn update_lecturer(
        &self,
        id: i64,
        req: &LecturerUpdateRequest,
    ) -> Result<Option<Lecturer>, sqlx::Error>;
    // Returns false when no such row existed. Join records go with the row.
    async fn delete_lecturer(&self, id: i64) -> Result<bool, sqlx::Error>;
    async fn lecturer_staff_id_taken(&self, lecturer_id: &str) -> Result<bool, sqlx::Error>;

    // --- Students ---
    async fn create_student(&self, new: NewStudent) -> Result<Student, sqlx::Error>;
    async fn find_student(&self, id: i64) -> Result<Option<Student>, sqlx::Error>;
    async fn find_student_by_username(&self, username: &str)
    -> Result<Option<Student>, sqlx::Error>;
    async fn list_students(&self) -> Result<Vec<Student>, sqlx::Error>;
    async fn update_student(
        &self,
        id: i64,
        req: &StudentUpdateRequest,
    ) -> Result<Option<Student>, sqlx::Error>;
    async fn delete_student(&self, id: i64) -> Result<bool, sqlx::Error>;
    async fn student_matric_taken(&self, student_id: &str) -> Result<bool, sqlx::Error>;

    // --- Admins ---
    async fn find_admin(&self, id: i64) -> Result<Option<Admin>, sqlx::Error>;
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, sqlx::Error>;
    async fn create_admin(&self, new: NewAdmin) -> Result<Admin, sqlx::Error>;

    // --- Cross-hierarchy checks ---
    // Usernames are unique across admins, lecturers and students together.
    async fn username_taken(&self, username: &str) -> Result<bool, sqlx::Error>;

    // --- Subjects ---
    async fn create_subject(&self, req: &SubjectRequest) -> Result<Subject, sqlx::Error>;
    async fn find_subject(&self, id: i64) -> Result<Option<Subject>, sqlx::Error>;
    async fn find_subject_by_code(&self, code: &str) -> Result<Option<Subject>, sqlx::Error>;
    async fn subject_code_taken(&self, code: &str) -> Result<bool, sqlx::Error>;
    // Ordered by subject name, each row carrying lecturer/student counts.
    async fn list_subjects_with_counts(&self) -> Result<Vec<SubjectResponse>, sqlx::Error>;
    async fn search_subjects(&self, name: &str) -> Result<Vec<SubjectResponse>, sqlx::Error>;
    async fn subject_with_counts(&self, id: i64) -> Result<Option<SubjectResponse>, sqlx::Error>;
    async fn update_subject(
        &self,
        id: i64,
        req: &SubjectRequest,
    ) -> Result<Option<Subject>, sqlx::Error>;
    async fn delete_subject(&self, id: i64) -> Result<bool, sqlx::Error>;
    // (lecturer link count, student link count) for the delete guard.
    async fn subject_link_counts(&self, id: i64) -> Result<(i64, i64), sqlx::Error>;

    // --- Assignment join records ---
    async fn subjects_for_lecturer(&self, lecturer_id: i64) -> Result<Vec<Subject>, sqlx::Error>;
    async fn subjects_for_student(&self, student_id: i64) -> Result<Vec<Subject>, sqlx::Error>;
    async fn lecturers_for_subject(&self, subject_id: i64) -> Result<Vec<Lecturer>, sqlx::Error>;
    /// Clears the lecturer's subject set and links the given ids, atomically.
    async fn replace_lecturer_subjects(
        &self,
        lecturer_id: i64,
        subject_ids: &[i64],
    ) -> Result<(), sqlx::Error>;
    async fn replace_student_subjects(
        &self,
        student_id: i64,
        subject_ids: &[i64],
    ) -> Result<(), sqlx::Error>;
    // Single-link operations. Insert is a no-op on an existing pair;
    // returns whether a record was actually inserted/removed.
    async fn link_lecturer_subject(
        &self,
        lecturer_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error>;
    async fn unlink_lecturer_subject(
        &self,
        lecturer_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error>;
    async fn link_student_subject(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error>;
    async fn unlink_student_subject(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error>;
    /// Distinct students linked to any of the given subjects.
    async fn students_for_subjects(&self, subject_ids: &[i64])
    -> Result<Vec<Student>, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by the
/// PostgreSQL database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const LECTURER_COLS: &str =
    "id, name, address, mobile_no, username, password_hash, lecturer_id, department, email";
const STUDENT_COLS: &str =
    "id, name, address, mobile_no, username, password_hash, student_id, faculty, enrollment_date";
const SUBJECT_COLS: &str = "id, subject_name, subject_code, created_at, updated_at";

// Subject row enriched with the two join-table counts.
const SUBJECT_WITH_COUNTS: &str = r#"
    SELECT s.id, s.subject_name, s.subject_code,
           (SELECT COUNT(*) FROM lecturer_subjects ls WHERE ls.subject_id = s.id) AS lecturer_count,
           (SELECT COUNT(*) FROM student_subjects ss WHERE ss.subject_id = s.id) AS student_count
    FROM subjects s
"#;

#[async_trait]
impl Repository for PostgresRepository {
    // --- Lecturers ---

    async fn create_lecturer(&self, new: NewLecturer) -> Result<Lecturer, sqlx::Error> {
        sqlx::query_as::<_, Lecturer>(&format!(
            "INSERT INTO lecturers (name, username, password_hash, lecturer_id, department, email, mobile_no) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {LECTURER_COLS}"
        ))
        .bind(&new.name)
        .bind(&new.username)
        .bind(&new.password_hash)
        .bind(&new.lecturer_id)
        .bind(&new.department)
        .bind(&new.email)
        .bind(&new.mobile_no)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_lecturer(&self, id: i64) -> Result<Option<Lecturer>, sqlx::Error> {
        sqlx::query_as::<_, Lecturer>(&format!(
            "SELECT {LECTURER_COLS} FROM lecturers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_lecturer_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Lecturer>, sqlx::Error> {
        sqlx::query_as::<_, Lecturer>(&format!(
            "SELECT {LECTURER_COLS} FROM lecturers WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, sqlx::Error> {
        sqlx::query_as::<_, Lecturer>(&format!(
            "SELECT {LECTURER_COLS} FROM lecturers ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn lecturer_usernames(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT username FROM lecturers ORDER BY username ASC")
            .fetch_all(&self.pool)
            .await
    }

    async fn update_lecturer(
        &self,
        id: i64,
        req: &LecturerUpdateRequest,
    ) -> Result<Option<Lecturer>, sqlx::Error> {
        sqlx::query_as::<_, Lecturer>(&format!(
            "UPDATE lecturers SET name = $2, department = $3, email = $4, mobile_no = $5 \
             WHERE id = $1 RETURNING {LECTURER_COLS}"
        ))
        .bind(id)
        .bind(&req.name)
        .bind(&req.department)
        .bind(&req.email)
        .bind(&req.mobile_no)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_lecturer(&self, id: i64) -> Result<bool, sqlx::Error> {
        // Join records first so the row delete cannot strand any.
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM lecturer_subjects WHERE lecturer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM lecturers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(res.rows_affected() > 0)
    }

    async fn lecturer_staff_id_taken(&self, lecturer_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM lecturers WHERE lecturer_id = $1)",
        )
        .bind(lecturer_id)
        .fetch_one(&self.pool)
        .await
    }

    // --- Students ---

    async fn create_student(&self, new: NewStudent) -> Result<Student, sqlx::Error> {
        sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (name, username, password_hash, student_id, faculty, mobile_no, enrollment_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {STUDENT_COLS}"
        ))
        .bind(&new.name)
        .bind(&new.username)
        .bind(&new.password_hash)
        .bind(&new.student_id)
        .bind(&new.faculty)
        .bind(&new.mobile_no)
        .bind(new.enrollment_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_student(&self, id: i64) -> Result<Option<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLS} FROM students WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_student_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLS} FROM students WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_students(&self) -> Result<Vec<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLS} FROM students ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn update_student(
        &self,
        id: i64,
        req: &StudentUpdateRequest,
    ) -> Result<Option<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET name = $2, username = $3, student_id = $4, faculty = $5, mobile_no = $6 \
             WHERE id = $1 RETURNING {STUDENT_COLS}"
        ))
        .bind(id)
        .bind(&req.name)
        .bind(&req.username)
        .bind(&req.student_id)
        .bind(&req.faculty)
        .bind(&req.mobile_no)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_student(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM student_subjects WHERE student_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(res.rows_affected() > 0)
    }

    async fn student_matric_taken(&self, student_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE student_id = $1)")
            .bind(student_id)
            .fetch_one(&self.pool)
            .await
    }

    // --- Admins ---

    async fn find_admin(&self, id: i64) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(
            "SELECT id, name, username, email, oauth_provider, oauth_id FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(
            "SELECT id, name, username, email, oauth_provider, oauth_id FROM admins \
             WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_admin(&self, new: NewAdmin) -> Result<Admin, sqlx::Error> {
        // The admin authenticates by email, so the email doubles as username.
        sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (name, username, email, oauth_provider, oauth_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, name, username, email, oauth_provider, oauth_id",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.email)
        .bind(&new.oauth_provider)
        .bind(&new.oauth_id)
        .fetch_one(&self.pool)
        .await
    }

    // --- Cross-hierarchy checks ---

    async fn username_taken(&self, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM lecturers WHERE username = $1) \
                 OR EXISTS(SELECT 1 FROM students WHERE username = $1) \
                 OR EXISTS(SELECT 1 FROM admins WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
    }

    // --- Subjects ---

    async fn create_subject(&self, req: &SubjectRequest) -> Result<Subject, sqlx::Error> {
        sqlx::query_as::<_, Subject>(&format!(
            "INSERT INTO subjects (subject_name, subject_code, created_at, updated_at) \
             VALUES ($1, $2, NOW(), NOW()) RETURNING {SUBJECT_COLS}"
        ))
        .bind(&req.subject_name)
        .bind(&req.subject_code)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_subject(&self, id: i64) -> Result<Option<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(&format!("SELECT {SUBJECT_COLS} FROM subjects WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_subject_by_code(&self, code: &str) -> Result<Option<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLS} FROM subjects WHERE subject_code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
    }

    async fn subject_code_taken(&self, code: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM subjects WHERE subject_code = $1)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_subjects_with_counts(&self) -> Result<Vec<SubjectResponse>, sqlx::Error> {
        sqlx::query_as::<_, SubjectResponse>(&format!(
            "{SUBJECT_WITH_COUNTS} ORDER BY s.subject_name ASC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    async fn search_subjects(&self, name: &str) -> Result<Vec<SubjectResponse>, sqlx::Error> {
        let pattern = format!("%{name}%");
        sqlx::query_as::<_, SubjectResponse>(&format!(
            "{SUBJECT_WITH_COUNTS} WHERE s.subject_name ILIKE $1 ORDER BY s.subject_name ASC"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
    }

    async fn subject_with_counts(&self, id: i64) -> Result<Option<SubjectResponse>, sqlx::Error> {
        sqlx::query_as::<_, SubjectResponse>(&format!("{SUBJECT_WITH_COUNTS} WHERE s.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_subject(
        &self,
        id: i64,
        req: &SubjectRequest,
    ) -> Result<Option<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(&format!(
            "UPDATE subjects SET subject_name = $2, subject_code = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {SUBJECT_COLS}"
        ))
        .bind(id)
        .bind(&req.subject_name)
        .bind(&req.subject_code)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool, sqlx::Error> {
        let res = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn subject_link_counts(&self, id: i64) -> Result<(i64, i64), sqlx::Error> {
        let lecturers = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM lecturer_subjects WHERE subject_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        let students = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM student_subjects WHERE subject_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok((lecturers, students))
    }

    // --- Assignment join records ---

    async fn subjects_for_lecturer(&self, lecturer_id: i64) -> Result<Vec<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(
            "SELECT s.id, s.subject_name, s.subject_code, s.created_at, s.updated_at \
             FROM subjects s JOIN lecturer_subjects ls ON s.id = ls.subject_id \
             WHERE ls.lecturer_id = $1 ORDER BY s.subject_name ASC",
        )
        .bind(lecturer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn subjects_for_student(&self, student_id: i64) -> Result<Vec<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(
            "SELECT s.id, s.subject_name, s.subject_code, s.created_at, s.updated_at \
             FROM subjects s JOIN student_subjects ss ON s.id = ss.subject_id \
             WHERE ss.student_id = $1 ORDER BY s.subject_name ASC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn lecturers_for_subject(&self, subject_id: i64) -> Result<Vec<Lecturer>, sqlx::Error> {
        sqlx::query_as::<_, Lecturer>(
            "SELECT l.id, l.name, l.address, l.mobile_no, l.username, l.password_hash, \
                    l.lecturer_id, l.department, l.email \
             FROM lecturers l JOIN lecturer_subjects ls ON l.id = ls.lecturer_id \
             WHERE ls.subject_id = $1 ORDER BY l.name ASC",
        )
        .bind(subject_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn replace_lecturer_subjects(
        &self,
        lecturer_id: i64,
        subject_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        // Clear-then-add inside a single transaction; concurrent assignments
        // on the same lecturer serialize on the row locks.
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM lecturer_subjects WHERE lecturer_id = $1")
            .bind(lecturer_id)
            .execute(&mut *tx)
            .await?;
        for subject_id in subject_ids {
            sqlx::query(
                "INSERT INTO lecturer_subjects (lecturer_id, subject_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(lecturer_id)
            .bind(subject_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    async fn replace_student_subjects(
        &self,
        student_id: i64,
        subject_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM student_subjects WHERE student_id = $1")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;
        for subject_id in subject_ids {
            sqlx::query(
                "INSERT INTO student_subjects (student_id, subject_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(student_id)
            .bind(subject_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    async fn link_lecturer_subject(
        &self,
        lecturer_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query(
            "INSERT INTO lecturer_subjects (lecturer_id, subject_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(lecturer_id)
        .bind(subject_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn unlink_lecturer_subject(
        &self,
        lecturer_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let res =
            sqlx::query("DELETE FROM lecturer_subjects WHERE lecturer_id = $1 AND subject_id = $2")
                .bind(lecturer_id)
                .bind(subject_id)
                .execute(&self.pool)
                .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn link_student_subject(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query(
            "INSERT INTO student_subjects (student_id, subject_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(student_id)
        .bind(subject_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn unlink_student_subject(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let res =
            sqlx::query("DELETE FROM student_subjects WHERE student_id = $1 AND subject_id = $2")
                .bind(student_id)
                .bind(subject_id)
                .execute(&self.pool)
                .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn students_for_subjects(
        &self,
        subject_ids: &[i64],
    ) -> Result<Vec<Student>, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            "SELECT DISTINCT st.id, st.name, st.address, st.mobile_no, st.username, \
                    st.password_hash, st.student_id, st.faculty, st.enrollment_date \
             FROM students st JOIN student_subjects ss ON st.id = ss.student_id \
             WHERE ss.subject_id = ANY($1) ORDER BY st.id ASC",
        )
        .bind(subject_ids)
        .fetch_all(&self.pool)
        .await
    }
}
