use crate::{
    error::ApiError,
    models::{Lecturer, Student, Subject},
    repository::RepositoryState,
};

/// Maximum number of subjects a lecturer may teach at once.
pub const LECTURER_SUBJECT_LIMIT: usize = 3;
/// Maximum number of subjects a student may be enrolled in at once.
pub const STUDENT_SUBJECT_LIMIT: usize = 5;

/// AssignmentEngine
///
/// Owns the many-to-many relationship between lecturers/students and
/// subjects: capacity limits, clear-then-add batch assignment, idempotent
/// removal, and the derived student roster for a lecturer. Everything goes
/// through the repository trait; the engine never talks to the database
/// directly.
///
/// Validation is all-or-nothing: every identifier in a request is resolved
/// before the first mutating step, so a failed request leaves the previous
/// assignment fully intact.
#[derive(Clone)]
pub struct AssignmentEngine {
    repo: RepositoryState,
}

impl AssignmentEngine {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }

    /// Replaces a lecturer's entire subject set with the requested ids.
    ///
    /// Fails with `NotFound` if the lecturer or any subject id is missing,
    /// and with `CapacityExceeded` if more than three ids are requested.
    /// The size check runs before anything is cleared. Returns the number
    /// of assigned subjects.
    pub async fn assign_subjects_to_lecturer(
        &self,
        lecturer_id: i64,
        subject_ids: &[i64],
    ) -> Result<usize, ApiError> {
        let lecturer = self.require_lecturer(lecturer_id).await?;

        if subject_ids.len() > LECTURER_SUBJECT_LIMIT {
            return Err(ApiError::capacity(format!(
                "A lecturer can only be assigned to a maximum of {LECTURER_SUBJECT_LIMIT} subjects"
            )));
        }

        self.require_subjects(subject_ids).await?;

        self.repo
            .replace_lecturer_subjects(lecturer.id, subject_ids)
            .await?;

        tracing::info!(
            lecturer_id = lecturer.id,
            count = subject_ids.len(),
            "assigned subjects to lecturer"
        );
        Ok(subject_ids.len())
    }

    /// Replaces a student's entire subject set. Same contract as the
    /// lecturer variant with a limit of five.
    pub async fn assign_subjects_to_student(
        &self,
        student_id: i64,
        subject_ids: &[i64],
    ) -> Result<usize, ApiError> {
        let student = self.require_student(student_id).await?;

        if subject_ids.len() > STUDENT_SUBJECT_LIMIT {
            return Err(ApiError::capacity(format!(
                "A student can only be enrolled in a maximum of {STUDENT_SUBJECT_LIMIT} subjects"
            )));
        }

        self.require_subjects(subject_ids).await?;

        self.repo
            .replace_student_subjects(student.id, subject_ids)
            .await?;

        tracing::info!(
            student_id = student.id,
            count = subject_ids.len(),
            "enrolled student in subjects"
        );
        Ok(subject_ids.len())
    }

    /// Adds a single subject to a lecturer's set.
    ///
    /// Fails with `CapacityExceeded` when the set already holds the maximum;
    /// linking an already-linked subject is otherwise a no-op.
    pub async fn add_subject_to_lecturer(
        &self,
        lecturer_id: i64,
        subject_id: i64,
    ) -> Result<(), ApiError> {
        let lecturer = self.require_lecturer(lecturer_id).await?;
        let subject = self.require_subject(subject_id).await?;

        let current = self.repo.subjects_for_lecturer(lecturer.id).await?;
        if current.len() >= LECTURER_SUBJECT_LIMIT {
            return Err(ApiError::capacity(format!(
                "A lecturer can only be assigned to a maximum of {LECTURER_SUBJECT_LIMIT} subjects"
            )));
        }

        self.repo
            .link_lecturer_subject(lecturer.id, subject.id)
            .await?;
        Ok(())
    }

    /// Adds a single subject to a student's set, limit five.
    pub async fn add_subject_to_student(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<(), ApiError> {
        let student = self.require_student(student_id).await?;
        let subject = self.require_subject(subject_id).await?;

        let current = self.repo.subjects_for_student(student.id).await?;
        if current.len() >= STUDENT_SUBJECT_LIMIT {
            return Err(ApiError::capacity(format!(
                "A student can only be enrolled in a maximum of {STUDENT_SUBJECT_LIMIT} subjects"
            )));
        }

        self.repo
            .link_student_subject(student.id, subject.id)
            .await?;
        Ok(())
    }

    /// Removes one subject from a lecturer. Removing a subject that is not
    /// currently assigned is a no-op, not an error.
    pub async fn remove_subject_from_lecturer(
        &self,
        lecturer_id: i64,
        subject_id: i64,
    ) -> Result<(), ApiError> {
        let lecturer = self.require_lecturer(lecturer_id).await?;
        let subject = self.require_subject(subject_id).await?;

        self.repo
            .unlink_lecturer_subject(lecturer.id, subject.id)
            .await?;
        Ok(())
    }

    /// Removes one subject from a student, idempotently.
    pub async fn remove_subject_from_student(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<(), ApiError> {
        let student = self.require_student(student_id).await?;
        let subject = self.require_subject(subject_id).await?;

        self.repo
            .unlink_student_subject(student.id, subject.id)
            .await?;
        Ok(())
    }

    /// Snapshot of the lecturer's current subject set.
    pub async fn lecturer_subjects(&self, lecturer_id: i64) -> Result<Vec<Subject>, ApiError> {
        let lecturer = self.require_lecturer(lecturer_id).await?;
        Ok(self.repo.subjects_for_lecturer(lecturer.id).await?)
    }

    /// Snapshot of the student's current subject set.
    pub async fn student_subjects(&self, student_id: i64) -> Result<Vec<Subject>, ApiError> {
        let student = self.require_student(student_id).await?;
        Ok(self.repo.subjects_for_student(student.id).await?)
    }

    /// Distinct students who share at least one subject with the lecturer's
    /// taught subjects.
    pub async fn students_for_lecturer(&self, lecturer_id: i64) -> Result<Vec<Student>, ApiError> {
        let lecturer = self.require_lecturer(lecturer_id).await?;
        let subjects = self.repo.subjects_for_lecturer(lecturer.id).await?;
        if subjects.is_empty() {
            return Ok(Vec::new());
        }
        let subject_ids: Vec<i64> = subjects.iter().map(|s| s.id).collect();
        Ok(self.repo.students_for_subjects(&subject_ids).await?)
    }

    // --- Lookup helpers ---

    async fn require_lecturer(&self, id: i64) -> Result<Lecturer, ApiError> {
        self.repo
            .find_lecturer(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Lecturer not found with id: {id}")))
    }

    async fn require_student(&self, id: i64) -> Result<Student, ApiError> {
        self.repo
            .find_student(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Student not found with id: {id}")))
    }

    async fn require_subject(&self, id: i64) -> Result<Subject, ApiError> {
        self.repo
            .find_subject(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Subject not found with id: {id}")))
    }

    /// Resolves every id in the batch before any mutation happens.
    async fn require_subjects(&self, ids: &[i64]) -> Result<(), ApiError> {
        for &id in ids {
            self.require_subject(id).await?;
        }
        Ok(())
    }
}
