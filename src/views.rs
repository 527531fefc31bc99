use std::collections::BTreeMap;

use crate::{
    error::ApiError,
    models::{
        Lecturer, LecturerResponse, LecturerStudentsView, LecturerSubjectsView, LecturerSummary,
        LecturerWithSharedSubjects, Student, StudentLecturersView, StudentSubjectsView,
        StudentWithSharedSubjects, SubjectWithLecturers,
    },
    repository::RepositoryState,
};

/// QueryService
///
/// The read side: derives cross-entity views over the entity store. Every
/// method is a pure read; nothing in this module mutates state.
#[derive(Clone)]
pub struct QueryService {
    repo: RepositoryState,
}

impl QueryService {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }

    /// A lecturer's subjects, each carrying its lecturer/student counts.
    pub async fn lecturer_subjects_view(
        &self,
        lecturer_id: i64,
    ) -> Result<LecturerSubjectsView, ApiError> {
        let lecturer = self.require_lecturer(lecturer_id).await?;
        let subjects = self.repo.subjects_for_lecturer(lecturer.id).await?;

        let mut enriched = Vec::with_capacity(subjects.len());
        for subject in &subjects {
            // The subject was just read, so the counts row is present.
            if let Some(counts) = self.repo.subject_with_counts(subject.id).await? {
                enriched.push(counts);
            }
        }

        Ok(LecturerSubjectsView {
            lecturer_name: lecturer.name,
            department: lecturer.department,
            subject_count: enriched.len(),
            subjects: enriched,
        })
    }

    /// A lecturer's roster: distinct students enrolled in any of the
    /// lecturer's subjects, annotated with the shared subject names.
    pub async fn lecturer_students_view(
        &self,
        lecturer_id: i64,
    ) -> Result<LecturerStudentsView, ApiError> {
        let lecturer = self.require_lecturer(lecturer_id).await?;
        let taught = self.repo.subjects_for_lecturer(lecturer.id).await?;

        let mut students = Vec::new();
        if !taught.is_empty() {
            let taught_ids: Vec<i64> = taught.iter().map(|s| s.id).collect();
            for student in self.repo.students_for_subjects(&taught_ids).await? {
                let enrolled = self.repo.subjects_for_student(student.id).await?;
                let shared: Vec<String> = enrolled
                    .into_iter()
                    .filter(|s| taught_ids.contains(&s.id))
                    .map(|s| s.subject_name)
                    .collect();
                students.push(StudentWithSharedSubjects {
                    id: student.id,
                    name: student.name,
                    student_id: student.student_id,
                    faculty: student.faculty,
                    username: student.username,
                    enrolled_subjects: shared,
                });
            }
        }

        Ok(LecturerStudentsView {
            lecturer_name: lecturer.name,
            student_count: students.len(),
            students,
        })
    }

    /// A student's subjects, each carrying the lecturers teaching it.
    pub async fn student_subjects_view(
        &self,
        student_id: i64,
    ) -> Result<StudentSubjectsView, ApiError> {
        let student = self.require_student(student_id).await?;
        let enrolled = self.repo.subjects_for_student(student.id).await?;

        let mut subjects = Vec::with_capacity(enrolled.len());
        for subject in enrolled {
            let lecturers = self
                .repo
                .lecturers_for_subject(subject.id)
                .await?
                .into_iter()
                .map(|l| LecturerSummary {
                    name: l.name,
                    department: l.department,
                    email: l.email,
                })
                .collect();
            subjects.push(SubjectWithLecturers {
                id: subject.id,
                subject_name: subject.subject_name,
                subject_code: subject.subject_code,
                lecturers,
            });
        }

        Ok(StudentSubjectsView {
            student_name: student.name,
            student_id: student.student_id,
            faculty: student.faculty,
            subject_count: subjects.len(),
            subjects,
        })
    }

    /// A student's roster: the distinct lecturers across the student's
    /// subjects, each annotated with the subject names shared with the
    /// student. A lecturer teaching two of the student's subjects appears
    /// once, with both names.
    pub async fn student_lecturers_view(
        &self,
        student_id: i64,
    ) -> Result<StudentLecturersView, ApiError> {
        let student = self.require_student(student_id).await?;
        let enrolled = self.repo.subjects_for_student(student.id).await?;

        let mut by_lecturer: BTreeMap<i64, LecturerWithSharedSubjects> = BTreeMap::new();
        for subject in &enrolled {
            for lecturer in self.repo.lecturers_for_subject(subject.id).await? {
                by_lecturer
                    .entry(lecturer.id)
                    .or_insert_with(|| LecturerWithSharedSubjects {
                        name: lecturer.name,
                        lecturer_id: lecturer.lecturer_id,
                        department: lecturer.department,
                        email: lecturer.email,
                        subjects: Vec::new(),
                    })
                    .subjects
                    .push(subject.subject_name.clone());
            }
        }

        let lecturers: Vec<LecturerWithSharedSubjects> = by_lecturer.into_values().collect();
        Ok(StudentLecturersView {
            student_name: student.name,
            lecturer_count: lecturers.len(),
            lecturers,
        })
    }

    /// Admin view of one lecturer with the current subject set.
    pub async fn lecturer_response(&self, lecturer_id: i64) -> Result<LecturerResponse, ApiError> {
        let lecturer = self.require_lecturer(lecturer_id).await?;
        self.to_lecturer_response(lecturer).await
    }

    /// Admin view of every lecturer with their subject sets.
    pub async fn all_lecturer_responses(&self) -> Result<Vec<LecturerResponse>, ApiError> {
        let lecturers = self.repo.list_lecturers().await?;
        let mut responses = Vec::with_capacity(lecturers.len());
        for lecturer in lecturers {
            responses.push(self.to_lecturer_response(lecturer).await?);
        }
        Ok(responses)
    }

    async fn to_lecturer_response(&self, lecturer: Lecturer) -> Result<LecturerResponse, ApiError> {
        let subjects: Vec<_> = self
            .repo
            .subjects_for_lecturer(lecturer.id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(LecturerResponse {
            id: lecturer.id,
            name: lecturer.name,
            username: lecturer.username,
            lecturer_id: lecturer.lecturer_id,
            department: lecturer.department,
            email: lecturer.email,
            mobile_no: lecturer.mobile_no,
            subject_count: subjects.len(),
            subjects,
        })
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
}
