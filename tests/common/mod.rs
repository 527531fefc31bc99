#![allow(dead_code)]

use async_trait::async_trait;
use campus_portal::{
    AppState,
    config::AppConfig,
    models::{
        Admin, Lecturer, LecturerUpdateRequest, NewAdmin, NewLecturer, NewStudent, Student,
        StudentUpdateRequest, Subject, SubjectRequest, SubjectResponse,
    },
    repository::Repository,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex},
};

// --- In-Memory Mock Repository ---

// Handlers, the assignment engine and the query façade only see the
// Repository trait, so tests drive them against this in-memory store. Join
// records are plain (owner_id, subject_id) pairs, which makes the symmetry
// property hold or fail for the same reason it would against Postgres.
#[derive(Default)]
pub struct MockRepository {
    pub data: Mutex<MockData>,
}

#[derive(Default)]
pub struct MockData {
    pub lecturers: BTreeMap<i64, Lecturer>,
    pub students: BTreeMap<i64, Student>,
    pub admins: BTreeMap<i64, Admin>,
    pub subjects: BTreeMap<i64, Subject>,
    pub lecturer_links: BTreeSet<(i64, i64)>,
    pub student_links: BTreeSet<(i64, i64)>,
    pub next_id: i64,
}

impl MockData {
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn subjects_sorted(&self, ids: impl Iterator<Item = i64>) -> Vec<Subject> {
        let mut subjects: Vec<Subject> = ids.filter_map(|id| self.subjects.get(&id).cloned()).collect();
        subjects.sort_by(|a, b| a.subject_name.cmp(&b.subject_name));
        subjects
    }

    fn counts_for_subject(&self, id: i64) -> (i64, i64) {
        let lecturers = self.lecturer_links.iter().filter(|(_, s)| *s == id).count() as i64;
        let students = self.student_links.iter().filter(|(_, s)| *s == id).count() as i64;
        (lecturers, students)
    }

    fn subject_response(&self, subject: &Subject) -> SubjectResponse {
        let (lecturer_count, student_count) = self.counts_for_subject(subject.id);
        SubjectResponse {
            id: subject.id,
            subject_name: subject.subject_name.clone(),
            subject_code: subject.subject_code.clone(),
            lecturer_count,
            student_count,
        }
    }
}

#[async_trait]
impl Repository for MockRepository {
    // --- Lecturers ---

    async fn create_lecturer(&self, new: NewLecturer) -> Result<Lecturer, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        let id = data.alloc_id();
        let lecturer = Lecturer {
            id,
            name: new.name,
            address: None,
            mobile_no: new.mobile_no,
            username: new.username,
            password_hash: new.password_hash,
            lecturer_id: new.lecturer_id,
            department: new.department,
            email: new.email,
        };
        data.lecturers.insert(id, lecturer.clone());
        Ok(lecturer)
    }

    async fn find_lecturer(&self, id: i64) -> Result<Option<Lecturer>, sqlx::Error> {
        Ok(self.data.lock().unwrap().lecturers.get(&id).cloned())
    }

    async fn find_lecturer_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Lecturer>, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .lecturers
            .values()
            .find(|l| l.username == username)
            .cloned())
    }

    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        let mut lecturers: Vec<Lecturer> = data.lecturers.values().cloned().collect();
        lecturers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(lecturers)
    }

    async fn lecturer_usernames(&self) -> Result<Vec<String>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        let mut usernames: Vec<String> =
            data.lecturers.values().map(|l| l.username.clone()).collect();
        usernames.sort();
        Ok(usernames)
    }

    async fn update_lecturer(
        &self,
        id: i64,
        req: &LecturerUpdateRequest,
    ) -> Result<Option<Lecturer>, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        Ok(data.lecturers.get_mut(&id).map(|l| {
            l.name = req.name.clone();
            l.department = req.department.clone();
            l.email = req.email.clone();
            l.mobile_no = req.mobile_no.clone();
            l.clone()
        }))
    }

    async fn delete_lecturer(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        data.lecturer_links.retain(|(l, _)| *l != id);
        Ok(data.lecturers.remove(&id).is_some())
    }

    async fn lecturer_staff_id_taken(&self, lecturer_id: &str) -> Result<bool, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .lecturers
            .values()
            .any(|l| l.lecturer_id == lecturer_id))
    }

    // --- Students ---

    async fn create_student(&self, new: NewStudent) -> Result<Student, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        let id = data.alloc_id();
        let student = Student {
            id,
            name: new.name,
            address: None,
            mobile_no: new.mobile_no,
            username: new.username,
            password_hash: new.password_hash,
            student_id: new.student_id,
            faculty: new.faculty,
            enrollment_date: new.enrollment_date,
        };
        data.students.insert(id, student.clone());
        Ok(student)
    }

    async fn find_student(&self, id: i64) -> Result<Option<Student>, sqlx::Error> {
        Ok(self.data.lock().unwrap().students.get(&id).cloned())
    }

    async fn find_student_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Student>, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .students
            .values()
            .find(|s| s.username == username)
            .cloned())
    }

    async fn list_students(&self) -> Result<Vec<Student>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        let mut students: Vec<Student> = data.students.values().cloned().collect();
        students.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(students)
    }

    async fn update_student(
        &self,
        id: i64,
        req: &StudentUpdateRequest,
    ) -> Result<Option<Student>, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        Ok(data.students.get_mut(&id).map(|s| {
            s.name = req.name.clone();
            s.username = req.username.clone();
            s.student_id = req.student_id.clone();
            s.faculty = req.faculty.clone();
            s.mobile_no = req.mobile_no.clone();
            s.clone()
        }))
    }

    async fn delete_student(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        data.student_links.retain(|(s, _)| *s != id);
        Ok(data.students.remove(&id).is_some())
    }

    async fn student_matric_taken(&self, student_id: &str) -> Result<bool, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .students
            .values()
            .any(|s| s.student_id == student_id))
    }

    // --- Admins ---

    async fn find_admin(&self, id: i64) -> Result<Option<Admin>, sqlx::Error> {
        Ok(self.data.lock().unwrap().admins.get(&id).cloned())
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .admins
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_admin(&self, new: NewAdmin) -> Result<Admin, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        let id = data.alloc_id();
        let admin = Admin {
            id,
            name: new.name,
            username: new.email.clone(),
            email: new.email,
            oauth_provider: new.oauth_provider,
            oauth_id: new.oauth_id,
        };
        data.admins.insert(id, admin.clone());
        Ok(admin)
    }

    // --- Cross-hierarchy checks ---

    async fn username_taken(&self, username: &str) -> Result<bool, sqlx::Error> {
        let data = self.data.lock().unwrap();
        Ok(data.lecturers.values().any(|l| l.username == username)
            || data.students.values().any(|s| s.username == username)
            || data.admins.values().any(|a| a.username == username))
    }

    // --- Subjects ---

    async fn create_subject(&self, req: &SubjectRequest) -> Result<Subject, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        let id = data.alloc_id();
        let now = chrono::Utc::now().naive_utc();
        let subject = Subject {
            id,
            subject_name: req.subject_name.clone(),
            subject_code: req.subject_code.clone(),
            created_at: now,
            updated_at: now,
        };
        data.subjects.insert(id, subject.clone());
        Ok(subject)
    }

    async fn find_subject(&self, id: i64) -> Result<Option<Subject>, sqlx::Error> {
        Ok(self.data.lock().unwrap().subjects.get(&id).cloned())
    }

    async fn find_subject_by_code(&self, code: &str) -> Result<Option<Subject>, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .subjects
            .values()
            .find(|s| s.subject_code == code)
            .cloned())
    }

    async fn subject_code_taken(&self, code: &str) -> Result<bool, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .subjects
            .values()
            .any(|s| s.subject_code == code))
    }

    async fn list_subjects_with_counts(&self) -> Result<Vec<SubjectResponse>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        let mut subjects: Vec<SubjectResponse> = data
            .subjects
            .values()
            .map(|s| data.subject_response(s))
            .collect();
        subjects.sort_by(|a, b| a.subject_name.cmp(&b.subject_name));
        Ok(subjects)
    }

    async fn search_subjects(&self, name: &str) -> Result<Vec<SubjectResponse>, sqlx::Error> {
        let needle = name.to_lowercase();
        let data = self.data.lock().unwrap();
        let mut subjects: Vec<SubjectResponse> = data
            .subjects
            .values()
            .filter(|s| s.subject_name.to_lowercase().contains(&needle))
            .map(|s| data.subject_response(s))
            .collect();
        subjects.sort_by(|a, b| a.subject_name.cmp(&b.subject_name));
        Ok(subjects)
    }

    async fn subject_with_counts(&self, id: i64) -> Result<Option<SubjectResponse>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        Ok(data.subjects.get(&id).map(|s| data.subject_response(s)))
    }

    async fn update_subject(
        &self,
        id: i64,
        req: &SubjectRequest,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        Ok(data.subjects.get_mut(&id).map(|s| {
            s.subject_name = req.subject_name.clone();
            s.subject_code = req.subject_code.clone();
            s.updated_at = chrono::Utc::now().naive_utc();
            s.clone()
        }))
    }

    async fn delete_subject(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.data.lock().unwrap().subjects.remove(&id).is_some())
    }

    async fn subject_link_counts(&self, id: i64) -> Result<(i64, i64), sqlx::Error> {
        Ok(self.data.lock().unwrap().counts_for_subject(id))
    }

    // --- Assignment join records ---

    async fn subjects_for_lecturer(&self, lecturer_id: i64) -> Result<Vec<Subject>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        let ids: Vec<i64> = data
            .lecturer_links
            .iter()
            .filter(|(l, _)| *l == lecturer_id)
            .map(|(_, s)| *s)
            .collect();
        Ok(data.subjects_sorted(ids.into_iter()))
    }

    async fn subjects_for_student(&self, student_id: i64) -> Result<Vec<Subject>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        let ids: Vec<i64> = data
            .student_links
            .iter()
            .filter(|(s, _)| *s == student_id)
            .map(|(_, subject)| *subject)
            .collect();
        Ok(data.subjects_sorted(ids.into_iter()))
    }

    async fn lecturers_for_subject(&self, subject_id: i64) -> Result<Vec<Lecturer>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        let mut lecturers: Vec<Lecturer> = data
            .lecturer_links
            .iter()
            .filter(|(_, s)| *s == subject_id)
            .filter_map(|(l, _)| data.lecturers.get(l).cloned())
            .collect();
        lecturers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(lecturers)
    }

    async fn replace_lecturer_subjects(
        &self,
        lecturer_id: i64,
        subject_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        data.lecturer_links.retain(|(l, _)| *l != lecturer_id);
        for subject_id in subject_ids {
            data.lecturer_links.insert((lecturer_id, *subject_id));
        }
        Ok(())
    }

    async fn replace_student_subjects(
        &self,
        student_id: i64,
        subject_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        data.student_links.retain(|(s, _)| *s != student_id);
        for subject_id in subject_ids {
            data.student_links.insert((student_id, *subject_id));
        }
        Ok(())
    }

    async fn link_lecturer_subject(
        &self,
        lecturer_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .lecturer_links
            .insert((lecturer_id, subject_id)))
    }

    async fn unlink_lecturer_subject(
        &self,
        lecturer_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .lecturer_links
            .remove(&(lecturer_id, subject_id)))
    }

    async fn link_student_subject(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .student_links
            .insert((student_id, subject_id)))
    }

    async fn unlink_student_subject(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<bool, sqlx::Error> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .student_links
            .remove(&(student_id, subject_id)))
    }

    async fn students_for_subjects(
        &self,
        subject_ids: &[i64],
    ) -> Result<Vec<Student>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        let ids: BTreeSet<i64> = data
            .student_links
            .iter()
            .filter(|(_, subject)| subject_ids.contains(subject))
            .map(|(student, _)| *student)
            .collect();
        Ok(ids
            .into_iter()
            .filter_map(|id| data.students.get(&id).cloned())
            .collect())
    }
}

// --- Test Utilities ---

// Creates an AppState wired onto a shared mock repository.
pub fn create_test_state(repo: Arc<MockRepository>) -> AppState {
    AppState::new(repo, AppConfig::default())
}

// Seeds a lecturer directly into the store, bypassing the HTTP layer.
pub fn seed_lecturer(repo: &MockRepository, name: &str, username: &str) -> Lecturer {
    let mut data = repo.data.lock().unwrap();
    let id = data.alloc_id();
    let lecturer = Lecturer {
        id,
        name: name.to_string(),
        address: None,
        mobile_no: None,
        username: username.to_string(),
        password_hash: String::new(),
        lecturer_id: format!("LEC-{id}"),
        department: "Computer Science".to_string(),
        email: format!("{username}@campus.test"),
    };
    data.lecturers.insert(id, lecturer.clone());
    lecturer
}

pub fn seed_student(repo: &MockRepository, name: &str, username: &str) -> Student {
    let mut data = repo.data.lock().unwrap();
    let id = data.alloc_id();
    let student = Student {
        id,
        name: name.to_string(),
        address: None,
        mobile_no: None,
        username: username.to_string(),
        password_hash: String::new(),
        student_id: format!("STU-{id}"),
        faculty: "Engineering".to_string(),
        enrollment_date: chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
    };
    data.students.insert(id, student.clone());
    student
}

pub fn seed_subject(repo: &MockRepository, name: &str, code: &str) -> Subject {
    let mut data = repo.data.lock().unwrap();
    let id = data.alloc_id();
    let now = chrono::Utc::now().naive_utc();
    let subject = Subject {
        id,
        subject_name: name.to_string(),
        subject_code: code.to_string(),
        created_at: now,
        updated_at: now,
    };
    data.subjects.insert(id, subject.clone());
    subject
}

// Direct join-record insertion for arranging test fixtures.
pub fn link_lecturer(repo: &MockRepository, lecturer_id: i64, subject_id: i64) {
    repo.data
        .lock()
        .unwrap()
        .lecturer_links
        .insert((lecturer_id, subject_id));
}

pub fn link_student(repo: &MockRepository, student_id: i64, subject_id: i64) {
    repo.data
        .lock()
        .unwrap()
        .student_links
        .insert((student_id, subject_id));
}
