mod common;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use campus_portal::{
    auth::AuthUser,
    handlers,
    models::{
        AssignSubjectsToLecturerRequest, AssignSubjectsToStudentRequest, Role,
        StudentSignupRequest, SubjectRequest,
    },
};
use common::{MockRepository, link_lecturer, seed_lecturer, seed_student, seed_subject};
use std::sync::Arc;
use tokio::test;

// --- Test Utilities ---

fn admin_user() -> AuthUser {
    AuthUser {
        id: 1,
        role: Role::Admin,
        username: "admin@campus.test".to_string(),
    }
}

fn lecturer_user(id: i64) -> AuthUser {
    AuthUser {
        id,
        role: Role::Lecturer,
        username: "lecturer".to_string(),
    }
}

fn student_user(id: i64) -> AuthUser {
    AuthUser {
        id,
        role: Role::Student,
        username: "student".to_string(),
    }
}

async fn body_string(response: axum::response::Response) -> (StatusCode, String) {
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    (parts.status, String::from_utf8(bytes.to_vec()).unwrap())
}

// --- Role checks ---

#[test]
async fn admin_endpoints_reject_non_admin_roles() {
    let repo = Arc::new(MockRepository::default());
    let state = common::create_test_state(repo);

    let err = handlers::get_all_students(student_user(1), State(state.clone()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    let err = handlers::assign_subjects_to_lecturer(
        lecturer_user(1),
        State(state),
        Json(AssignSubjectsToLecturerRequest {
            lecturer_id: 1,
            subject_ids: vec![],
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}

#[test]
async fn lecturer_views_reject_students() {
    let repo = Arc::new(MockRepository::default());
    let state = common::create_test_state(repo);

    let err = handlers::lecturer_my_subjects(student_user(1), State(state))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}

// --- Assignment surface (200 on success, 400 on any engine failure) ---

#[test]
async fn assign_lecturer_returns_200_with_message() {
    let repo = Arc::new(MockRepository::default());
    let lecturer = seed_lecturer(&repo, "Dr. Byrne", "abyrne");
    let s1 = seed_subject(&repo, "Algorithms", "CS2010");
    let s2 = seed_subject(&repo, "Databases", "CS2020");
    let state = common::create_test_state(repo);

    let response = handlers::assign_subjects_to_lecturer(
        admin_user(),
        State(state),
        Json(AssignSubjectsToLecturerRequest {
            lecturer_id: lecturer.id,
            subject_ids: vec![s1.id, s2.id],
        }),
    )
    .await
    .unwrap();

    let (status, body) = body_string(response).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Successfully assigned 2 subject(s) to lecturer"));
}

#[test]
async fn assign_student_failure_collapses_to_400() {
    let repo = Arc::new(MockRepository::default());
    let student = seed_student(&repo, "Aoife Kelly", "akelly");
    let state = common::create_test_state(repo);

    // Unknown subject id: a NotFound from the engine surfaces as 400 here.
    let response = handlers::assign_subjects_to_student(
        admin_user(),
        State(state),
        Json(AssignSubjectsToStudentRequest {
            student_id: student.id,
            subject_ids: vec![12345],
        }),
    )
    .await
    .unwrap();

    let (status, body) = body_string(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("error"));
    assert!(body.contains("12345"));
}

#[test]
async fn capacity_violation_collapses_to_400() {
    let repo = Arc::new(MockRepository::default());
    let lecturer = seed_lecturer(&repo, "Dr. Byrne", "abyrne");
    let ids: Vec<i64> = (0..4)
        .map(|i| seed_subject(&repo, &format!("Subject {i}"), &format!("CS{i}")).id)
        .collect();
    let state = common::create_test_state(repo);

    let response = handlers::assign_subjects_to_lecturer(
        admin_user(),
        State(state),
        Json(AssignSubjectsToLecturerRequest {
            lecturer_id: lecturer.id,
            subject_ids: ids,
        }),
    )
    .await
    .unwrap();

    let (status, body) = body_string(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("maximum of 3"));
}

#[test]
async fn remove_subject_from_lecturer_is_idempotent_at_the_surface() {
    let repo = Arc::new(MockRepository::default());
    let lecturer = seed_lecturer(&repo, "Dr. Byrne", "abyrne");
    let subject = seed_subject(&repo, "Algorithms", "CS2010");
    link_lecturer(&repo, lecturer.id, subject.id);
    let state = common::create_test_state(repo);

    for _ in 0..2 {
        let response = handlers::remove_subject_from_lecturer(
            admin_user(),
            State(state.clone()),
            Path((lecturer.id, subject.id)),
        )
        .await
        .unwrap();
        let (status, body) = body_string(response).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Subject removed from lecturer successfully"));
    }
}

// --- Subject CRUD ---

#[test]
async fn create_subject_rejects_duplicate_codes() {
    let repo = Arc::new(MockRepository::default());
    seed_subject(&repo, "Algorithms", "CS2010");
    let state = common::create_test_state(repo);

    let err = handlers::create_subject(
        admin_user(),
        State(state),
        Json(SubjectRequest {
            subject_name: "Advanced Algorithms".to_string(),
            subject_code: "CS2010".to_string(),
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert!(err.to_string().contains("CS2010"));
}

#[test]
async fn create_subject_returns_created_with_zero_counts() {
    let repo = Arc::new(MockRepository::default());
    let state = common::create_test_state(repo);

    let (status, Json(subject)) = handlers::create_subject(
        admin_user(),
        State(state),
        Json(SubjectRequest {
            subject_name: "Algorithms".to_string(),
            subject_code: "CS2010".to_string(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(subject.subject_code, "CS2010");
    assert_eq!(subject.lecturer_count, 0);
    assert_eq!(subject.student_count, 0);
}

#[test]
async fn get_subject_by_id_not_found() {
    let repo = Arc::new(MockRepository::default());
    let state = common::create_test_state(repo);

    let err = handlers::get_subject_by_id(admin_user(), State(state), Path(404))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert!(err.to_string().contains("Subject not found with id: 404"));
}

#[test]
async fn delete_subject_is_refused_while_assigned() {
    let repo = Arc::new(MockRepository::default());
    let lecturer = seed_lecturer(&repo, "Dr. Byrne", "abyrne");
    let subject = seed_subject(&repo, "Algorithms", "CS2010");
    link_lecturer(&repo, lecturer.id, subject.id);
    let state = common::create_test_state(repo);

    let err = handlers::delete_subject(admin_user(), State(state), Path(subject.id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert!(
        err.to_string()
            .contains("Cannot delete subject that is assigned")
    );
}

// --- Student management ---

#[test]
async fn create_student_succeeds_and_reports_identifiers() {
    let repo = Arc::new(MockRepository::default());
    let state = common::create_test_state(repo);

    let (status, Json(body)) = handlers::create_student(
        admin_user(),
        State(state),
        Json(StudentSignupRequest {
            name: "Aoife Kelly".to_string(),
            username: "akelly".to_string(),
            password: "s3cret-pass".to_string(),
            student_id: "STU-100".to_string(),
            faculty: "Engineering".to_string(),
            mobile_no: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Student created successfully");
    assert_eq!(body["student_id"], "STU-100");
    assert_eq!(body["username"], "akelly");
}

#[test]
async fn student_register_rejects_taken_username() {
    let repo = Arc::new(MockRepository::default());
    seed_student(&repo, "Aoife Kelly", "akelly");
    let state = common::create_test_state(repo);

    let err = handlers::student_register(
        State(state),
        Json(StudentSignupRequest {
            name: "Another Aoife".to_string(),
            username: "akelly".to_string(),
            password: "s3cret-pass".to_string(),
            student_id: "STU-200".to_string(),
            faculty: "Engineering".to_string(),
            mobile_no: None,
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert!(err.to_string().contains("Username already exists"));
}

#[test]
async fn student_register_rejects_short_passwords() {
    let repo = Arc::new(MockRepository::default());
    let state = common::create_test_state(repo);

    let err = handlers::student_register(
        State(state),
        Json(StudentSignupRequest {
            name: "Aoife Kelly".to_string(),
            username: "akelly".to_string(),
            password: "abc".to_string(),
            student_id: "STU-100".to_string(),
            faculty: "Engineering".to_string(),
            mobile_no: None,
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

// --- Role-scoped views through handlers ---

#[test]
async fn lecturer_my_students_uses_the_authenticated_identity() {
    let repo = Arc::new(MockRepository::default());
    let lecturer = seed_lecturer(&repo, "Dr. Byrne", "abyrne");
    let subject = seed_subject(&repo, "Algorithms", "CS2010");
    link_lecturer(&repo, lecturer.id, subject.id);
    let student = seed_student(&repo, "Aoife Kelly", "akelly");
    common::link_student(&repo, student.id, subject.id);
    let state = common::create_test_state(repo);

    let Json(view) = handlers::lecturer_my_students(lecturer_user(lecturer.id), State(state))
        .await
        .unwrap();
    assert_eq!(view.lecturer_name, "Dr. Byrne");
    assert_eq!(view.student_count, 1);
    assert_eq!(view.students[0].name, "Aoife Kelly");
}
