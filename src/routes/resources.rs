//! Student, subject and class routes.

use crate::handlers::{
    assign_student, assign_subject, class_students, create_student, create_subject, delete_student, get_student,
    get_subject, list_students, list_subjects, remove_student, remove_subject, student_report, update_student,
    update_subject, upgrade_class,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route("/students/report", get(student_report))
        .route(
            "/students/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/students/:id/subjects", post(assign_subject))
        .route("/students/:id/subjects/:subject_id", delete(remove_subject))
        .route("/subjects", get(list_subjects).post(create_subject))
        .route("/subjects/:id", get(get_subject).put(update_subject))
        .route("/classes/:id/upgrade", patch(upgrade_class))
        .route("/classes/:id/students", get(class_students).post(assign_student))
        .route("/classes/:id/students/:student_id", delete(remove_student))
        .with_state(state)
}
