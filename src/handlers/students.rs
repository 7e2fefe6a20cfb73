//! Student handlers: CRUD, report, and subject assignment.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::model::Message;
use crate::response::{confirmation, created, ok};
use crate::service::{parse_id, RequestValidator, StudentService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn create_student(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let student = RequestValidator::new_student(&body)?;
    let row = StudentService::create(&state.pool, &student).await?;
    Ok(created(row))
}

pub async fn list_students(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(StudentService::list(&state.pool).await?))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = StudentService::read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found.".into()))?;
    Ok(ok(row))
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let patch = RequestValidator::student_patch(&body)?;
    let row = StudentService::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found.".into()))?;
    Ok(ok(row))
}

pub async fn delete_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !StudentService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("Student not found.".into()));
    }
    Ok(confirmation(format!("Student with ID {} has been removed.", id)))
}

pub async fn student_report(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(StudentService::report(&state.pool).await?))
}

pub async fn assign_subject(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let student_id = parse_id(&id_str)?;
    let subject_id = RequestValidator::reference(&body, "subjectId")?;
    StudentService::assign_subject(&state.pool, student_id, subject_id).await?;
    Ok(ok(Message::new("Subject assigned successfully.")))
}

pub async fn remove_subject(
    State(state): State<AppState>,
    Path((id_str, subject_id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = parse_id(&id_str)?;
    let subject_id = parse_id(&subject_id_str)?;
    if !StudentService::remove_subject(&state.pool, student_id, subject_id).await? {
        return Err(AppError::NotFound("Student or subject association not found.".into()));
    }
    Ok(confirmation("Subject removed"))
}
