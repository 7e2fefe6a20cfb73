//! Class handlers: level upgrade and membership.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::model::{ClassUpgraded, Message};
use crate::response::{confirmation, ok};
use crate::service::{parse_id, ClassService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn upgrade_class(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let class_data = ClassService::upgrade(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found.".into()))?;
    Ok(ok(ClassUpgraded {
        message: format!("Class {} upgraded successfully.", id),
        class_data,
    }))
}

pub async fn assign_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let class_id = parse_id(&id_str)?;
    let student_id = RequestValidator::reference(&body, "studentId")?;
    ClassService::assign_student(&state.pool, class_id, student_id).await?;
    Ok(ok(Message::new("Student assigned to class successfully.")))
}

pub async fn remove_student(
    State(state): State<AppState>,
    Path((id_str, student_id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let class_id = parse_id(&id_str)?;
    let student_id = parse_id(&student_id_str)?;
    if !ClassService::remove_student(&state.pool, class_id, student_id).await? {
        return Err(AppError::NotFound("Class or student association not found.".into()));
    }
    Ok(confirmation(format!(
        "Student {} removed from class {}.",
        student_id, class_id
    )))
}

pub async fn class_students(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let class_id = parse_id(&id_str)?;
    let rows = ClassService::students(&state.pool, class_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found.".into()))?;
    Ok(ok(rows))
}
