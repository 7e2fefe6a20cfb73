//! Subject handlers: create, read, list, rename.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::model::SubjectUpdated;
use crate::response::{created, ok};
use crate::service::{parse_id, RequestValidator, SubjectService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn create_subject(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let subject = RequestValidator::new_subject(&body)?;
    let row = SubjectService::create(&state.pool, &subject).await?;
    Ok(created(row))
}

pub async fn list_subjects(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(SubjectService::list(&state.pool).await?))
}

pub async fn get_subject(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = SubjectService::read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Subject not found.".into()))?;
    Ok(ok(row))
}

pub async fn update_subject(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let name = RequestValidator::subject_name(&body)?;
    let subject = SubjectService::rename(&state.pool, id, &name)
        .await?
        .ok_or_else(|| AppError::NotFound("Subject not found.".into()))?;
    Ok(ok(SubjectUpdated {
        message: "Subject updated successfully.".into(),
        subject,
    }))
}
