//! Request validation: presence and type checks on JSON bodies.

use crate::error::AppError;
use crate::model::{Student, StudentPatch, Subject};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// POST /students: id, name and grade are all required.
    pub fn new_student(body: &Map<String, Value>) -> Result<Student, AppError> {
        let missing = missing_fields(body, &["id", "name", "grade"]);
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        Ok(Student {
            id: integer_field(body, "id")?,
            name: text_field(body, "name")?,
            grade: text_field(body, "grade")?,
        })
    }

    /// POST /subjects: id and name are required.
    pub fn new_subject(body: &Map<String, Value>) -> Result<Subject, AppError> {
        let missing = missing_fields(body, &["id", "name"]);
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        Ok(Subject {
            id: integer_field(body, "id")?,
            name: text_field(body, "name")?,
        })
    }

    /// PUT /students/:id: only name and grade are read; at least one must be present.
    /// Other keys are ignored.
    pub fn student_patch(body: &Map<String, Value>) -> Result<StudentPatch, AppError> {
        let mut patch = StudentPatch::default();
        if body.get("name").is_some_and(|v| !v.is_null()) {
            patch.name = Some(text_field(body, "name")?);
        }
        if body.get("grade").is_some_and(|v| !v.is_null()) {
            patch.grade = Some(text_field(body, "grade")?);
        }
        if patch.is_empty() {
            return Err(AppError::Validation("No valid fields provided for update.".into()));
        }
        Ok(patch)
    }

    /// PUT /subjects/:id: name is required.
    pub fn subject_name(body: &Map<String, Value>) -> Result<String, AppError> {
        if !is_present(body.get("name")) {
            return Err(AppError::Validation("Name field is required for update.".into()));
        }
        text_field(body, "name")
    }

    /// A required id reference in a body, e.g. `subjectId`.
    pub fn reference(body: &Map<String, Value>, field: &str) -> Result<i32, AppError> {
        if !is_present(body.get(field)) {
            return Err(AppError::Validation(format!("{} is required.", field)));
        }
        integer_field(body, field)
    }
}

/// Parse a path id segment.
pub fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// Missing, null and blank strings all count as absent. Unlike a plain falsy check,
/// `0` and `false` are present, while a whitespace-only string is not.
fn is_present(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

fn missing_fields<'a>(body: &Map<String, Value>, fields: &[&'a str]) -> Vec<&'a str> {
    fields.iter().copied().filter(|f| !is_present(body.get(*f))).collect()
}

fn integer_field(body: &Map<String, Value>, field: &str) -> Result<i32, AppError> {
    let invalid = || AppError::Validation(format!("{} must be an integer", field));
    match body.get(field) {
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()).ok_or_else(invalid),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn text_field(body: &Map<String, Value>, field: &str) -> Result<String, AppError> {
    match body.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(AppError::Validation(format!("{} must be a string", field))),
    }
}
