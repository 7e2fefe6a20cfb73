//! Row and payload types for students, subjects and the report.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub grade: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subject {
    pub id: i32,
    pub name: String,
}

/// Sparse update of a student. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub grade: Option<String>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.grade.is_none()
    }
}

/// One line of the student report: subjects nested as a list.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReportEntry {
    pub name: String,
    pub grade: String,
    pub subjects: sqlx::types::Json<Vec<Subject>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Message { message: message.into() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassUpgraded {
    pub message: String,
    pub class_data: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct SubjectUpdated {
    pub message: String,
    pub subject: Subject,
}
