//! Subject persistence. Reads decode straight into [`Subject`].

use super::rows::bound_as;
use crate::error::AppError;
use crate::model::Subject;
use crate::sql::update_subject;
use sqlx::PgPool;

pub struct SubjectService;

impl SubjectService {
    pub async fn create(pool: &PgPool, subject: &Subject) -> Result<Subject, AppError> {
        let sql = "INSERT INTO subjects (id, name) VALUES ($1, $2) RETURNING id, name";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Subject>(sql)
            .bind(subject.id)
            .bind(&subject.name)
            .fetch_one(pool)
            .await?;
        tracing::info!(subject_id = row.id, "subject created");
        Ok(row)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Subject>, AppError> {
        let sql = "SELECT id, name FROM subjects ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Subject>(sql).fetch_all(pool).await?)
    }

    pub async fn read(pool: &PgPool, id: i32) -> Result<Option<Subject>, AppError> {
        let sql = "SELECT id, name FROM subjects WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Subject>(sql).bind(id).fetch_optional(pool).await?)
    }

    pub async fn rename(pool: &PgPool, id: i32, name: &str) -> Result<Option<Subject>, AppError> {
        let q = update_subject(id, name);
        let row = bound_as::<Subject>(&q).fetch_optional(pool).await?;
        if row.is_some() {
            tracing::info!(subject_id = id, "subject updated");
        }
        Ok(row)
    }
}
