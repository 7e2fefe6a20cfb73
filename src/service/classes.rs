//! Class level upgrade and class membership.

use super::rows::bound;
use super::students::row_exists;
use crate::error::AppError;
use crate::model::Student;
use crate::sql::{link_delete, link_insert, STUDENT_CLASSES};
use serde_json::Value;
use sqlx::PgPool;

pub struct ClassService;

impl ClassService {
    /// Raise the class level by one. Returns the full post-increment row, or None if the class is absent
    /// (nothing is written in that case).
    pub async fn upgrade(pool: &PgPool, id: i32) -> Result<Option<Value>, AppError> {
        let mut tx = pool.begin().await?;
        let lock_sql = "SELECT 1 FROM classes WHERE id = $1 FOR UPDATE";
        tracing::debug!(sql = %lock_sql, id, "query (tx)");
        let found: Option<(i32,)> = sqlx::query_as(lock_sql).bind(id).fetch_optional(&mut *tx).await?;
        if found.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }
        let update_sql = "UPDATE classes SET level = level + 1 WHERE id = $1";
        tracing::debug!(sql = %update_sql, id, "query (tx)");
        sqlx::query(update_sql).bind(id).execute(&mut *tx).await?;
        // to_jsonb keeps every column, whatever its type.
        let select_sql = "SELECT to_jsonb(c) FROM classes c WHERE c.id = $1";
        tracing::debug!(sql = %select_sql, id, "query (tx)");
        let row: Value = sqlx::query_scalar(select_sql).bind(id).fetch_one(&mut *tx).await?;
        tx.commit().await?;
        tracing::info!(class_id = id, "class upgraded");
        Ok(Some(row))
    }

    /// Link a student to a class unless already linked. Both must exist. Returns whether a row was inserted.
    pub async fn assign_student(pool: &PgPool, class_id: i32, student_id: i32) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        if !row_exists(&mut tx, "classes", class_id).await? {
            return Err(AppError::NotFound("Class not found.".into()));
        }
        if !row_exists(&mut tx, "students", student_id).await? {
            return Err(AppError::NotFound("Student not found.".into()));
        }
        let result = bound(&link_insert(STUDENT_CLASSES, student_id, class_id))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        let inserted = result.rows_affected() > 0;
        tracing::info!(class_id, student_id, inserted, "student assigned to class");
        Ok(inserted)
    }

    pub async fn remove_student(pool: &PgPool, class_id: i32, student_id: i32) -> Result<bool, AppError> {
        let result = bound(&link_delete(STUDENT_CLASSES, student_id, class_id))
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Students linked to a class. None when the class itself does not exist; an empty class yields `Some(vec![])`.
    pub async fn students(pool: &PgPool, class_id: i32) -> Result<Option<Vec<Student>>, AppError> {
        let exists_sql = "SELECT EXISTS (SELECT 1 FROM classes WHERE id = $1)";
        tracing::debug!(sql = %exists_sql, class_id, "query");
        let exists: bool = sqlx::query_scalar(exists_sql).bind(class_id).fetch_one(pool).await?;
        if !exists {
            return Ok(None);
        }
        let sql = r#"
            SELECT s.id, s.name, s.grade
            FROM students s
            JOIN student_classes sc ON s.id = sc.student_id
            WHERE sc.class_id = $1
            ORDER BY s.id
        "#;
        tracing::debug!(sql = %sql, class_id, "query");
        let rows = sqlx::query_as::<_, Student>(sql).bind(class_id).fetch_all(pool).await?;
        Ok(Some(rows))
    }
}
