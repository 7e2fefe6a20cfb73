//! Student reads and writes, subject assignment, and the report.

use super::rows::{bound, bound_as};
use crate::error::AppError;
use crate::model::{ReportEntry, Student, StudentPatch};
use crate::sql::{link_delete, link_delete_owner, link_insert, update_student, STUDENT_CLASSES, STUDENT_SUBJECTS};
use sqlx::{PgConnection, PgPool};

pub struct StudentService;

impl StudentService {
    pub async fn create(pool: &PgPool, student: &Student) -> Result<Student, AppError> {
        let sql = "INSERT INTO students (id, name, grade) VALUES ($1, $2, $3) RETURNING id, name, grade";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Student>(sql)
            .bind(student.id)
            .bind(&student.name)
            .bind(&student.grade)
            .fetch_one(pool)
            .await?;
        tracing::info!(student_id = row.id, "student created");
        Ok(row)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Student>, AppError> {
        let sql = "SELECT id, name, grade FROM students ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Student>(sql).fetch_all(pool).await?)
    }

    pub async fn read(pool: &PgPool, id: i32) -> Result<Option<Student>, AppError> {
        let sql = "SELECT id, name, grade FROM students WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Student>(sql).bind(id).fetch_optional(pool).await?)
    }

    /// Apply a non-empty patch. Returns the refreshed row, or None when no student has this id.
    pub async fn update(pool: &PgPool, id: i32, patch: &StudentPatch) -> Result<Option<Student>, AppError> {
        let q = update_student(id, patch)
            .ok_or_else(|| AppError::Validation("No valid fields provided for update.".into()))?;
        let row = bound_as::<Student>(&q).fetch_optional(pool).await?;
        if row.is_some() {
            tracing::info!(student_id = id, "student updated");
        }
        Ok(row)
    }

    /// Remove the student's subject and class links, then the student, in one transaction.
    /// Returns false when no student row was deleted.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        bound(&link_delete_owner(STUDENT_SUBJECTS, id)).execute(&mut *tx).await?;
        bound(&link_delete_owner(STUDENT_CLASSES, id)).execute(&mut *tx).await?;
        let sql = "DELETE FROM students WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query (tx)");
        let result = sqlx::query(sql).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(student_id = id, "student deleted");
        }
        Ok(deleted)
    }

    /// One entry per student with its subjects nested, in a single query.
    pub async fn report(pool: &PgPool) -> Result<Vec<ReportEntry>, AppError> {
        let sql = r#"
            SELECT s.name, s.grade,
                (SELECT COALESCE(jsonb_agg(jsonb_build_object('id', sub.id, 'name', sub.name) ORDER BY sub.id), '[]'::jsonb)
                 FROM subjects sub
                 JOIN student_subjects ss ON sub.id = ss.subject_id
                 WHERE ss.student_id = s.id) AS subjects
            FROM students s
            ORDER BY s.id
        "#;
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, ReportEntry>(sql).fetch_all(pool).await?)
    }

    /// Link a subject to a student unless already linked.
    /// Student missing is NotFound; subject missing is BadRequest. Returns whether a row was inserted.
    pub async fn assign_subject(pool: &PgPool, student_id: i32, subject_id: i32) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        if !row_exists(&mut tx, "students", student_id).await? {
            return Err(AppError::NotFound("Student not found.".into()));
        }
        if !row_exists(&mut tx, "subjects", subject_id).await? {
            return Err(AppError::BadRequest("Invalid subject ID.".into()));
        }
        let result = bound(&link_insert(STUDENT_SUBJECTS, student_id, subject_id))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        let inserted = result.rows_affected() > 0;
        tracing::info!(student_id, subject_id, inserted, "subject assigned");
        Ok(inserted)
    }

    pub async fn remove_subject(pool: &PgPool, student_id: i32, subject_id: i32) -> Result<bool, AppError> {
        let result = bound(&link_delete(STUDENT_SUBJECTS, student_id, subject_id))
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Existence check; the row stays share-locked until the transaction ends.
pub(crate) async fn row_exists(conn: &mut PgConnection, table: &'static str, id: i32) -> Result<bool, AppError> {
    let sql = format!("SELECT 1 FROM {} WHERE id = $1 FOR SHARE", table);
    tracing::debug!(sql = %sql, id, "query (tx)");
    let row: Option<(i32,)> = sqlx::query_as(&sql).bind(id).fetch_optional(&mut *conn).await?;
    Ok(row.is_some())
}
