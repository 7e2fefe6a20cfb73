//! Bootstrap DDL for the five tables. Used for local setups and integration tests; production schemas are managed outside this crate.

use crate::error::AppError;
use sqlx::PgPool;

const TABLES: &[(&str, &str)] = &[
    (
        "students",
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            grade TEXT NOT NULL
        )
        "#,
    ),
    (
        "subjects",
        r#"
        CREATE TABLE IF NOT EXISTS subjects (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    ),
    (
        "classes",
        r#"
        CREATE TABLE IF NOT EXISTS classes (
            id INTEGER PRIMARY KEY,
            name TEXT,
            level INTEGER NOT NULL DEFAULT 1
        )
        "#,
    ),
    (
        "student_subjects",
        r#"
        CREATE TABLE IF NOT EXISTS student_subjects (
            student_id INTEGER NOT NULL,
            subject_id INTEGER NOT NULL,
            PRIMARY KEY (student_id, subject_id)
        )
        "#,
    ),
    (
        "student_classes",
        r#"
        CREATE TABLE IF NOT EXISTS student_classes (
            student_id INTEGER NOT NULL,
            class_id INTEGER NOT NULL,
            PRIMARY KEY (student_id, class_id)
        )
        "#,
    ),
];

/// Names of the registry tables, in creation order.
pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|(name, _)| *name)
}

/// Key for the advisory lock held while tables are created.
const SCHEMA_LOCK_KEY: i64 = 0x5354_5544;

/// Create any missing table. Existing tables are left as they are.
/// Runs in one transaction under an advisory lock; concurrent callers wait for each other.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    for (name, ddl) in TABLES {
        tracing::debug!(table = %name, "ensure table");
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(tables = TABLES.len(), "schema ensured");
    Ok(())
}
