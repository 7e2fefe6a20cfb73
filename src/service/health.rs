//! Readiness: the database answers and every registry table is present.

use crate::error::AppError;
use crate::store::table_names;
use sqlx::PgPool;

pub struct HealthService;

impl HealthService {
    /// Registry tables that `to_regclass` cannot resolve. Empty when the schema is complete.
    pub async fn missing_tables(pool: &PgPool) -> Result<Vec<String>, AppError> {
        let expected: Vec<String> = table_names().map(str::to_string).collect();
        let sql = "SELECT t FROM unnest($1::text[]) AS t WHERE to_regclass(t) IS NULL ORDER BY t";
        tracing::debug!(sql = %sql, "query");
        let missing = sqlx::query_scalar::<_, String>(sql)
            .bind(expected)
            .fetch_all(pool)
            .await?;
        if !missing.is_empty() {
            tracing::warn!(missing = ?missing, "registry tables missing");
        }
        Ok(missing)
    }
}
