//! Liveness and readiness of the registry.

use crate::error::AppError;
use crate::service::HealthService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Liveness {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing_tables: Vec<String>,
}

/// Process is up; never touches the database.
async fn live() -> Json<Liveness> {
    Json(Liveness {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 200 when every registry table resolves, 503 listing the missing ones otherwise.
/// An unreachable database surfaces as `AppError::Db`.
async fn ready(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let missing_tables = HealthService::missing_tables(&state.pool).await?;
    let status = if missing_tables.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = Readiness {
        status: if missing_tables.is_empty() { "ok" } else { "degraded" },
        missing_tables,
    };
    Ok((status, Json(body)))
}

/// GET /health, GET /ready.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/health", get(live))
        .route("/ready", get(ready))
        .with_state(state)
}
