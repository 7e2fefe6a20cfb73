//! Server binary: loads settings, connects the pool, mounts the router.

use student_registry::{app, ensure_schema, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("student_registry=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.database.pool_size)
        .connect_with(settings.database.connect_options()?)
        .await?;
    if settings.create_schema {
        ensure_schema(&pool).await?;
    }

    let addr = settings.listen_addr()?;
    let state = AppState::new(pool, settings);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
