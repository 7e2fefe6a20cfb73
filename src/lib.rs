//! Student registry: REST backend for students, subjects and classes over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{DatabaseSettings, Settings};
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes_with_ready, resource_routes};
pub use state::AppState;
pub use store::ensure_schema;
