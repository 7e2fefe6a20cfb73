//! Router assembly.

mod common;
mod resources;
pub use common::common_routes_with_ready;
pub use resources::resource_routes;

use crate::error::{redacted_response, InternalError};
use crate::state::AppState;
use axum::{extract::State, middleware::map_response_with_state, response::Response, Router};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Full application: common routes plus resource routes, with the configured body limit
/// and internal error exposure.
pub fn app(state: AppState) -> Router {
    let body_limit = state.settings.body_limit;
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(resource_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(body_limit))
                .layer(map_response_with_state(state, redact_internal_errors)),
        )
}

/// Replace tagged database error bodies unless the settings expose them.
async fn redact_internal_errors(State(state): State<AppState>, response: Response) -> Response {
    if state.settings.expose_internal_errors || response.extensions().get::<InternalError>().is_none() {
        return response;
    }
    redacted_response()
}
