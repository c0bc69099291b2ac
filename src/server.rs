use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(crate::routes::health::health))
        // Site audit
        .route("/audit", post(crate::routes::audit::analyze))
        .route("/audit/sample", get(crate::routes::audit::sample))
        // Test suites and runs
        .route(
            "/tests/suites",
            get(crate::routes::testing::list_suites).post(crate::routes::testing::create_suite),
        )
        .route(
            "/tests/suites/{id}/run",
            post(crate::routes::testing::run_saved_suite),
        )
        .route("/tests/run", post(crate::routes::testing::run_draft))
        .route("/tests/status", get(crate::routes::testing::status))
        .route(
            "/tests/status/stream",
            get(crate::routes::testing::status_stream),
        )
        .route(
            "/tests/steps/generate",
            post(crate::routes::testing::generate_steps),
        )
        // Developer tools
        .route("/tools/refactor", post(crate::routes::tools::refactor))
        .route("/tools/regex", post(crate::routes::tools::regex))
        .route("/tools/component", post(crate::routes::tools::component))
        // Credential
        .route(
            "/settings/api-key",
            get(crate::routes::settings::get_api_key).post(crate::routes::settings::save_api_key),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
