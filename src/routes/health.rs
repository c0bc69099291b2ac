use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::orchestrator::RunPhase;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub api_key_configured: bool,
    pub models: ModelsInfo,
    pub test_run_phase: RunPhase,
}

#[derive(Serialize)]
pub struct ModelsInfo {
    pub text: String,
    pub image: String,
}

/// "ready" once a key is configured; generation calls fail until then.
pub fn determine_overall_status(api_key_configured: bool) -> &'static str {
    if api_key_configured {
        "ready"
    } else {
        "unconfigured"
    }
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let api_key_configured = state.has_api_key().await;
    let phase = state.run_progress.borrow().phase;

    Json(HealthResponse {
        status: determine_overall_status(api_key_configured).to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_key_configured,
        models: ModelsInfo {
            text: state.config.text_model.clone(),
            image: state.config.image_model.clone(),
        },
        test_run_phase: phase,
    })
}
