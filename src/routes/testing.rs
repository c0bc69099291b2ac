use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

use crate::error::WebCheckError;
use crate::model::{AuthoredStep, TestRunResult, TestSuite};
use crate::orchestrator::RunProgress;
use crate::state::SharedState;
use crate::validation;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteDraft {
    pub title: String,
    pub target_url: String,
    #[serde(default)]
    pub steps: Vec<AuthoredStep>,
}

#[derive(Serialize)]
pub struct SuiteList {
    pub suites: Vec<TestSuite>,
}

#[derive(Deserialize)]
pub struct GenerateStepsRequest {
    pub goal: String,
    pub url: String,
}

#[derive(Serialize)]
pub struct GenerateStepsResponse {
    pub steps: Vec<AuthoredStep>,
}

/// GET /tests/suites
pub async fn list_suites(State(state): State<SharedState>) -> Json<SuiteList> {
    let suites = state.suites.read().await.clone();
    Json(SuiteList { suites })
}

/// POST /tests/suites. Validate a draft and store it.
pub async fn create_suite(
    State(state): State<SharedState>,
    Json(draft): Json<SuiteDraft>,
) -> Result<Json<TestSuite>, WebCheckError> {
    let suite = validation::build_suite(&draft.title, &draft.target_url, draft.steps)?;
    state.add_suite(suite.clone()).await;
    tracing::info!("Saved test suite {} ({})", suite.id, suite.title);
    Ok(Json(suite))
}

/// POST /tests/suites/{id}/run
pub async fn run_saved_suite(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<TestRunResult>, WebCheckError> {
    let suite = state.find_suite(&id).await?;
    run(&state, &suite).await
}

/// POST /tests/run. Run a draft without saving it.
pub async fn run_draft(
    State(state): State<SharedState>,
    Json(draft): Json<SuiteDraft>,
) -> Result<Json<TestRunResult>, WebCheckError> {
    let suite = validation::build_suite(&draft.title, &draft.target_url, draft.steps)?;
    run(&state, &suite).await
}

async fn run(state: &SharedState, suite: &TestSuite) -> Result<Json<TestRunResult>, WebCheckError> {
    let service = state.service().await;
    let result = service.run_test_suite(suite, &state.run_progress).await?;
    Ok(Json(result))
}

/// GET /tests/status. Latest progress snapshot.
pub async fn status(State(state): State<SharedState>) -> Json<RunProgress> {
    Json(state.run_progress.borrow().clone())
}

/// GET /tests/status/stream. SSE stream of progress changes.
pub async fn status_stream(
    State(state): State<SharedState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.run_progress.subscribe()).map(|progress| {
        let data = serde_json::to_string(&progress).unwrap_or_default();
        Ok(Event::default().event("progress").data(data))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// POST /tests/steps/generate
pub async fn generate_steps(
    State(state): State<SharedState>,
    Json(body): Json<GenerateStepsRequest>,
) -> Result<Json<GenerateStepsResponse>, WebCheckError> {
    let steps = state
        .service()
        .await
        .generate_test_steps(&body.goal, &body.url)
        .await?;
    Ok(Json(GenerateStepsResponse { steps }))
}
