use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::WebCheckError;
use crate::model::RegexResult;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RefactorRequest {
    pub code: String,
    pub instruction: String,
}

#[derive(Deserialize)]
pub struct DescriptionRequest {
    pub description: String,
}

#[derive(Serialize)]
pub struct CodeResponse {
    pub code: String,
}

/// POST /tools/refactor
pub async fn refactor(
    State(state): State<SharedState>,
    Json(body): Json<RefactorRequest>,
) -> Result<Json<CodeResponse>, WebCheckError> {
    let code = state
        .service()
        .await
        .refactor_code(&body.code, &body.instruction)
        .await?;
    Ok(Json(CodeResponse { code }))
}

/// POST /tools/regex
pub async fn regex(
    State(state): State<SharedState>,
    Json(body): Json<DescriptionRequest>,
) -> Result<Json<RegexResult>, WebCheckError> {
    let result = state
        .service()
        .await
        .generate_regex(&body.description)
        .await?;
    Ok(Json(result))
}

/// POST /tools/component
pub async fn component(
    State(state): State<SharedState>,
    Json(body): Json<DescriptionRequest>,
) -> Result<Json<CodeResponse>, WebCheckError> {
    let code = state
        .service()
        .await
        .generate_ui_component(&body.description)
        .await?;
    Ok(Json(CodeResponse { code }))
}
