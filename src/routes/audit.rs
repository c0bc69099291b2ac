use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::canned;
use crate::error::WebCheckError;
use crate::model::{AuditReport, AuditScores};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AuditRequest {
    pub url: String,
}

#[derive(Serialize)]
pub struct AuditResponse {
    pub report: AuditReport,
    pub scores: AuditScores,
}

impl From<AuditReport> for AuditResponse {
    fn from(report: AuditReport) -> Self {
        let scores = report.scores();
        Self { report, scores }
    }
}

/// POST /audit. Simulated audit of a URL.
pub async fn analyze(
    State(state): State<SharedState>,
    Json(body): Json<AuditRequest>,
) -> Result<Json<AuditResponse>, WebCheckError> {
    let service = state.service().await;
    let report = service.analyze_website(&body.url).await?;
    Ok(Json(report.into()))
}

/// GET /audit/sample. Canned report, no generation call.
pub async fn sample() -> Json<AuditResponse> {
    Json(canned::sample_audit_report().into())
}
