use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::WebCheckError;
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRequest {
    pub api_key: String,
}

/// Never echoes the key itself.
#[derive(Serialize)]
pub struct ApiKeyStatus {
    pub configured: bool,
}

/// GET /settings/api-key
pub async fn get_api_key(State(state): State<SharedState>) -> Json<ApiKeyStatus> {
    Json(ApiKeyStatus {
        configured: state.has_api_key().await,
    })
}

/// POST /settings/api-key. Store a key and rebuild the generation client.
pub async fn save_api_key(
    State(state): State<SharedState>,
    Json(body): Json<ApiKeyRequest>,
) -> Result<Json<ApiKeyStatus>, WebCheckError> {
    state.set_api_key(&body.api_key).await?;
    Ok(Json(ApiKeyStatus { configured: true }))
}
