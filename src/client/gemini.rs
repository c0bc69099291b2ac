//! Google Generative Language REST backend.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{GeneratedImage, GenerationBackend, ImageRequest, TextRequest};
use crate::error::BackendError;

pub struct GeminiBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

impl GeminiBackend {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.base_url.trim_end_matches('/'),
            model,
            method
        )
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, BackendError> {
        if self.api_key.trim().is_empty() {
            return Err(BackendError(
                "API_KEY_MISSING: Please configure your Gemini API key".to_string(),
            ));
        }

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError(format!("Failed to send request to Gemini API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BackendError(format!("Failed to parse Gemini API response: {}", e)))
    }
}

/// Body for `models/{model}:generateContent`.
pub fn text_request_body(request: &TextRequest) -> Value {
    let mut generation_config = Map::new();
    if let Some(schema) = &request.response_schema {
        generation_config.insert("responseMimeType".into(), json!("application/json"));
        generation_config.insert("responseSchema".into(), schema.clone());
    }
    if let Some(temperature) = request.temperature {
        generation_config.insert("temperature".into(), json!(temperature));
    }

    let mut body = json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": request.prompt }]
        }]
    });
    if let Some(system) = &request.system_instruction {
        body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
    }
    if !generation_config.is_empty() {
        body["generationConfig"] = Value::Object(generation_config);
    }
    body
}

/// Body for `models/{model}:predict`.
pub fn image_request_body(request: &ImageRequest) -> Value {
    json!({
        "instances": [{ "prompt": request.prompt }],
        "parameters": {
            "sampleCount": request.count,
            "outputMimeType": request.output_mime_type,
            "aspectRatio": request.aspect_ratio,
        }
    })
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate_text(&self, request: TextRequest) -> Result<String, BackendError> {
        let url = self.endpoint(&request.model, "generateContent");
        let json = self.post(&url, &text_request_body(&request)).await?;

        let parsed: GenerateContentResponse = serde_json::from_value(json)
            .map_err(|e| BackendError(format!("Unexpected Gemini response shape: {}", e)))?;

        let parts = parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .ok_or_else(|| BackendError("Gemini response contained no candidates".to_string()))?;

        Ok(parts.into_iter().filter_map(|p| p.text).collect())
    }

    async fn generate_images(&self, request: ImageRequest) -> Result<Vec<GeneratedImage>, BackendError> {
        let url = self.endpoint(&request.model, "predict");
        let json = self.post(&url, &image_request_body(&request)).await?;

        let parsed: PredictResponse = serde_json::from_value(json)
            .map_err(|e| BackendError(format!("Unexpected Imagen response shape: {}", e)))?;

        Ok(parsed
            .predictions
            .into_iter()
            .filter_map(|p| {
                p.bytes_base64_encoded.map(|bytes| GeneratedImage {
                    mime_type: p.mime_type,
                    bytes_base64: bytes,
                })
            })
            .collect())
    }
}
