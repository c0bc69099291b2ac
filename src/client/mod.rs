pub mod gemini;

use async_trait::async_trait;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, LazyLock};
use tracing::{debug, error, warn};

use crate::config::{IMAGE_ASPECT_RATIO, IMAGE_OUTPUT_MIME_TYPE};
use crate::error::{BackendError, Result, Task, WebCheckError};
use crate::prompt::{self, Prompt};
use crate::schema::Contract;

pub use gemini::GeminiBackend;

static LEADING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```(?:\w*\n)?").unwrap());
static TRAILING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```$").unwrap());

// --- Backend seam ---

#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
    /// `Some` asks for JSON constrained to this schema.
    pub response_schema: Option<Value>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub count: u32,
    pub output_mime_type: String,
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub mime_type: Option<String>,
    pub bytes_base64: String,
}

/// A remote text/image generation service.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate_text(&self, request: TextRequest) -> std::result::Result<String, BackendError>;

    async fn generate_images(
        &self,
        request: ImageRequest,
    ) -> std::result::Result<Vec<GeneratedImage>, BackendError>;
}

// --- Client ---

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSelection {
    pub text_model: String,
    pub image_model: String,
}

/// Every generation call goes through here. Enforces the prompt's contract
/// and maps failures onto the error taxonomy. Never retries.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    models: ModelSelection,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn GenerationBackend>, models: ModelSelection) -> Self {
        Self { backend, models }
    }

    async fn call_text(&self, prompt: &Prompt) -> Result<String> {
        let request = TextRequest {
            model: self.models.text_model.clone(),
            prompt: prompt.text.clone(),
            system_instruction: prompt.system_instruction.clone(),
            response_schema: prompt.contract.response_schema(),
            temperature: prompt.temperature,
        };
        debug!(
            "Generation call: task={}, contract={}",
            prompt.task.name(),
            prompt.contract.name()
        );
        self.backend.generate_text(request).await.map_err(|e| {
            warn!("Generation call for {} failed: {}", prompt.task.name(), e);
            WebCheckError::transport(prompt.task, e)
        })
    }

    /// Schema-constrained call. Returns the parsed JSON once every required
    /// top-level field is present.
    pub async fn generate_structured(&self, prompt: &Prompt) -> Result<Value> {
        let raw = self.call_text(prompt).await?;
        parse_structured(prompt.task, prompt.contract, &raw)
    }

    /// Schema-constrained call deserialized into its domain type.
    pub async fn generate_typed<T: DeserializeOwned>(&self, prompt: &Prompt) -> Result<T> {
        let value = self.generate_structured(prompt).await?;
        serde_json::from_value(value).map_err(|e| {
            error!(
                "Contract violation for {}: {}",
                prompt.task.name(),
                e
            );
            WebCheckError::contract(prompt.task, e.to_string())
        })
    }

    /// Unconstrained call returning plain text with any code fences removed.
    pub async fn generate_raw_text(&self, prompt: &Prompt) -> Result<String> {
        let raw = self.call_text(prompt).await?;
        Ok(strip_code_fences(&raw))
    }

    /// Generate one illustrative screenshot and return it as a data URI.
    pub async fn generate_image(&self, scene: &str) -> Result<String> {
        let request = ImageRequest {
            model: self.models.image_model.clone(),
            prompt: prompt::screenshot_prompt(scene),
            count: 1,
            output_mime_type: IMAGE_OUTPUT_MIME_TYPE.to_string(),
            aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
        };

        let images = self
            .backend
            .generate_images(request)
            .await
            .map_err(|e| {
                warn!(
                    "Generation call for {} failed: {}",
                    Task::FailureScreenshot.name(),
                    e
                );
                WebCheckError::Image(e.to_string())
            })?;

        let image = images
            .into_iter()
            .next()
            .ok_or_else(|| WebCheckError::Image("Image generation returned no images".to_string()))?;

        let mime_type = image
            .mime_type
            .as_deref()
            .unwrap_or(IMAGE_OUTPUT_MIME_TYPE);
        Ok(format!("data:{};base64,{}", mime_type, image.bytes_base64))
    }
}

/// Parse a structured reply and check the contract's required top-level fields.
pub fn parse_structured(task: Task, contract: Contract, raw: &str) -> Result<Value> {
    let trimmed = raw.trim();
    let value: Value = serde_json::from_str(trimmed).map_err(|e| {
        error!(
            "Contract violation for {}: response is not JSON ({} bytes): {}",
            task.name(),
            trimmed.len(),
            e
        );
        WebCheckError::contract(task, format!("invalid JSON: {}", e))
    })?;

    let Some(object) = value.as_object() else {
        error!("Contract violation for {}: response is not an object", task.name());
        return Err(WebCheckError::contract(task, "response is not a JSON object"));
    };

    let missing: Vec<&str> = contract
        .required_fields()
        .iter()
        .copied()
        .filter(|field| object.get(*field).map_or(true, Value::is_null))
        .collect();

    if !missing.is_empty() {
        error!(
            "Contract violation for {}: missing required fields {:?}",
            task.name(),
            missing
        );
        return Err(WebCheckError::contract(
            task,
            format!("missing required fields: {}", missing.join(", ")),
        ));
    }

    Ok(value)
}

/// Remove a leading ```` ```lang ```` line and a trailing ```` ``` ```` the
/// model may add despite being told not to.
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_leading = LEADING_FENCE.replace(trimmed, "");
    let without_trailing = TRAILING_FENCE.replace(&without_leading, "");
    without_trailing.trim_end().to_string()
}
