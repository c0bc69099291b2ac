use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The generation task an error belongs to. Drives the user-facing prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    AnalyzeWebsite,
    SimulateTestRun,
    GenerateTestSteps,
    RefactorCode,
    GenerateRegex,
    GenerateUiComponent,
    FailureScreenshot,
}

impl Task {
    pub fn name(&self) -> &'static str {
        match self {
            Task::AnalyzeWebsite => "analyze_website",
            Task::SimulateTestRun => "simulate_test_run",
            Task::GenerateTestSteps => "generate_test_steps",
            Task::RefactorCode => "refactor_code",
            Task::GenerateRegex => "generate_regex",
            Task::GenerateUiComponent => "generate_ui_component",
            Task::FailureScreenshot => "failure_screenshot",
        }
    }

    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Task::AnalyzeWebsite => "Failed to analyze the website.",
            Task::SimulateTestRun => "Failed to run test.",
            Task::GenerateTestSteps => "Failed to generate steps.",
            Task::RefactorCode => "Failed to refactor code.",
            Task::GenerateRegex => "Failed to generate regex.",
            Task::GenerateUiComponent => "Failed to generate component.",
            Task::FailureScreenshot => "Failed to generate failure screenshot.",
        }
    }
}

/// Failure reported by a generation backend before any contract checking.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct BackendError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum WebCheckError {
    /// Rejected locally; no request was sent.
    #[error("{0}")]
    InputValidation(String),

    #[error("{} {message}", .task.failure_prefix())]
    Transport { task: Task, message: String },

    /// `detail` is for logs only and never reaches the caller.
    #[error("{} The model returned an invalid response.", .task.failure_prefix())]
    Contract { task: Task, detail: String },

    #[error("{} {}", Task::FailureScreenshot.failure_prefix(), .0)]
    Image(String),

    #[error("Test suite not found: {0}")]
    SuiteNotFound(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebCheckError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::InputValidation(msg.into())
    }

    pub fn transport(task: Task, err: BackendError) -> Self {
        Self::Transport {
            task,
            message: err.0,
        }
    }

    pub fn contract(task: Task, detail: impl Into<String>) -> Self {
        Self::Contract {
            task,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WebCheckError>;

impl IntoResponse for WebCheckError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebCheckError::InputValidation(_) => StatusCode::BAD_REQUEST,
            WebCheckError::SuiteNotFound(_) => StatusCode::NOT_FOUND,
            WebCheckError::Transport { .. } => StatusCode::BAD_GATEWAY,
            WebCheckError::Contract { .. } => StatusCode::BAD_GATEWAY,
            WebCheckError::Image(_) => StatusCode::BAD_GATEWAY,
            WebCheckError::Settings(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebCheckError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
