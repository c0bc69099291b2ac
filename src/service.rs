use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

use crate::client::GenerationClient;
use crate::config::CANNED_RUN_DELAY_MS;
use crate::error::Result;
use crate::model::{
    AuditReport, AuthoredStep, GeneratedSteps, RegexResult, SimulatedRun, TestRunResult, TestSuite,
};
use crate::orchestrator::{self, RunProgress, TestRunOrchestrator};
use crate::prompt;
use crate::validation::{normalize_url, require};

/// The operations a front-end calls. Inputs are validated before any
/// generation call is made.
pub struct WebCheck {
    client: GenerationClient,
    orchestrator: TestRunOrchestrator,
}

impl WebCheck {
    pub fn new(client: GenerationClient) -> Self {
        Self::with_canned_delay(client, Duration::from_millis(CANNED_RUN_DELAY_MS))
    }

    pub fn with_canned_delay(client: GenerationClient, canned_delay: Duration) -> Self {
        let orchestrator = TestRunOrchestrator::new(client.clone(), canned_delay);
        Self {
            client,
            orchestrator,
        }
    }

    pub async fn analyze_website(&self, url: &str) -> Result<AuditReport> {
        let url = normalize_url(url)?;
        info!("Analyzing website {}", url);
        self.client
            .generate_typed(&prompt::audit_prompt(&url))
            .await
    }

    /// Simulation stage only: the run fragment without id, suite link or screenshots.
    pub async fn simulate_test_run(&self, suite: &TestSuite) -> Result<SimulatedRun> {
        orchestrator::simulate(&self.client, suite).await
    }

    /// Full run through the orchestrator, screenshots included.
    pub async fn run_test_suite(
        &self,
        suite: &TestSuite,
        progress: &watch::Sender<RunProgress>,
    ) -> Result<TestRunResult> {
        self.orchestrator.run(suite, progress).await
    }

    pub async fn generate_test_steps(&self, goal: &str, url: &str) -> Result<Vec<AuthoredStep>> {
        const MSG: &str = "Please provide a starting URL and an AI instruction first.";
        let goal = require(goal, MSG)?;
        let url = require(url, MSG)?;

        let generated: GeneratedSteps = self
            .client
            .generate_typed(&prompt::step_generation_prompt(goal, url))
            .await?;
        Ok(generated.steps)
    }

    pub async fn refactor_code(&self, code: &str, instruction: &str) -> Result<String> {
        const MSG: &str = "Please provide both code and an instruction.";
        require(code, MSG)?;
        let instruction = require(instruction, MSG)?;

        self.client
            .generate_raw_text(&prompt::refactor_prompt(code, instruction))
            .await
    }

    pub async fn generate_regex(&self, description: &str) -> Result<RegexResult> {
        let description = require(description, "Please provide a description for the regex.")?;
        self.client
            .generate_typed(&prompt::regex_prompt(description))
            .await
    }

    pub async fn generate_ui_component(&self, description: &str) -> Result<String> {
        let description = require(
            description,
            "Please describe the component you want to build.",
        )?;
        self.client
            .generate_raw_text(&prompt::ui_component_prompt(description))
            .await
    }
}
