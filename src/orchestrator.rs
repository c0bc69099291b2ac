//! The test-run workflow: one simulation call, then concurrent screenshot
//! calls for the failed steps, merged into a single `TestRunResult`.
//!
//! ```text
//! Idle -> Simulating -> ImagingSteps -> Assembled
//!              \
//!               -> Failed
//! ```
//!
//! Only the simulation stage can fail a run. A screenshot that cannot be
//! generated leaves its step without `screenshot_url` and nothing else.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::canned;
use crate::client::GenerationClient;
use crate::error::Result;
use crate::model::{SimulatedRun, StepStatus, TestRunResult, TestStep, TestSuite};
use crate::prompt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Simulating,
    ImagingSteps,
    Assembled,
    Failed,
}

/// Read-only progress snapshot for observers of the current run.
#[derive(Debug, Clone, Serialize)]
pub struct RunProgress {
    pub phase: RunPhase,
    pub suite_id: Option<String>,
    pub message: String,
    pub updated_at: DateTime<Utc>,
}

impl RunProgress {
    pub fn idle() -> Self {
        Self {
            phase: RunPhase::Idle,
            suite_id: None,
            message: "Idle".to_string(),
            updated_at: Utc::now(),
        }
    }
}

pub fn progress_channel() -> (watch::Sender<RunProgress>, watch::Receiver<RunProgress>) {
    watch::channel(RunProgress::idle())
}

pub struct TestRunOrchestrator {
    client: GenerationClient,
    canned_delay: Duration,
}

impl TestRunOrchestrator {
    pub fn new(client: GenerationClient, canned_delay: Duration) -> Self {
        Self {
            client,
            canned_delay,
        }
    }

    pub async fn run(
        &self,
        suite: &TestSuite,
        progress: &watch::Sender<RunProgress>,
    ) -> Result<TestRunResult> {
        if let Some(result) = canned::canned_run(&suite.id) {
            info!("Serving canned run for sample suite {}", suite.id);
            report(progress, RunPhase::Simulating, suite, "Loading sample report...");
            tokio::time::sleep(self.canned_delay).await;
            report(progress, RunPhase::Assembled, suite, "Sample report loaded");
            return Ok(result);
        }

        // Simulating
        report(
            progress,
            RunPhase::Simulating,
            suite,
            "AI is simulating the test run...",
        );
        let simulated = match simulate(&self.client, suite).await {
            Ok(run) => run,
            Err(e) => {
                warn!("Test run for suite {} failed: {}", suite.id, e);
                report(progress, RunPhase::Failed, suite, e.to_string());
                return Err(e);
            }
        };

        // ImagingSteps
        let pending = simulated
            .steps
            .iter()
            .filter(|s| s.pending_screenshot().is_some())
            .count();
        report(
            progress,
            RunPhase::ImagingSteps,
            suite,
            format!("Generating failure screenshots for {} step(s)...", pending),
        );
        let steps = attach_screenshots(&self.client, simulated.steps).await;

        // Assembled
        let result = TestRunResult::assemble(
            suite.id.clone(),
            SimulatedRun { steps, ..simulated },
        );
        info!(
            "Test run {} for suite {} assembled: status={:?}, steps={}",
            result.id,
            suite.id,
            result.status,
            result.steps.len()
        );
        report(progress, RunPhase::Assembled, suite, "Test run complete");
        Ok(result)
    }
}

/// The simulation stage on its own. The model's title and target URL are
/// replaced with the suite's, since it does not reliably echo them.
pub async fn simulate(client: &GenerationClient, suite: &TestSuite) -> Result<SimulatedRun> {
    let prompt = prompt::test_run_prompt(suite);
    let mut run: SimulatedRun = client.generate_typed(&prompt).await?;

    run.title = suite.title.clone();
    run.target_url = suite.target_url.clone();
    for step in &mut run.steps {
        // Passing steps never carry screenshot data.
        if step.status == Some(StepStatus::Pass) {
            step.screenshot_prompt = None;
            step.screenshot_url = None;
        }
    }
    Ok(run)
}

/// Fan out one image call per failed step with a prompt and wait for all of
/// them. Order and length of `steps` are preserved.
pub async fn attach_screenshots(client: &GenerationClient, steps: Vec<TestStep>) -> Vec<TestStep> {
    let calls = steps.into_iter().map(|mut step| async move {
        let Some(scene) = step.pending_screenshot().map(str::to_string) else {
            return step;
        };
        match client.generate_image(&scene).await {
            Ok(data_uri) => step.screenshot_url = Some(data_uri),
            Err(e) => warn!(
                "Screenshot for step '{}' not generated: {}",
                step.description, e
            ),
        }
        step
    });
    join_all(calls).await
}

fn report(
    progress: &watch::Sender<RunProgress>,
    phase: RunPhase,
    suite: &TestSuite,
    message: impl Into<String>,
) {
    let message = message.into();
    info!("Test run [{}] {:?}: {}", suite.id, phase, message);
    progress.send_replace(RunProgress {
        phase,
        suite_id: Some(suite.id.clone()),
        message,
        updated_at: Utc::now(),
    });
}
