use chrono::Utc;
use serde::{Deserialize, Serialize};

// ============================================================================
// Audit
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warn,
}

impl CheckStatus {
    pub const VALUES: &'static [&'static str] = &["PASS", "FAIL", "WARN"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub description: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditCategory {
    Performance,
    Accessibility,
    Seo,
}

/// Simulated audit of a single site, one list of checks per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub performance: Vec<CheckResult>,
    pub accessibility: Vec<CheckResult>,
    pub seo: Vec<CheckResult>,
}

impl AuditReport {
    pub fn checks(&self, category: AuditCategory) -> &[CheckResult] {
        match category {
            AuditCategory::Performance => &self.performance,
            AuditCategory::Accessibility => &self.accessibility,
            AuditCategory::Seo => &self.seo,
        }
    }

    /// Percentage of passing checks in a category, rounded. Empty categories score 0.
    pub fn score(&self, category: AuditCategory) -> u32 {
        let checks = self.checks(category);
        if checks.is_empty() {
            return 0;
        }
        let passed = checks
            .iter()
            .filter(|c| c.status == CheckStatus::Pass)
            .count();
        ((passed as f64 / checks.len() as f64) * 100.0).round() as u32
    }

    pub fn scores(&self) -> AuditScores {
        AuditScores {
            performance: self.score(AuditCategory::Performance),
            accessibility: self.score(AuditCategory::Accessibility),
            seo: self.score(AuditCategory::Seo),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuditScores {
    pub performance: u32,
    pub accessibility: u32,
    pub seo: u32,
}

// ============================================================================
// Test suites and runs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestAction {
    Navigate,
    Click,
    Type,
    VerifyText,
    VerifyVisible,
    VerifyUrl,
    ApiRequest,
}

impl TestAction {
    pub const VALUES: &'static [&'static str] = &[
        "NAVIGATE",
        "CLICK",
        "TYPE",
        "VERIFY_TEXT",
        "VERIFY_VISIBLE",
        "VERIFY_URL",
        "API_REQUEST",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestAction::Navigate => "NAVIGATE",
            TestAction::Click => "CLICK",
            TestAction::Type => "TYPE",
            TestAction::VerifyText => "VERIFY_TEXT",
            TestAction::VerifyVisible => "VERIFY_VISIBLE",
            TestAction::VerifyUrl => "VERIFY_URL",
            TestAction::ApiRequest => "API_REQUEST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
    Pass,
    Fail,
}

impl StepStatus {
    pub const VALUES: &'static [&'static str] = &["PASS", "FAIL"];
}

/// A step as written by a user or generated at authoring time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoredStep {
    pub action: TestAction,
    pub description: String,
}

impl AuthoredStep {
    pub fn new(action: TestAction, description: impl Into<String>) -> Self {
        Self {
            action,
            description: description.into(),
        }
    }
}

/// A step after simulation. `screenshot_url` is only ever set by the imaging stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStep {
    pub action: TestAction,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StepStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,
}

impl TestStep {
    pub fn is_failed(&self) -> bool {
        self.status == Some(StepStatus::Fail)
    }

    /// Prompt to illustrate this step, only for failed steps that carry a
    /// non-blank one.
    pub fn pending_screenshot(&self) -> Option<&str> {
        if !self.is_failed() {
            return None;
        }
        self.screenshot_prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}

impl From<AuthoredStep> for TestStep {
    fn from(step: AuthoredStep) -> Self {
        Self {
            action: step.action,
            description: step.description,
            status: None,
            result: None,
            screenshot_prompt: None,
            screenshot_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    pub id: String,
    pub title: String,
    pub target_url: String,
    pub steps: Vec<AuthoredStep>,
}

impl TestSuite {
    /// Assign a fresh id to a suite that has just been authored.
    pub fn create(title: String, target_url: String, steps: Vec<AuthoredStep>) -> Self {
        Self {
            id: format!("suite-{}", uuid::Uuid::new_v4()),
            title,
            target_url,
            steps,
        }
    }
}

/// What the simulation call returns: a run without its id, suite link or timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedRun {
    pub title: String,
    pub target_url: String,
    pub summary: String,
    pub status: StepStatus,
    pub steps: Vec<TestStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunResult {
    pub id: String,
    pub test_suite_id: String,
    pub title: String,
    pub target_url: String,
    pub summary: String,
    pub status: StepStatus,
    pub completed_at: String,
    pub steps: Vec<TestStep>,
}

impl TestRunResult {
    pub fn assemble(test_suite_id: impl Into<String>, run: SimulatedRun) -> Self {
        Self {
            id: format!("run-{}", uuid::Uuid::new_v4()),
            test_suite_id: test_suite_id.into(),
            title: run.title,
            target_url: run.target_url,
            summary: run.summary,
            status: run.status,
            completed_at: Utc::now().to_rfc3339(),
            steps: run.steps,
        }
    }
}

// ============================================================================
// Developer tools
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexResult {
    pub regex: String,
    pub explanation: String,
}

/// Envelope the step-generation contract wraps its list in.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedSteps {
    pub steps: Vec<AuthoredStep>,
}
