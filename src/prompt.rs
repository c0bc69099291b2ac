use crate::error::Task;
use crate::model::TestSuite;
use crate::schema::Contract;

/// An instruction ready to send, with the contract its reply must honor.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub task: Task,
    pub contract: Contract,
    pub text: String,
    pub system_instruction: Option<String>,
    pub temperature: Option<f64>,
}

impl Prompt {
    fn structured(task: Task, contract: Contract, text: String) -> Self {
        Self {
            task,
            contract,
            text,
            system_instruction: None,
            temperature: None,
        }
    }

    fn raw(task: Task, text: String, temperature: f64) -> Self {
        Self {
            task,
            contract: Contract::RawText,
            text,
            system_instruction: None,
            temperature: Some(temperature),
        }
    }
}

const REFACTOR_SYSTEM_INSTRUCTION: &str = "You are an expert software engineer who writes clean, efficient and maintainable code. You refactor code snippets according to the user's instructions.";

/// Build the simulated site audit prompt.
pub fn audit_prompt(url: &str) -> Prompt {
    let text = format!(
        r#"You are an expert automated website quality assurance tool.
Produce a simulated analysis of the website at the URL: {url}

Do not try to fetch or visit the URL. Instead, write a realistic audit based on the issues commonly found on websites of this kind.
Report on three categories: performance, accessibility and SEO.
For each category, list 5-7 specific checks.
For each check give its name, a status ('PASS', 'FAIL' or 'WARN'), a short description of what was checked, and a recommendation when the status is not 'PASS'.
When a check is 'FAIL' or 'WARN', also provide a short, actionable 'codeSnippet' that fixes the issue (for a missing alt attribute, an example <img> tag with a proper alt). When the check passes or no snippet applies, 'codeSnippet' must be null.
Your response must strictly follow the provided JSON schema."#
    );
    Prompt::structured(Task::AnalyzeWebsite, Contract::AuditReport, text)
}

/// Build the prompt that asks the model to invent the outcome of a test suite.
pub fn test_run_prompt(suite: &TestSuite) -> Prompt {
    let steps = suite
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}: {}", i + 1, step.action.as_str(), step.description))
        .collect::<Vec<_>>()
        .join("\n");

    let text = format!(
        r#"You are an expert QA automation engineer who simulates test executions.
Take the user-defined test suite below and produce a simulated run.

- Test title: "{title}"
- Target URL: "{target_url}"
- Test steps:
{steps}

Do not try to fetch or visit the URL.
For every step, in the given order:
1. Keep the original action and the meaning of the description. You may refine the description to be more specific, for example by naming a plausible CSS selector.
2. Simulate a realistic 'PASS' or 'FAIL' status. Unless the flow is trivial, a realistic run mixes passing and failing steps.
3. Write a one-sentence 'result' explaining why the step passed or failed.
4. If the step is 'FAIL', you MUST provide a detailed 'screenshotPrompt' describing the UI at the moment of failure, suitable for an image generation model. If the step is 'PASS', 'screenshotPrompt' MUST be null.
Finally write a 'summary' and an overall 'status' for the whole run based on the step outcomes.

The 'title' and 'targetUrl' in your response must match the ones given above.
Your response must strictly follow the provided JSON schema."#,
        title = suite.title,
        target_url = suite.target_url,
    );
    Prompt::structured(Task::SimulateTestRun, Contract::TestRunGeneration, text)
}

/// Build the prompt that drafts authored steps from a free-text goal.
pub fn step_generation_prompt(goal: &str, url: &str) -> Prompt {
    let text = format!(
        r#"You are an expert QA automation engineer who writes test plans.
Generate the ordered test steps needed to accomplish the goal below.

- Goal: "{goal}"
- Target URL: "{url}"

Each step must be a concrete action a real user would take, with only an 'action' and a 'description'. Be specific: instead of "Enter credentials", write "Type 'user@example.com' into the email field" and "Type 'password' into the password field".
Do not include any status or result.
Your response must strictly be a JSON object containing the array of steps, following the provided schema. Return nothing else."#
    );
    Prompt::structured(Task::GenerateTestSteps, Contract::TestStepGeneration, text)
}

pub fn refactor_prompt(code: &str, instruction: &str) -> Prompt {
    let text = format!(
        r#"Refactor the code below according to the instruction.
Return only the raw refactored code. No explanations, no introductions, no markdown formatting or code fences.

Instruction: "{instruction}"

Code to refactor:
```
{code}
```"#
    );
    let mut prompt = Prompt::raw(Task::RefactorCode, text, 0.2);
    prompt.system_instruction = Some(REFACTOR_SYSTEM_INSTRUCTION.to_string());
    prompt
}

pub fn regex_prompt(description: &str) -> Prompt {
    let text = format!(
        r#"You are a regular expression expert.
Write a regular expression for the description below, plus a clear step-by-step explanation of how it works.
Return the expression as a plain string, without enclosing slashes or flags.

Description: "{description}"

Your response must be a JSON object that strictly follows the provided schema."#
    );
    Prompt::structured(Task::GenerateRegex, Contract::RegexResult, text)
}

pub fn ui_component_prompt(description: &str) -> Prompt {
    let text = format!(
        r#"You are an expert frontend developer specialising in React and Tailwind CSS.
Write a single, self-contained React functional component using JSX and Tailwind CSS classes for the description below.
- Do not include any import statements; React is available globally.
- The component must be fully functional and styled as requested.
- Use placeholder data or images (for example from placehold.co) where needed.
- Return only the raw component code. No explanations, no introductions, no markdown formatting or code fences.

Description: "{description}""#
    );
    Prompt::raw(Task::GenerateUiComponent, text, 0.1)
}

/// Frame a failure scenario for the image model.
pub fn screenshot_prompt(scene: &str) -> String {
    format!(
        "Generate a realistic screenshot of a web application UI illustrating the following failure scenario. The image should look like a modern, clean web page. Do not include any caption or text that says \"screenshot\". Scene: {scene}"
    )
}
