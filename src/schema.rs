//! Response contracts for every generation task.
//!
//! A contract is a typed tree that serializes into the `responseSchema`
//! understood by the generation endpoint. Fields read downstream without a
//! null check are required; fields that may legitimately be null are
//! marked nullable instead.

use serde_json::{json, Map, Value};

use crate::model::{CheckStatus, StepStatus, TestAction};

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    String {
        description: &'static str,
        values: &'static [&'static str],
        nullable: bool,
    },
    Array {
        description: &'static str,
        items: Box<SchemaNode>,
    },
    Object {
        properties: Vec<(&'static str, SchemaNode)>,
        required: &'static [&'static str],
    },
}

impl SchemaNode {
    fn text(description: &'static str) -> Self {
        SchemaNode::String {
            description,
            values: &[],
            nullable: false,
        }
    }

    fn nullable_text(description: &'static str) -> Self {
        SchemaNode::String {
            description,
            values: &[],
            nullable: true,
        }
    }

    fn one_of(description: &'static str, values: &'static [&'static str]) -> Self {
        SchemaNode::String {
            description,
            values,
            nullable: false,
        }
    }

    fn list(description: &'static str, items: SchemaNode) -> Self {
        SchemaNode::Array {
            description,
            items: Box::new(items),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            SchemaNode::String {
                description,
                values,
                nullable,
            } => {
                let mut node = Map::new();
                node.insert("type".into(), json!("STRING"));
                node.insert("description".into(), json!(description));
                if !values.is_empty() {
                    node.insert("enum".into(), json!(values));
                }
                if *nullable {
                    node.insert("nullable".into(), json!(true));
                }
                Value::Object(node)
            }
            SchemaNode::Array { description, items } => json!({
                "type": "ARRAY",
                "description": description,
                "items": items.to_json(),
            }),
            SchemaNode::Object {
                properties,
                required,
            } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, node)| (name.to_string(), node.to_json()))
                    .collect();
                let ordering: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
                json!({
                    "type": "OBJECT",
                    "properties": props,
                    "propertyOrdering": ordering,
                    "required": required,
                })
            }
        }
    }

    /// Required fields of an object node; empty for anything else.
    pub fn required(&self) -> &'static [&'static str] {
        match self {
            SchemaNode::Object { required, .. } => *required,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    AuditReport,
    TestRunGeneration,
    TestStepGeneration,
    RegexResult,
    /// Plain text reply, no JSON.
    RawText,
}

impl Contract {
    pub fn name(&self) -> &'static str {
        match self {
            Contract::AuditReport => "audit_report",
            Contract::TestRunGeneration => "test_run_generation",
            Contract::TestStepGeneration => "test_step_generation",
            Contract::RegexResult => "regex_result",
            Contract::RawText => "raw_text",
        }
    }

    pub fn schema(&self) -> Option<SchemaNode> {
        match self {
            Contract::AuditReport => Some(audit_report()),
            Contract::TestRunGeneration => Some(test_run_generation()),
            Contract::TestStepGeneration => Some(test_step_generation()),
            Contract::RegexResult => Some(regex_result()),
            Contract::RawText => None,
        }
    }

    pub fn response_schema(&self) -> Option<Value> {
        self.schema().map(|s| s.to_json())
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        self.schema().map(|s| s.required()).unwrap_or(&[])
    }
}

fn check_result() -> SchemaNode {
    SchemaNode::Object {
        properties: vec![
            (
                "name",
                SchemaNode::text("Name of the check, e.g. 'Image Alt Tags'."),
            ),
            (
                "status",
                SchemaNode::one_of(
                    "Outcome of the check: 'PASS', 'FAIL' or 'WARN'.",
                    CheckStatus::VALUES,
                ),
            ),
            (
                "description",
                SchemaNode::text("One sentence on what the check covers and what was found."),
            ),
            (
                "recommendation",
                SchemaNode::text(
                    "One actionable sentence on fixing the issue, or that no action is needed on PASS.",
                ),
            ),
            (
                "codeSnippet",
                SchemaNode::nullable_text(
                    "Short code snippet that fixes the issue when the status is not PASS; null otherwise.",
                ),
            ),
        ],
        required: &["name", "status", "description", "recommendation"],
    }
}

pub fn audit_report() -> SchemaNode {
    SchemaNode::Object {
        properties: vec![
            (
                "performance",
                SchemaNode::list("Performance checks.", check_result()),
            ),
            (
                "accessibility",
                SchemaNode::list("Accessibility checks.", check_result()),
            ),
            ("seo", SchemaNode::list("SEO checks.", check_result())),
        ],
        required: &["performance", "accessibility", "seo"],
    }
}

fn executed_step() -> SchemaNode {
    SchemaNode::Object {
        properties: vec![
            (
                "action",
                SchemaNode::one_of("The action the step performs.", TestAction::VALUES),
            ),
            (
                "description",
                SchemaNode::text("What the step does, including the target element and values."),
            ),
            (
                "status",
                SchemaNode::one_of("Simulated outcome of the step.", StepStatus::VALUES),
            ),
            (
                "result",
                SchemaNode::text("One sentence explaining why the step passed or failed."),
            ),
            (
                "screenshotPrompt",
                SchemaNode::nullable_text(
                    "For a FAIL step, a detailed image-generation prompt describing the UI at the moment of failure. Must be null for a PASS step.",
                ),
            ),
        ],
        required: &[
            "action",
            "description",
            "status",
            "result",
            "screenshotPrompt",
        ],
    }
}

pub fn test_run_generation() -> SchemaNode {
    SchemaNode::Object {
        properties: vec![
            (
                "title",
                SchemaNode::text("Concise title of the test, based on the user's title."),
            ),
            ("targetUrl", SchemaNode::text("URL where the test starts.")),
            (
                "summary",
                SchemaNode::text("Short summary of the run based on the step outcomes."),
            ),
            (
                "status",
                SchemaNode::one_of(
                    "'PASS' if every step passed, 'FAIL' otherwise.",
                    StepStatus::VALUES,
                ),
            ),
            (
                "steps",
                SchemaNode::list("The executed steps, in order.", executed_step()),
            ),
        ],
        required: &["title", "targetUrl", "summary", "status", "steps"],
    }
}

pub fn test_step_generation() -> SchemaNode {
    SchemaNode::Object {
        properties: vec![(
            "steps",
            SchemaNode::list(
                "The generated steps, in order.",
                SchemaNode::Object {
                    properties: vec![
                        (
                            "action",
                            SchemaNode::one_of("The action to perform.", TestAction::VALUES),
                        ),
                        (
                            "description",
                            SchemaNode::text(
                                "Specific description of the step, including the target element and any values.",
                            ),
                        ),
                    ],
                    required: &["action", "description"],
                },
            ),
        )],
        required: &["steps"],
    }
}

pub fn regex_result() -> SchemaNode {
    SchemaNode::Object {
        properties: vec![
            (
                "regex",
                SchemaNode::text("The regular expression, without enclosing slashes."),
            ),
            (
                "explanation",
                SchemaNode::text("Step-by-step explanation of how the expression works."),
            ),
        ],
        required: &["regex", "explanation"],
    }
}
