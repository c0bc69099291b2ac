//! Local input checks. Everything here runs before a request is sent.

use url::Url;

use crate::error::{Result, WebCheckError};
use crate::model::{AuthoredStep, TestSuite};

pub const MSG_EMPTY_URL: &str = "Please enter a URL.";
pub const MSG_INVALID_URL: &str =
    "The URL provided is not in a valid format. Please check and try again.";

/// Trim, default the scheme to https, and check the result parses as a URL.
/// The normalized input string is returned as typed, not re-serialized.
pub fn normalize_url(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WebCheckError::validation(MSG_EMPTY_URL));
    }

    let lower = trimmed.to_ascii_lowercase();
    let processed = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    match Url::parse(&processed) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => Ok(processed),
        _ => Err(WebCheckError::validation(MSG_INVALID_URL)),
    }
}

/// Return the trimmed value, or a validation error carrying `message`.
pub fn require<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(WebCheckError::validation(message))
    } else {
        Ok(trimmed)
    }
}

/// Validate a suite draft and assign it an id.
pub fn build_suite(title: &str, target_url: &str, steps: Vec<AuthoredStep>) -> Result<TestSuite> {
    if title.trim().is_empty() || target_url.trim().is_empty() {
        return Err(WebCheckError::validation(
            "Please provide both a test name and a URL.",
        ));
    }
    if steps.is_empty() {
        return Err(WebCheckError::validation(
            "Please add at least one test step before saving.",
        ));
    }
    if steps.iter().any(|s| s.description.trim().is_empty()) {
        return Err(WebCheckError::validation(
            "Please provide a description for the step.",
        ));
    }
    let target_url = normalize_url(target_url)?;
    Ok(TestSuite::create(title.trim().to_string(), target_url, steps))
}
