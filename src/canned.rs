//! Sample data served without a generation call: one audit report, two
//! authored suites and the runs those suites resolve to.

use chrono::Utc;

use crate::model::{
    AuditReport, AuthoredStep, CheckResult, CheckStatus, StepStatus, TestAction, TestRunResult,
    TestStep, TestSuite,
};

/// Suite ids starting with this prefix may resolve to a canned run.
pub const CANNED_PREFIX: &str = "mock-";

const LOGIN_SUITE_ID: &str = "mock-suite-1";
const COUPON_SUITE_ID: &str = "mock-suite-2";

fn check(
    name: &str,
    status: CheckStatus,
    description: &str,
    recommendation: &str,
    code_snippet: Option<&str>,
) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status,
        description: description.to_string(),
        recommendation: recommendation.to_string(),
        code_snippet: code_snippet.map(str::to_string),
    }
}

pub fn sample_audit_report() -> AuditReport {
    use CheckStatus::{Fail, Pass, Warn};

    AuditReport {
        performance: vec![
            check(
                "First Contentful Paint (FCP)",
                Pass,
                "First text or image is painted well under 1.8 seconds.",
                "No action needed. First paint is fast.",
                None,
            ),
            check(
                "Largest Contentful Paint (LCP)",
                Warn,
                "The largest element paints at 2.8s, above the recommended 2.5s.",
                "Optimize the hero image or preload it to bring LCP down.",
                Some(r#"<link rel="preload" as="image" href="/hero.webp">"#),
            ),
            check(
                "Image Optimization",
                Fail,
                "Several images are served as uncompressed JPEG/PNG instead of modern formats.",
                "Compress images and serve them as WebP.",
                Some(r#"<picture><source srcset="/hero.webp" type="image/webp"><img src="/hero.jpg" alt="Hero"></picture>"#),
            ),
            check(
                "Reduce Unused JavaScript",
                Pass,
                "Bundles contain little unused code.",
                "No action needed. Code splitting is effective.",
                None,
            ),
            check(
                "Minimize Main-Thread Work",
                Warn,
                "Long tasks block the main thread during startup.",
                "Split long tasks and defer non-critical scripts.",
                Some(r#"<script src="/analytics.js" defer></script>"#),
            ),
        ],
        accessibility: vec![
            check(
                "Image Alt Tags",
                Fail,
                "Several key images are missing alt attributes.",
                "Add descriptive alt text to every <img> element.",
                Some(r#"<img src="/product.jpg" alt="Red running shoe, side view">"#),
            ),
            check(
                "Color Contrast",
                Pass,
                "Text and background colors meet WCAG AA contrast ratios.",
                "No action needed.",
                None,
            ),
            check(
                "Keyboard Navigation",
                Pass,
                "All interactive elements are reachable with the Tab key.",
                "No action needed.",
                None,
            ),
            check(
                "ARIA Roles",
                Warn,
                "Some custom controls have no ARIA role.",
                "Add roles to custom interactive elements.",
                Some(r#"<div role="button" tabindex="0">Add to cart</div>"#),
            ),
            check(
                "Form Labels",
                Fail,
                "The newsletter input has no associated label.",
                "Associate every input with a <label>.",
                Some(r#"<label for="email">Email</label><input id="email" type="email">"#),
            ),
        ],
        seo: vec![
            check(
                "Meta Description",
                Pass,
                "Pages carry unique meta descriptions of suitable length.",
                "No action needed.",
                None,
            ),
            check(
                "Title Tags",
                Pass,
                "Each page has a unique, descriptive title.",
                "No action needed.",
                None,
            ),
            check(
                "Canonical URLs",
                Warn,
                "Paginated category pages have no canonical link.",
                "Add a canonical link to paginated pages.",
                Some(r#"<link rel="canonical" href="https://example.com/shoes">"#),
            ),
            check(
                "Robots.txt",
                Pass,
                "robots.txt is present and does not block important pages.",
                "No action needed.",
                None,
            ),
            check(
                "Structured Data",
                Warn,
                "Product pages carry no structured data.",
                "Add Product schema markup to enable rich results.",
                Some(r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Product","name":"Running Shoe"}</script>"#),
            ),
        ],
    }
}

pub fn sample_suites() -> Vec<TestSuite> {
    vec![
        TestSuite {
            id: LOGIN_SUITE_ID.to_string(),
            title: "Successful User Login".to_string(),
            target_url: "https://example-shop.com/login".to_string(),
            steps: vec![
                AuthoredStep::new(TestAction::Navigate, "Navigate to the login page"),
                AuthoredStep::new(
                    TestAction::Type,
                    r#"Type "testuser@example.com" into the email field"#,
                ),
                AuthoredStep::new(
                    TestAction::Type,
                    r#"Type "password123" into the password field"#,
                ),
                AuthoredStep::new(TestAction::Click, r#"Click the "Sign In" button"#),
                AuthoredStep::new(
                    TestAction::VerifyUrl,
                    r#"Verify the URL is now "https://example-shop.com/dashboard""#,
                ),
                AuthoredStep::new(
                    TestAction::VerifyText,
                    r#"Verify the text "Welcome, Test User!" is visible"#,
                ),
            ],
        },
        TestSuite {
            id: COUPON_SUITE_ID.to_string(),
            title: "Failed Checkout with Invalid Coupon".to_string(),
            target_url: "https://example-shop.com/cart".to_string(),
            steps: vec![
                AuthoredStep::new(TestAction::Navigate, "Navigate to the shopping cart page"),
                AuthoredStep::new(
                    TestAction::VerifyVisible,
                    "Verify the checkout button is visible",
                ),
                AuthoredStep::new(
                    TestAction::Type,
                    r#"Type "INVALIDCODE" into the coupon code field"#,
                ),
                AuthoredStep::new(TestAction::Click, r#"Click the "Apply Coupon" button"#),
                AuthoredStep::new(
                    TestAction::VerifyText,
                    r#"Verify the error message "Invalid coupon code" is visible"#,
                ),
            ],
        },
    ]
}

fn executed(action: TestAction, description: &str, status: StepStatus, result: &str) -> TestStep {
    TestStep {
        action,
        description: description.to_string(),
        status: Some(status),
        result: Some(result.to_string()),
        screenshot_prompt: None,
        screenshot_url: None,
    }
}

/// Canned run for a sample suite, timestamped now. `None` for any other id.
pub fn canned_run(suite_id: &str) -> Option<TestRunResult> {
    if !suite_id.starts_with(CANNED_PREFIX) {
        return None;
    }
    use StepStatus::{Fail, Pass};
    use TestAction::*;

    let completed_at = Utc::now().to_rfc3339();
    match suite_id {
        LOGIN_SUITE_ID => Some(TestRunResult {
            id: "mock-run-1".to_string(),
            test_suite_id: LOGIN_SUITE_ID.to_string(),
            title: "Successful User Login".to_string(),
            target_url: "https://example-shop.com/login".to_string(),
            summary: "The user logged in and was redirected to the dashboard. All verification steps passed.".to_string(),
            status: Pass,
            completed_at,
            steps: vec![
                executed(Navigate, "Navigate to https://example-shop.com/login", Pass, "Opened the login page."),
                executed(Type, r#"Type "testuser@example.com" into input#email"#, Pass, "Typed into the email field."),
                executed(Type, r#"Type "•••••••••" into input#password"#, Pass, "Typed into the password field."),
                executed(Click, r#"Click the "Sign In" button#login-btn"#, Pass, "Clicked the sign-in button."),
                executed(VerifyUrl, r#"Verify the URL is now "https://example-shop.com/dashboard""#, Pass, "The URL changed to the dashboard."),
                executed(VerifyText, r#"Verify the text "Welcome, Test User!" is visible in the h1"#, Pass, "The welcome message was found."),
            ],
        }),
        COUPON_SUITE_ID => {
            let mut failed = executed(
                VerifyText,
                r#"Verify the error message "Invalid coupon code" is visible"#,
                Fail,
                r#"The expected message was not found; a generic "An error occurred" message was shown instead."#,
            );
            failed.screenshot_prompt = Some(
                r#"A checkout page with a coupon code field containing "INVALIDCODE". Below it, a red error box reads "An error occurred" instead of "Invalid coupon code"."#
                    .to_string(),
            );
            failed.screenshot_url = Some(
                "https://placehold.co/1280x720/1f2937/ef4444/png?text=Error!%0A%0AAn+error+occurred"
                    .to_string(),
            );

            Some(TestRunResult {
                id: "mock-run-2".to_string(),
                test_suite_id: COUPON_SUITE_ID.to_string(),
                title: "Failed Checkout with Invalid Coupon".to_string(),
                target_url: "https://example-shop.com/cart".to_string(),
                summary: "The run failed because the invalid-coupon message was not shown; a generic error appeared instead.".to_string(),
                status: Fail,
                completed_at,
                steps: vec![
                    executed(Navigate, "Navigate to https://example-shop.com/cart", Pass, "Opened the shopping cart."),
                    executed(VerifyVisible, "Verify the checkout button#checkout is visible", Pass, "The checkout button was visible and enabled."),
                    executed(Type, r#"Type "INVALIDCODE" into input#coupon-code"#, Pass, "Typed into the coupon field."),
                    executed(Click, r#"Click the "Apply Coupon" button"#, Pass, "Clicked the apply button."),
                    failed,
                ],
            })
        }
        _ => None,
    }
}
