#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use webcheck::client::{
    GeneratedImage, GenerationBackend, GenerationClient, ImageRequest, ModelSelection, TextRequest,
};
use webcheck::error::BackendError;
use webcheck::model::{AuthoredStep, TestAction, TestSuite};

/// How the stub answers image calls.
#[derive(Clone)]
pub enum ImageReply {
    Fail(String),
    Succeed { mime_type: Option<String>, bytes: String },
    Empty,
}

/// In-memory backend that records every call it receives.
pub struct StubBackend {
    text_replies: Mutex<VecDeque<Result<String, String>>>,
    /// Answered in call order; `image_reply` once empty.
    image_replies: Mutex<VecDeque<ImageReply>>,
    image_reply: ImageReply,
    pub text_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
    pub text_requests: Mutex<Vec<TextRequest>>,
    pub image_requests: Mutex<Vec<ImageRequest>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            text_replies: Mutex::new(VecDeque::new()),
            image_replies: Mutex::new(VecDeque::new()),
            image_reply: ImageReply::Fail("image quota exhausted".to_string()),
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            text_requests: Mutex::new(Vec::new()),
            image_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_text(self, reply: impl Into<String>) -> Self {
        self.text_replies.lock().unwrap().push_back(Ok(reply.into()));
        self
    }

    pub fn with_text_error(self, message: impl Into<String>) -> Self {
        self.text_replies
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
        self
    }

    pub fn with_images(mut self, reply: ImageReply) -> Self {
        self.image_reply = reply;
        self
    }

    /// Queue a reply for the next image call.
    pub fn then_image(self, reply: ImageReply) -> Self {
        self.image_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn text_call_count(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn image_call_count(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn last_text_request(&self) -> TextRequest {
        self.text_requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no text request recorded")
    }
}

#[async_trait]
impl GenerationBackend for StubBackend {
    async fn generate_text(&self, request: TextRequest) -> Result<String, BackendError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.text_requests.lock().unwrap().push(request);
        match self.text_replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(BackendError(message)),
            None => Err(BackendError("no stubbed reply".to_string())),
        }
    }

    async fn generate_images(
        &self,
        request: ImageRequest,
    ) -> Result<Vec<GeneratedImage>, BackendError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.image_requests.lock().unwrap().push(request);
        let reply = self
            .image_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.image_reply.clone());
        match reply {
            ImageReply::Fail(message) => Err(BackendError(message)),
            ImageReply::Succeed { mime_type, bytes } => Ok(vec![GeneratedImage {
                mime_type,
                bytes_base64: bytes,
            }]),
            ImageReply::Empty => Ok(vec![]),
        }
    }
}

pub fn models() -> ModelSelection {
    ModelSelection {
        text_model: "text-model".to_string(),
        image_model: "image-model".to_string(),
    }
}

pub fn client(backend: Arc<StubBackend>) -> GenerationClient {
    GenerationClient::new(backend, models())
}

pub const SHORT_DELAY: Duration = Duration::from_millis(10);

/// A user-authored suite (not a canned sample).
pub fn checkout_suite() -> TestSuite {
    TestSuite {
        id: "suite-checkout".to_string(),
        title: "Checkout".to_string(),
        target_url: "https://shop.test/cart".to_string(),
        steps: vec![
            AuthoredStep::new(TestAction::Navigate, "Open the cart"),
            AuthoredStep::new(TestAction::Click, "Click checkout"),
            AuthoredStep::new(TestAction::VerifyText, "Verify the order total is shown"),
        ],
    }
}

/// Simulation reply for `checkout_suite`: steps 1-2 pass, step 3 fails with a
/// screenshot prompt.
pub fn checkout_reply_with_failure() -> String {
    serde_json::json!({
        "title": "Something else",
        "targetUrl": "https://elsewhere.test",
        "summary": "The order total was missing.",
        "status": "FAIL",
        "steps": [
            {"action": "NAVIGATE", "description": "Open the cart", "status": "PASS",
             "result": "Cart opened.", "screenshotPrompt": null},
            {"action": "CLICK", "description": "Click checkout", "status": "PASS",
             "result": "Clicked.", "screenshotPrompt": "should be dropped"},
            {"action": "VERIFY_TEXT", "description": "Verify the order total is shown",
             "status": "FAIL", "result": "No total found.",
             "screenshotPrompt": "A checkout page with an empty total field"}
        ]
    })
    .to_string()
}

/// Simulation reply for `checkout_suite` with every step failing: steps 2
/// and 3 carry screenshot prompts, step 1 an empty one.
pub fn checkout_reply_two_failures() -> String {
    serde_json::json!({
        "title": "Checkout",
        "targetUrl": "https://shop.test/cart",
        "summary": "Nothing worked.",
        "status": "FAIL",
        "steps": [
            {"action": "NAVIGATE", "description": "Open the cart", "status": "FAIL",
             "result": "Timed out.", "screenshotPrompt": ""},
            {"action": "CLICK", "description": "Click checkout", "status": "FAIL",
             "result": "Button disabled.", "screenshotPrompt": "A greyed-out checkout button"},
            {"action": "VERIFY_TEXT", "description": "Verify the order total is shown",
             "status": "FAIL", "result": "No total found.",
             "screenshotPrompt": "A checkout page with an empty total field"}
        ]
    })
    .to_string()
}

pub fn checkout_reply_all_pass() -> String {
    serde_json::json!({
        "title": "Checkout",
        "targetUrl": "https://shop.test/cart",
        "summary": "All good.",
        "status": "PASS",
        "steps": [
            {"action": "NAVIGATE", "description": "Open the cart", "status": "PASS",
             "result": "ok", "screenshotPrompt": null},
            {"action": "CLICK", "description": "Click checkout", "status": "PASS",
             "result": "ok", "screenshotPrompt": null},
            {"action": "VERIFY_TEXT", "description": "Verify the order total is shown",
             "status": "PASS", "result": "ok", "screenshotPrompt": null}
        ]
    })
    .to_string()
}
