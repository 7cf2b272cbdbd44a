use super::{ChatService, ImageGenerationService};
use crate::models::ChatPayload;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted reply for mock providers. Errors are stored as data so each
/// call can construct a fresh [`Error`].
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    UpstreamError { status: u16, body: String },
}

impl Scripted {
    fn into_result(self) -> Result<String> {
        match self {
            Scripted::Reply(reply) => Ok(reply),
            Scripted::UpstreamError { status, body } => Err(Error::Upstream { status, body }),
        }
    }
}

/// Clones share state, so a test can keep a handle while the dispatcher
/// owns the boxed service.
#[derive(Clone)]
pub struct MockChatClient {
    responses: Arc<Mutex<Vec<Scripted>>>,
    call_count: Arc<Mutex<usize>>,
    last_payload: Arc<Mutex<Option<ChatPayload>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_payload: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Scripted::Reply(response.into()));
        self
    }

    pub fn with_upstream_error(self, status: u16, body: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(Scripted::UpstreamError {
            status,
            body: body.into(),
        });
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The payload from the most recent call, for asserting on routing.
    pub fn last_payload(&self) -> Option<ChatPayload> {
        self.last_payload.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete(&self, payload: ChatPayload) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        *self.last_payload.lock().unwrap() = Some(payload);

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("mock assistant reply".to_string())
        } else {
            let index = (*count - 1) % responses.len();
            responses[index].clone().into_result()
        }
    }
}

#[derive(Clone)]
pub struct MockImageClient {
    responses: Arc<Mutex<Vec<Scripted>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_url(self, url: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Scripted::Reply(url.into()));
        self
    }

    pub fn with_upstream_error(self, status: u16, body: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(Scripted::UpstreamError {
            status,
            body: body.into(),
        });
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("https://mock-images.example.com/generated.png".to_string())
        } else {
            let index = (*count - 1) % responses.len();
            responses[index].clone().into_result()
        }
    }
}
