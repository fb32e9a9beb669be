//! Fake text generator for tests.
//!
//! Returns a scripted reply (or a scripted failure) and records every request
//! so tests can assert on prompts and token budgets without network access.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationRequest, LlmError, TextGenerator};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug)]
pub struct FakeGenerator {
    reply: Result<String, (u16, String)>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Err((status, message.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        });

        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
