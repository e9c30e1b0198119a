//! Deterministic scripted provider for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Choice, GenerationRequest, GenerationResponse, LlmProvider, Message, Usage};
use crate::error::LlmError;

/// A provider that replays a fixed queue of responses.
///
/// Each call pops the next queued string; once the queue is empty every
/// call returns the fallback text. Used to drive the session loop through
/// known decision sequences without a network.
pub struct ScriptedProvider {
    responses: Mutex<Vec<String>>,
    fallback: String,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<String>) -> Self {
        // Stored reversed so pop() yields them in order.
        let mut responses = responses;
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            fallback: String::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Sets the text returned after the scripted queue is exhausted.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// The request received at the given call index, if any.
    pub fn request_at(&self, index: usize) -> Option<GenerationRequest> {
        self.calls.lock().ok()?.get(index).cloned()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let content = {
            let mut responses = self
                .responses
                .lock()
                .map_err(|_| LlmError::RequestFailed("scripted provider poisoned".to_string()))?;
            responses.pop().unwrap_or_else(|| self.fallback.clone())
        };

        let index = {
            let mut calls = self
                .calls
                .lock()
                .map_err(|_| LlmError::RequestFailed("scripted provider poisoned".to_string()))?;
            calls.push(request);
            calls.len()
        };

        Ok(GenerationResponse {
            id: format!("scripted-{index}"),
            model: "scripted".to_string(),
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(content),
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::default(),
        })
    }
}
