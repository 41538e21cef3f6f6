//! Trait abstractions for runtime I/O
//!
//! The executor only ever talks to a [`Backend`], so tests can swap in mocks.

use crate::llm::{LlmError, LlmMessage, LlmRequest, LlmService, Sampling};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Conversational backend: one utterance in, generated text out
#[async_trait]
pub trait Backend: Send + Sync {
    async fn send(&self, utterance: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Arc<T> {
    async fn send(&self, utterance: &str) -> Result<String, LlmError> {
        (**self).send(utterance).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Stateful chat session over an [`LlmService`]
///
/// Carries the system instruction and accumulated dialogue. A user/model
/// turn pair is recorded only once a reply has arrived, so a failed
/// utterance can be resent without duplicating history.
pub struct LlmChatSession {
    service: Arc<dyn LlmService>,
    system: String,
    sampling: Sampling,
    history: Mutex<Vec<LlmMessage>>,
}

impl LlmChatSession {
    pub fn new(service: Arc<dyn LlmService>, system: impl Into<String>) -> Self {
        Self {
            service,
            system: system.into(),
            sampling: Sampling::default(),
            history: Mutex::new(Vec::new()),
        }
    }

    #[cfg(test)]
    pub async fn history(&self) -> Vec<LlmMessage> {
        self.history.lock().await.clone()
    }
}

#[async_trait]
impl Backend for LlmChatSession {
    async fn send(&self, utterance: &str) -> Result<String, LlmError> {
        let mut messages = self.history.lock().await.clone();
        messages.push(LlmMessage::user(utterance));

        let request = LlmRequest {
            system: Some(self.system.clone()),
            messages,
            sampling: self.sampling,
        };
        let response = self.service.complete(&request).await?;

        let mut history = self.history.lock().await;
        history.push(LlmMessage::user(utterance));
        history.push(LlmMessage::assistant(response.text.clone()));
        Ok(response.text)
    }
}

/// Stand-in used when no session could be created at startup
pub struct UninitializedBackend;

#[async_trait]
impl Backend for UninitializedBackend {
    async fn send(&self, _utterance: &str) -> Result<String, LlmError> {
        Err(LlmError::uninitialized())
    }
}
