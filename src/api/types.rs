//! API request and response types

use crate::transcript::MessageId;
use serde::{Deserialize, Serialize};

/// Body of the submit, suggestion and retry actions
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Answer to a quiz question
#[derive(Debug, Deserialize)]
pub struct QuizAnswerRequest {
    pub message_id: MessageId,
    pub option: String,
}

/// Response for any queued action
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
