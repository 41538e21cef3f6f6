//! Events that drive the chat coordinator

use crate::transcript::MessageId;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User actions
    Submit {
        text: String,
    },
    SelectSuggestion {
        text: String,
    },
    SelectQuizOption {
        message_id: MessageId,
        option: String,
    },
    Retry {
        text: String,
    },

    // Backend events
    BackendReply {
        text: String,
    },
    BackendFailed {
        failure: BackendFailure,
    },

    // Deferred quiz pacing
    QuizTick {
        generation: u64,
    },
}

impl Event {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Event::Submit { .. } => "submit",
            Event::SelectSuggestion { .. } => "select_suggestion",
            Event::SelectQuizOption { .. } => "select_quiz_option",
            Event::Retry { .. } => "retry",
            Event::BackendReply { .. } => "backend_reply",
            Event::BackendFailed { .. } => "backend_failed",
            Event::QuizTick { .. } => "quiz_tick",
        }
    }
}

/// A failed backend call as seen by the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
    /// Provider-supplied reason, if any
    pub message: Option<String>,
    /// Whether resending the same utterance can succeed
    pub retryable: bool,
}

impl BackendFailure {
    pub fn recoverable(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            retryable: true,
        }
    }

    /// Failure with no usable reason, rendered with the generic fallback
    pub fn opaque() -> Self {
        Self {
            message: None,
            retryable: true,
        }
    }

    /// The backend session was never created; resending cannot help
    pub fn uninitialized() -> Self {
        Self {
            message: Some("Chat session not initialized.".to_string()),
            retryable: false,
        }
    }
}
