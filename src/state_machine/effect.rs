//! Effects produced by state transitions

use std::time::Duration;

/// Effects to be executed by the runtime after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the utterance to the backend; the runtime answers with
    /// `BackendReply` or `BackendFailed`
    RequestReply { utterance: String },

    /// Fire a `QuizTick` for this session generation after `delay`
    ScheduleQuizTick { delay: Duration, generation: u64 },
}

impl Effect {
    pub fn request_reply(utterance: impl Into<String>) -> Self {
        Effect::RequestReply {
            utterance: utterance.into(),
        }
    }

    pub fn quiz_tick(delay: Duration, generation: u64) -> Self {
        Effect::ScheduleQuizTick { delay, generation }
    }
}
