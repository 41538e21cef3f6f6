//! Chat state types

use crate::content::{QuizQuestion, QUIZ_QUESTIONS};
use crate::faq::FaqSession;
use crate::quiz::QuizSession;
use crate::transcript::{Message, NewMessage, Transcript};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Suggestion that re-enters the FAQ from free-form chat
pub const VIEW_FAQS_LABEL: &str = "View FAQs";

const GREETING: &str = "Hello! I'm the Antibiotic Steward, an AI assistant here to help you learn about Antimicrobial Resistance (AMR). How can I help you today? \n\nType 'quiz' to test your knowledge about the One Health Initiative, or 'faq' to see common questions.\n\nPlease remember, I cannot give medical advice. Always consult a healthcare professional for health concerns.";

const GREETING_SUGGESTIONS: [&str; 3] = [
    "What is AMR?",
    "How do bacteria become resistant?",
    VIEW_FAQS_LABEL,
];

// ============================================================================
// Mode
// ============================================================================

/// Interaction mode gating where user actions are routed
///
/// One tagged value, so quiz and FAQ can never be active together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    FreeForm,
    Quiz(QuizSession),
    Faq(FaqSession),
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::FreeForm => ModeKind::FreeForm,
            Mode::Quiz(_) => ModeKind::Quiz,
            Mode::Faq(_) => ModeKind::Faq,
        }
    }
}

/// Data-free view of [`Mode`] for the rendering surface and error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    FreeForm,
    Quiz,
    Faq,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModeKind::FreeForm => "free-form chat",
            ModeKind::Quiz => "the quiz",
            ModeKind::Faq => "the FAQ",
        })
    }
}

// ============================================================================
// Chat State
// ============================================================================

/// The backend call currently outstanding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub utterance: String,
}

/// Everything the coordinator owns. Replaced wholesale by each transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    pub transcript: Transcript,
    pub mode: Mode,
    /// In-flight flag; carries the utterance so a failure can offer a retry
    pub in_flight: Option<PendingRequest>,
    /// Generation of the most recently started quiz session
    pub quiz_generation: u64,
}

impl ChatState {
    /// Fresh session opening with the persona greeting and starter chips
    pub fn greeted() -> Self {
        let mut state = Self::default();
        state
            .transcript
            .push(NewMessage::bot(GREETING).with_suggestions(GREETING_SUGGESTIONS));
        state
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn view(&self) -> ChatView {
        let mode = self.mode.kind();
        let in_flight = self.is_in_flight();
        ChatView {
            messages: self.transcript.messages().to_vec(),
            in_flight,
            mode,
            input_enabled: !in_flight && mode == ModeKind::FreeForm,
        }
    }
}

/// Snapshot exposed to the rendering surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatView {
    pub messages: Vec<Message>,
    pub in_flight: bool,
    pub mode: ModeKind,
    /// Whether the free-form input box should accept text
    pub input_enabled: bool,
}

// ============================================================================
// Context
// ============================================================================

/// Delays between staged quiz messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizPacing {
    /// Intro message to first question
    pub intro: Duration,
    /// Answer to feedback
    pub feedback: Duration,
    /// Feedback to next question or summary
    pub advance: Duration,
}

impl QuizPacing {
    pub const fn immediate() -> Self {
        Self {
            intro: Duration::ZERO,
            feedback: Duration::ZERO,
            advance: Duration::ZERO,
        }
    }

    /// Scale the default pacing so that `unit` replaces the 500ms base step
    pub fn from_unit(unit: Duration) -> Self {
        Self {
            intro: unit,
            feedback: unit,
            advance: unit * 12 / 5,
        }
    }
}

impl Default for QuizPacing {
    fn default() -> Self {
        Self {
            intro: Duration::from_millis(500),
            feedback: Duration::from_millis(500),
            advance: Duration::from_millis(1200),
        }
    }
}

/// Immutable configuration for a chat session
#[derive(Debug, Clone)]
pub struct ChatContext {
    pub pacing: QuizPacing,
    pub quiz_bank: &'static [QuizQuestion],
}

impl ChatContext {
    pub fn new(pacing: QuizPacing) -> Self {
        Self {
            pacing,
            quiz_bank: QUIZ_QUESTIONS,
        }
    }

    #[cfg(test)]
    pub fn with_quiz_bank(mut self, bank: &'static [QuizQuestion]) -> Self {
        self.quiz_bank = bank;
        self
    }
}

impl Default for ChatContext {
    fn default() -> Self {
        Self::new(QuizPacing::default())
    }
}
