//! Pure state transition function
//!
//! Routes every user action to exactly one of free-form send, quiz engine or
//! FAQ engine, and folds backend results and deferred quiz steps back into
//! the transcript. Rejected actions leave the state untouched.

use super::event::BackendFailure;
use super::state::{ChatContext, ChatState, Mode, ModeKind, PendingRequest, VIEW_FAQS_LABEL};
use super::{Effect, Event};
use crate::faq::{self, FaqOutcome};
use crate::quiz::{self, QuizAdvance, QuizRefusal, START_OVER_LABEL};
use crate::transcript::NewMessage;
use thiserror::Error;

const GENERIC_FAILURE_TEXT: &str = "Sorry, an unexpected error occurred. Please try again.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Reasons an event is dropped without changing state
///
/// None of these reach the user as an error; the runtime only logs them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Input is blank")]
    BlankInput,
    #[error("A reply is already in flight")]
    Busy,
    #[error("Free-form actions are disabled during {0}")]
    ModeLocked(ModeKind),
    #[error("No quiz is active")]
    NoActiveQuiz,
    #[error("Quiz answer rejected: {0}")]
    QuizAnswer(QuizRefusal),
    #[error("Stale quiz step for generation {0}")]
    StaleQuizStep(u64),
    #[error("FAQ selection not recognized: {0}")]
    UnknownFaqSelection(String),
    #[error("No failed message to retry")]
    NothingToRetry,
    #[error("No backend request is pending")]
    NoPendingRequest,
}

/// Pure transition function
///
/// Given the same state, context and event it always produces the same
/// result. All I/O is described by the returned effects.
pub fn transition(
    state: &ChatState,
    context: &ChatContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::Submit { text } => submit(state, context, text),
        Event::SelectSuggestion { text } => select_suggestion(state, context, &text),
        Event::SelectQuizOption { message_id, option } => {
            let Mode::Quiz(session) = state.mode else {
                return Err(TransitionError::NoActiveQuiz);
            };
            let mut next = state.clone();
            let session = quiz::answer(session, &mut next.transcript, message_id, &option)
                .map_err(TransitionError::QuizAnswer)?;
            next.mode = Mode::Quiz(session);
            Ok(TransitionResult::new(next)
                .with_effect(Effect::quiz_tick(context.pacing.feedback, session.generation)))
        }
        Event::Retry { text } => retry(state, text),
        Event::BackendReply { text } => {
            let mut next = state.clone();
            next.in_flight
                .take()
                .ok_or(TransitionError::NoPendingRequest)?;
            next.transcript.push(NewMessage::bot(text));
            Ok(TransitionResult::new(next))
        }
        Event::BackendFailed { failure } => {
            let mut next = state.clone();
            let pending = next
                .in_flight
                .take()
                .ok_or(TransitionError::NoPendingRequest)?;
            let retry_text = failure.retryable.then_some(pending.utterance);
            next.transcript
                .push(NewMessage::error(failure_text(&failure), retry_text));
            Ok(TransitionResult::new(next))
        }
        Event::QuizTick { generation } => quiz_tick(state, context, generation),
    }
}

// ============================================================================
// User actions
// ============================================================================

fn submit(
    state: &ChatState,
    context: &ChatContext,
    text: String,
) -> Result<TransitionResult, TransitionError> {
    let command = text.trim();
    if command.is_empty() {
        return Err(TransitionError::BlankInput);
    }
    ensure_idle(state)?;
    ensure_free_form(state)?;

    let mut next = state.clone();
    if command.eq_ignore_ascii_case("quiz") {
        let effect = start_quiz(&mut next, context);
        return Ok(TransitionResult::new(next).with_effect(effect));
    }
    if command.eq_ignore_ascii_case("faq") {
        start_faq(&mut next);
        return Ok(TransitionResult::new(next));
    }

    next.transcript.push(NewMessage::user(text.clone()));
    let effect = begin_request(&mut next, text);
    Ok(TransitionResult::new(next).with_effect(effect))
}

fn select_suggestion(
    state: &ChatState,
    context: &ChatContext,
    text: &str,
) -> Result<TransitionResult, TransitionError> {
    ensure_idle(state)?;

    let mut next = state.clone();
    next.transcript.clear_suggestions();

    match state.mode {
        Mode::Faq(session) => match faq::select(session, &mut next.transcript, text) {
            FaqOutcome::Continue(session) => {
                next.mode = Mode::Faq(session);
                Ok(TransitionResult::new(next))
            }
            FaqOutcome::Exited => {
                next.mode = Mode::FreeForm;
                Ok(TransitionResult::new(next))
            }
            // `next` is dropped so the existing chips stay usable
            FaqOutcome::Ignored => Err(TransitionError::UnknownFaqSelection(text.to_string())),
        },
        Mode::Quiz(_) => Err(TransitionError::ModeLocked(ModeKind::Quiz)),
        Mode::FreeForm => match text {
            START_OVER_LABEL => {
                let effect = start_quiz(&mut next, context);
                Ok(TransitionResult::new(next).with_effect(effect))
            }
            VIEW_FAQS_LABEL => {
                start_faq(&mut next);
                Ok(TransitionResult::new(next))
            }
            _ => {
                next.transcript.push(NewMessage::user(text));
                let effect = begin_request(&mut next, text.to_string());
                Ok(TransitionResult::new(next).with_effect(effect))
            }
        },
    }
}

fn retry(state: &ChatState, text: String) -> Result<TransitionResult, TransitionError> {
    ensure_idle(state)?;
    ensure_free_form(state)?;
    if !state.transcript.has_retryable_error(&text) {
        return Err(TransitionError::NothingToRetry);
    }

    let mut next = state.clone();
    let effect = begin_request(&mut next, text);
    Ok(TransitionResult::new(next).with_effect(effect))
}

// ============================================================================
// Quiz pacing
// ============================================================================

fn quiz_tick(
    state: &ChatState,
    context: &ChatContext,
    generation: u64,
) -> Result<TransitionResult, TransitionError> {
    let session = match state.mode {
        Mode::Quiz(session) if session.generation == generation => session,
        _ => return Err(TransitionError::StaleQuizStep(generation)),
    };

    let mut next = state.clone();
    let advance = quiz::advance(session, &mut next.transcript, context.quiz_bank)
        .map_err(|_| TransitionError::StaleQuizStep(generation))?;

    match advance {
        QuizAdvance::AwaitingAnswer(session) => {
            next.mode = Mode::Quiz(session);
            Ok(TransitionResult::new(next))
        }
        QuizAdvance::StepPending(session) => {
            next.mode = Mode::Quiz(session);
            Ok(TransitionResult::new(next)
                .with_effect(Effect::quiz_tick(context.pacing.advance, generation)))
        }
        QuizAdvance::Finished { score, total } => {
            tracing::debug!(generation, score, total, "Quiz session closed");
            next.mode = Mode::FreeForm;
            Ok(TransitionResult::new(next))
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn ensure_idle(state: &ChatState) -> Result<(), TransitionError> {
    if state.is_in_flight() {
        Err(TransitionError::Busy)
    } else {
        Ok(())
    }
}

fn ensure_free_form(state: &ChatState) -> Result<(), TransitionError> {
    match state.mode.kind() {
        ModeKind::FreeForm => Ok(()),
        kind => Err(TransitionError::ModeLocked(kind)),
    }
}

/// Start (or restart) the quiz, replacing whatever mode was active.
/// Chips and retry buttons left over from before the quiz are cleared since
/// they cannot be used while it runs.
fn start_quiz(next: &mut ChatState, context: &ChatContext) -> Effect {
    next.transcript.clear_suggestions();
    next.transcript.disable_retries();
    next.quiz_generation += 1;
    let session = quiz::start(&mut next.transcript, next.quiz_generation);
    next.mode = Mode::Quiz(session);
    tracing::info!(generation = session.generation, "Quiz started");
    Effect::quiz_tick(context.pacing.intro, session.generation)
}

/// Enter the FAQ. Earlier chips and retry buttons are cleared so only FAQ
/// navigation is offered.
fn start_faq(next: &mut ChatState) {
    next.transcript.clear_suggestions();
    next.transcript.disable_retries();
    next.mode = Mode::Faq(faq::start(&mut next.transcript));
    tracing::info!("FAQ started");
}

/// Drop stale failures and mark the backend call as in flight
fn begin_request(next: &mut ChatState, utterance: String) -> Effect {
    let removed = next.transcript.remove_errors();
    if removed > 0 {
        tracing::debug!(removed, "Cleared stale error messages");
    }
    next.in_flight = Some(PendingRequest {
        utterance: utterance.clone(),
    });
    Effect::request_reply(utterance)
}

fn failure_text(failure: &BackendFailure) -> String {
    match failure.message.as_deref() {
        Some(reason) if !reason.trim().is_empty() => format!(
            "I couldn't get a response. Error: {reason}. Please check your connection and try again."
        ),
        _ => GENERIC_FAILURE_TEXT.to_string(),
    }
}
