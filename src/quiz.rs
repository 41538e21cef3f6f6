//! Quiz engine
//!
//! Sequencing: `Intro -> Asking(i) -> Feedback(i) -> Advancing(i) -> Asking(i+1)
//! -> ... -> complete`. Every phase except `Asking` waits on a deferred tick
//! scheduled by the coordinator; `Asking` waits on the user.
//!
//! The engine never owns messages. It appends to and locks entries of the
//! coordinator's [`Transcript`] for the duration of a call.

use crate::content::QuizQuestion;
use crate::transcript::{LockRefusal, MessageId, NewMessage, QuizPrompt, Transcript};
use serde::Serialize;

/// Chip attached to the completion summary
pub const START_OVER_LABEL: &str = "Start Over";

const INTRO_TEXT: &str = "Great! Let's begin the quiz on the One Health Initiative.";

/// Where a live quiz session is in its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuizPhase {
    /// Intro shown, first question pending
    Intro,
    /// Current question shown, waiting for an answer
    Asking,
    /// Answer locked, feedback pending
    Feedback { correct: bool },
    /// Feedback shown, next question or summary pending
    Advancing,
}

/// A live quiz session; dropped when the quiz ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizSession {
    /// Distinguishes this session from earlier ones so stale deferred steps
    /// can be discarded
    pub generation: u64,
    pub question_index: usize,
    pub score: usize,
    pub phase: QuizPhase,
}

/// Result of running one deferred quiz step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAdvance {
    /// Waiting on the user
    AwaitingAnswer(QuizSession),
    /// Another deferred step must be scheduled
    StepPending(QuizSession),
    /// Summary shown, session over
    Finished { score: usize, total: usize },
}

/// Why an answer was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QuizRefusal {
    #[error("message is not a question of the current quiz session")]
    StaleQuestion,
    #[error("the current question is not accepting answers")]
    NotAsking,
    #[error("question already answered")]
    Locked,
    #[error("no such question message")]
    NoSuchQuestion,
    #[error("option is not one of the question's choices")]
    UnknownOption,
    #[error("no deferred step is pending")]
    NothingPending,
}

impl From<LockRefusal> for QuizRefusal {
    fn from(refusal: LockRefusal) -> Self {
        match refusal {
            LockRefusal::NotFound | LockRefusal::NotAQuestion => Self::NoSuchQuestion,
            LockRefusal::AlreadyLocked => Self::Locked,
            LockRefusal::UnknownOption => Self::UnknownOption,
        }
    }
}

/// Begin a fresh session, discarding nothing itself; the caller replaces any
/// previous session with the returned one
pub fn start(transcript: &mut Transcript, generation: u64) -> QuizSession {
    transcript.push(NewMessage::bot(INTRO_TEXT));
    QuizSession {
        generation,
        question_index: 0,
        score: 0,
        phase: QuizPhase::Intro,
    }
}

/// Record an answer to the question carried by `message_id`.
///
/// Correctness is checked against the answer key stored on the message
/// itself. The transcript lock is the authoritative guard against double
/// answers, regardless of phase or timing.
pub fn answer(
    session: QuizSession,
    transcript: &mut Transcript,
    message_id: MessageId,
    option: &str,
) -> Result<QuizSession, QuizRefusal> {
    let prompt = transcript
        .get(message_id)
        .and_then(|m| m.quiz.as_ref())
        .ok_or(QuizRefusal::NoSuchQuestion)?;

    if prompt.is_locked() {
        return Err(QuizRefusal::Locked);
    }
    if prompt.generation != session.generation || prompt.question_index != session.question_index {
        return Err(QuizRefusal::StaleQuestion);
    }
    if session.phase != QuizPhase::Asking {
        return Err(QuizRefusal::NotAsking);
    }

    let locked = transcript.lock_answer(message_id, option)?;
    let correct = locked.correct_answer == option;

    tracing::debug!(
        generation = session.generation,
        question = session.question_index,
        correct,
        "Quiz answer locked"
    );

    Ok(QuizSession {
        score: session.score + usize::from(correct),
        phase: QuizPhase::Feedback { correct },
        ..session
    })
}

/// Run the deferred step the session is waiting on
pub fn advance(
    session: QuizSession,
    transcript: &mut Transcript,
    bank: &[QuizQuestion],
) -> Result<QuizAdvance, QuizRefusal> {
    match session.phase {
        QuizPhase::Asking => Err(QuizRefusal::NothingPending),

        QuizPhase::Intro => Ok(show_question_or_finish(session, transcript, bank)),

        QuizPhase::Feedback { correct } => {
            if let Some(question) = bank.get(session.question_index) {
                transcript.push(NewMessage::bot(feedback_text(question, correct)));
            }
            Ok(QuizAdvance::StepPending(QuizSession {
                phase: QuizPhase::Advancing,
                ..session
            }))
        }

        QuizPhase::Advancing => {
            let next = QuizSession {
                question_index: session.question_index + 1,
                ..session
            };
            Ok(show_question_or_finish(next, transcript, bank))
        }
    }
}

fn show_question_or_finish(
    session: QuizSession,
    transcript: &mut Transcript,
    bank: &[QuizQuestion],
) -> QuizAdvance {
    let Some(question) = bank.get(session.question_index) else {
        let total = bank.len();
        transcript.push(
            NewMessage::bot(summary_text(session.score, total)).with_suggestions([START_OVER_LABEL]),
        );
        tracing::info!(score = session.score, total, "Quiz complete");
        return QuizAdvance::Finished {
            score: session.score,
            total,
        };
    };

    transcript.push(question_message(question, session.question_index, session.generation));
    QuizAdvance::AwaitingAnswer(QuizSession {
        phase: QuizPhase::Asking,
        ..session
    })
}

fn question_message(question: &QuizQuestion, index: usize, generation: u64) -> NewMessage {
    NewMessage::bot(format!("Question {}: {}", index + 1, question.question)).with_quiz(QuizPrompt {
        options: question.options.iter().map(ToString::to_string).collect(),
        correct_answer: question.correct_answer.to_string(),
        selected_answer: None,
        generation,
        question_index: index,
    })
}

fn feedback_text(question: &QuizQuestion, correct: bool) -> String {
    if correct {
        format!("Correct!\n\n{}", question.explanation)
    } else {
        format!(
            "Not quite. The correct answer is: {}\n\n{}",
            question.correct_answer, question.explanation
        )
    }
}

/// Tiered completion summary
pub fn summary_text(score: usize, total: usize) -> String {
    let tier = if score == total {
        "Excellent work! You have a great understanding of the One Health concept."
    } else if score * 2 >= total {
        "Good job! You're well on your way to becoming an Antibiotic Steward."
    } else {
        "Thanks for playing! Keep learning about AMR and responsible antibiotic use."
    };
    format!("Quiz complete! You scored {score} out of {total}. {tier}")
}
