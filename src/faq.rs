//! FAQ engine
//!
//! `TopicList <-> QuestionList(topic)`, with exit reachable from both. All
//! navigation happens through suggestion chips; selections never echo a user
//! message into the transcript.

use crate::content::{self, FaqTopic};
use crate::transcript::{NewMessage, Transcript};
use serde::Serialize;

pub const EXIT_LABEL: &str = "Exit FAQ";
pub const BACK_LABEL: &str = "⬅️ Back to topics";

const ENTRY_TEXT: &str = "You've entered the FAQ section.";
const TOPIC_LIST_TEXT: &str =
    "Here are our Frequently Asked Questions. Please select a topic to see the questions.";
const EXIT_TEXT: &str = "You've exited the FAQ section. How else can I help you?";

/// A live FAQ session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FaqSession {
    /// `None` while the topic list is showing
    pub current_topic: Option<&'static str>,
}

/// Result of a chip selection inside the FAQ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqOutcome {
    Continue(FaqSession),
    Exited,
    /// Selection matched nothing; the transcript is untouched
    Ignored,
}

pub fn start(transcript: &mut Transcript) -> FaqSession {
    transcript.push(NewMessage::bot(ENTRY_TEXT));
    show_topics(transcript)
}

/// Handle a chip selection. Matching is exact and follows a fixed priority:
/// exit, back, topic name, then a question of the current topic.
pub fn select(session: FaqSession, transcript: &mut Transcript, choice: &str) -> FaqOutcome {
    if choice == EXIT_LABEL {
        transcript.push(NewMessage::bot(EXIT_TEXT));
        return FaqOutcome::Exited;
    }

    if choice == BACK_LABEL {
        return FaqOutcome::Continue(show_topics(transcript));
    }

    if let Some(topic) = content::find_topic(choice) {
        show_questions(transcript, topic);
        return FaqOutcome::Continue(FaqSession {
            current_topic: Some(topic.topic),
        });
    }

    let answer = session
        .current_topic
        .and_then(content::find_topic)
        .and_then(|topic| topic.answer_for(choice));

    match answer {
        Some(answer) => {
            transcript.push(NewMessage::bot(answer).with_suggestions([BACK_LABEL, EXIT_LABEL]));
            FaqOutcome::Continue(session)
        }
        None => FaqOutcome::Ignored,
    }
}

fn show_topics(transcript: &mut Transcript) -> FaqSession {
    let chips = content::topic_labels().chain(std::iter::once(EXIT_LABEL));
    transcript.push(NewMessage::bot(TOPIC_LIST_TEXT).with_suggestions(chips));
    FaqSession::default()
}

fn show_questions(transcript: &mut Transcript, topic: &FaqTopic) {
    tracing::debug!(topic = topic.topic, description = topic.description, "FAQ topic opened");
    let chips = topic.question_labels().chain(std::iter::once(BACK_LABEL));
    transcript.push(
        NewMessage::bot(format!(
            "Great! Here are the questions for the topic: **{}**",
            topic.topic
        ))
        .with_suggestions(chips),
    );
}
