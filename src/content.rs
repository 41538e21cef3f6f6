//! Static content: quiz question bank and FAQ topic bank
//!
//! Immutable data with lookup helpers only. The engines in `quiz` and `faq`
//! read from here; nothing here ever mutates.

mod faq_bank;
mod quiz_bank;

pub use faq_bank::FAQ_TOPICS;
pub use quiz_bank::QUIZ_QUESTIONS;

/// A multiple-choice question with exactly four options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: &'static str,
    pub options: [&'static str; 4],
    /// Must equal one of `options` exactly
    pub correct_answer: &'static str,
    pub explanation: &'static str,
}

/// A question/answer pair inside an FAQ topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

/// An FAQ topic, keyed by its unique `topic` label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqTopic {
    pub topic: &'static str,
    pub description: &'static str,
    pub questions: &'static [FaqItem],
}

impl FaqTopic {
    /// Find a question by its exact label within this topic
    pub fn answer_for(&self, question: &str) -> Option<&'static str> {
        self.questions
            .iter()
            .find(|item| item.question == question)
            .map(|item| item.answer)
    }

    pub fn question_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.questions.iter().map(|item| item.question)
    }
}

/// Look up a topic by its exact label
pub fn find_topic(topic: &str) -> Option<&'static FaqTopic> {
    FAQ_TOPICS.iter().find(|t| t.topic == topic)
}

/// All topic labels in stored order
pub fn topic_labels() -> impl Iterator<Item = &'static str> {
    FAQ_TOPICS.iter().map(|t| t.topic)
}
