//! Ordered message transcript shared by all conversation modes
//!
//! The transcript is append-mostly. The only in-place mutations are clearing
//! suggestion chips and locking a quiz answer; messages are only ever removed
//! when stale error messages are filtered before a backend call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Creation-order-unique message identifier
///
/// Minted from a per-transcript counter, so two messages appended within the
/// same clock tick still get distinct, ordered ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(u64);

impl MessageId {
    #[cfg(test)]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// Interactive multiple-choice payload of a quiz question message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizPrompt {
    /// Choices in their stored order
    pub options: Vec<String>,
    /// Lock-comparison key; never sent to the rendering surface
    #[serde(skip_serializing)]
    pub correct_answer: String,
    /// Set once, then immutable
    pub selected_answer: Option<String>,
    /// Quiz session generation this question belongs to
    #[serde(skip_serializing)]
    pub generation: u64,
    /// Zero-based index into the question bank
    pub question_index: usize,
}

impl QuizPrompt {
    pub fn is_locked(&self) -> bool {
        self.selected_answer.is_some()
    }
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub is_error: bool,
    /// Text to resend when the user retries a failed backend call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizPrompt>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl Message {
    #[cfg(test)]
    pub fn is_quiz_question(&self) -> bool {
        self.quiz.is_some()
    }
}

/// Content of a message before it is given an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub text: String,
    pub sender: Sender,
    pub is_error: bool,
    pub retry_text: Option<String>,
    pub quiz: Option<QuizPrompt>,
    pub suggestions: Vec<String>,
}

impl NewMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            is_error: false,
            retry_text: None,
            quiz: None,
            suggestions: Vec::new(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            ..Self::user(String::new())
        }
    }

    /// Error-flagged bot message; `retry_text` is `None` for failures that
    /// cannot be recovered by resending
    pub fn error(text: impl Into<String>, retry_text: Option<String>) -> Self {
        Self {
            is_error: true,
            retry_text,
            ..Self::bot(text)
        }
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_quiz(mut self, quiz: QuizPrompt) -> Self {
        self.quiz = Some(quiz);
        self
    }
}

/// Why a quiz answer could not be recorded on a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockRefusal {
    NotFound,
    NotAQuestion,
    AlreadyLocked,
    UnknownOption,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, minting its id
    pub fn push(&mut self, message: NewMessage) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            text: message.text,
            sender: message.sender,
            is_error: message.is_error,
            retry_text: message.retry_text,
            quiz: message.quiz,
            suggestions: message.suggestions,
        });
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Remove suggestion chips from every message
    pub fn clear_suggestions(&mut self) {
        for message in &mut self.messages {
            message.suggestions.clear();
        }
    }

    /// Drop all error-flagged messages; returns how many were removed
    pub fn remove_errors(&mut self) -> usize {
        let before = self.messages.len();
        self.messages.retain(|m| !m.is_error);
        before - self.messages.len()
    }

    /// Strip the retry payload from every error message, leaving the text
    pub fn disable_retries(&mut self) {
        for message in self.messages.iter_mut().filter(|m| m.is_error) {
            message.retry_text = None;
        }
    }

    pub fn has_retryable_error(&self, retry_text: &str) -> bool {
        self.messages
            .iter()
            .any(|m| m.is_error && m.retry_text.as_deref() == Some(retry_text))
    }

    /// Record `option` as the answer to a quiz question, returning the locked
    /// prompt. A question can only be answered once.
    pub fn lock_answer(&mut self, id: MessageId, option: &str) -> Result<&QuizPrompt, LockRefusal> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(LockRefusal::NotFound)?;
        let quiz = message.quiz.as_mut().ok_or(LockRefusal::NotAQuestion)?;
        if quiz.is_locked() {
            return Err(LockRefusal::AlreadyLocked);
        }
        if !quiz.options.iter().any(|o| o == option) {
            return Err(LockRefusal::UnknownOption);
        }
        quiz.selected_answer = Some(option.to_string());
        Ok(quiz)
    }
}
