//! Mock implementations for testing
//!
//! These mocks enable runtime integration testing without real I/O.

use super::traits::*;
use super::{spawn, ChatHandle};
use crate::llm::LlmError;
use crate::state_machine::{ChatContext, ChatView, Event, QuizPacing};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Backend
// ============================================================================

/// Mock backend that returns queued replies
pub struct MockBackend {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    /// Record of every utterance sent
    pub utterances: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            utterances: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: LlmError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_utterances(&self) -> Vec<String> {
        self.utterances.lock().unwrap().clone()
    }

    fn next_reply(&self, utterance: &str) -> Result<String, LlmError> {
        self.utterances.lock().unwrap().push(utterance.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock reply queued")))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn send(&self, utterance: &str) -> Result<String, LlmError> {
        self.next_reply(utterance)
    }
}

// ============================================================================
// Delayed Mock Backend (for in-flight testing)
// ============================================================================

/// Mock backend that holds each reply until released
pub struct DelayedMockBackend {
    inner: MockBackend,
    release: Notify,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl DelayedMockBackend {
    pub fn new() -> Self {
        Self {
            inner: MockBackend::new(),
            release: Notify::new(),
            request_started: Arc::new(Notify::new()),
        }
    }

    pub fn queue_reply(&self, text: impl Into<String>) {
        self.inner.queue_reply(text);
    }

    /// Let the oldest held request complete
    pub fn release_one(&self) {
        self.release.notify_one();
    }

    pub fn recorded_utterances(&self) -> Vec<String> {
        self.inner.recorded_utterances()
    }
}

#[async_trait]
impl Backend for DelayedMockBackend {
    async fn send(&self, utterance: &str) -> Result<String, LlmError> {
        self.request_started.notify_one();
        self.release.notified().await;
        self.inner.next_reply(utterance)
    }
}

/// Backend whose task panics mid-call
pub struct PanickingBackend;

#[async_trait]
impl Backend for PanickingBackend {
    async fn send(&self, _utterance: &str) -> Result<String, LlmError> {
        panic!("backend exploded");
    }
}

// ============================================================================
// Test Runtime
// ============================================================================

/// A running chat wired to a mock backend
pub struct TestRuntime<B: Backend + 'static> {
    pub handle: ChatHandle,
    pub backend: Arc<B>,
}

impl TestRuntime<MockBackend> {
    /// Create a test runtime builder with an instant mock and no quiz delays
    pub fn new() -> TestRuntimeBuilder<MockBackend> {
        TestRuntimeBuilder {
            backend: None,
            pacing: QuizPacing::immediate(),
        }
    }
}

pub struct TestRuntimeBuilder<B> {
    backend: Option<B>,
    pacing: QuizPacing,
}

impl<B: Backend + 'static> TestRuntimeBuilder<B> {
    pub fn backend<N: Backend + 'static>(self, backend: N) -> TestRuntimeBuilder<N> {
        TestRuntimeBuilder {
            backend: Some(backend),
            pacing: self.pacing,
        }
    }

    pub fn pacing(mut self, pacing: QuizPacing) -> Self {
        self.pacing = pacing;
        self
    }
}

impl TestRuntimeBuilder<MockBackend> {
    pub fn build(self) -> TestRuntime<MockBackend> {
        let backend = self.backend.unwrap_or_default();
        TestRuntimeBuilder {
            backend: Some(backend),
            pacing: self.pacing,
        }
        .start()
    }
}

impl<B: Backend + 'static> TestRuntimeBuilder<B> {
    pub fn start(self) -> TestRuntime<B> {
        let backend = Arc::new(self.backend.expect("backend configured"));
        let handle = spawn(ChatContext::new(self.pacing), backend.clone());
        TestRuntime { handle, backend }
    }
}

impl<B: Backend + 'static> TestRuntime<B> {
    pub async fn submit(&self, text: &str) {
        self.dispatch(Event::Submit {
            text: text.to_string(),
        })
        .await;
    }

    pub async fn click(&self, chip: &str) {
        self.dispatch(Event::SelectSuggestion {
            text: chip.to_string(),
        })
        .await;
    }

    pub async fn retry(&self, text: &str) {
        self.dispatch(Event::Retry {
            text: text.to_string(),
        })
        .await;
    }

    pub async fn dispatch(&self, event: Event) {
        self.handle
            .dispatch(event)
            .await
            .expect("Failed to dispatch event");
    }

    /// Wait until a published view satisfies `predicate`
    pub async fn wait_for(
        &self,
        timeout: Duration,
        predicate: impl Fn(&ChatView) -> bool,
    ) -> Option<ChatView> {
        let mut rx = self.handle.subscribe();
        let waited = tokio::time::timeout(timeout, async {
            loop {
                {
                    let view = rx.borrow_and_update();
                    if predicate(&view) {
                        return (*view).clone();
                    }
                }
                if rx.changed().await.is_err() {
                    // Sender gone; nothing more will be published
                    std::future::pending::<()>().await;
                }
            }
        })
        .await;
        waited.ok()
    }

    /// Let queued events (and zero-delay ticks) drain, then return the view
    pub async fn settle(&self) -> ChatView {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.handle.snapshot()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::QUIZ_QUESTIONS;
    use crate::faq;
    use crate::quiz::START_OVER_LABEL;
    use crate::state_machine::state::ModeKind;
    use crate::transcript::{Message, Sender};

    const WAIT: Duration = Duration::from_secs(2);

    fn user_count(view: &ChatView) -> usize {
        view.messages.iter().filter(|m| m.sender == Sender::User).count()
    }

    fn current_question(view: &ChatView) -> Option<&Message> {
        view.messages.iter().rev().find(|m| m.is_quiz_question())
    }

    #[tokio::test]
    async fn test_mock_backend() {
        let mock = MockBackend::new();
        mock.queue_reply("Hello");

        assert_eq!(mock.send("hi").await.unwrap(), "Hello");
        // Nothing left queued
        assert!(mock.send("again").await.is_err());
        assert_eq!(mock.recorded_utterances(), vec!["hi", "again"]);
    }

    #[tokio::test]
    async fn test_starts_with_greeting() {
        let rt = TestRuntime::new().build();
        let view = rt.handle.snapshot();
        assert_eq!(view.messages.len(), 1);
        assert_eq!(view.mode, ModeKind::FreeForm);
        assert!(!view.in_flight);
        assert!(view.input_enabled);
    }

    #[tokio::test]
    async fn test_free_form_round_trip() {
        let rt = TestRuntime::new().build();
        rt.backend.queue_reply("AMR means microbes resist drugs.");

        rt.submit("What is AMR?").await;
        let view = rt
            .wait_for(WAIT, |v| !v.in_flight && v.messages.len() == 3)
            .await
            .expect("reply arrives");

        assert_eq!(view.messages[1].text, "What is AMR?");
        assert_eq!(view.messages[2].text, "AMR means microbes resist drugs.");
        assert_eq!(view.messages[2].sender, Sender::Bot);
        assert_eq!(rt.backend.recorded_utterances(), vec!["What is AMR?"]);
    }

    #[tokio::test]
    async fn test_single_request_in_flight() {
        let rt = TestRuntime::new().backend(DelayedMockBackend::new()).start();
        rt.backend.queue_reply("first reply");
        let started = rt.backend.request_started.clone();

        rt.submit("first").await;
        started.notified().await;
        let busy = rt.wait_for(WAIT, |v| v.in_flight).await.expect("in flight");
        assert!(!busy.input_enabled);

        rt.submit("second").await;
        rt.retry("first").await;
        rt.click("What is AMR?").await;
        let view = rt.settle().await;
        assert!(view.in_flight);
        assert_eq!(user_count(&view), 1);

        rt.backend.release_one();
        let done = rt.wait_for(WAIT, |v| !v.in_flight).await.expect("reply");
        assert_eq!(done.messages.last().unwrap().text, "first reply");
        assert_eq!(rt.backend.recorded_utterances(), vec!["first"]);
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let rt = TestRuntime::new().build();
        rt.backend.queue_error(LlmError::network("Connection failed"));
        rt.backend.queue_reply("Here you go.");

        rt.submit("tell me").await;
        let failed = rt
            .wait_for(WAIT, |v| v.messages.iter().any(|m| m.is_error))
            .await
            .expect("error shown");
        assert!(!failed.in_flight);
        let errors: Vec<_> = failed.messages.iter().filter(|m| m.is_error).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].retry_text.as_deref(), Some("tell me"));
        assert!(errors[0].text.contains("Connection failed"));

        rt.retry("tell me").await;
        let done = rt
            .wait_for(WAIT, |v| !v.in_flight && v.messages.last().is_some_and(|m| m.text == "Here you go."))
            .await
            .expect("retry succeeds");
        assert!(done.messages.iter().all(|m| !m.is_error));
        assert_eq!(user_count(&done), 1);
        assert_eq!(rt.backend.recorded_utterances(), vec!["tell me", "tell me"]);
    }

    #[tokio::test]
    async fn test_uninitialized_backend() {
        let rt = TestRuntime::new().backend(UninitializedBackend).start();
        rt.submit("hello").await;
        let view = rt
            .wait_for(WAIT, |v| v.messages.iter().any(|m| m.is_error))
            .await
            .expect("error shown");
        let err = view.messages.last().unwrap();
        assert_eq!(err.retry_text, None);
        assert!(err.text.contains("Chat session not initialized."));
        assert!(!view.in_flight);
    }

    #[tokio::test]
    async fn test_panicking_backend_clears_in_flight() {
        let rt = TestRuntime::new().backend(PanickingBackend).start();
        rt.submit("hello").await;
        let view = rt
            .wait_for(WAIT, |v| !v.in_flight && v.messages.iter().any(|m| m.is_error))
            .await
            .expect("failure reported");
        let err = view.messages.last().unwrap();
        assert_eq!(err.text, "Sorry, an unexpected error occurred. Please try again.");
        assert_eq!(err.retry_text.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_quiz_all_correct() {
        let rt = TestRuntime::new().build();
        rt.submit("  QUIZ ").await;

        for (i, question) in QUIZ_QUESTIONS.iter().enumerate() {
            let view = rt
                .wait_for(WAIT, |v| {
                    current_question(v).is_some_and(|m| m.quiz.as_ref().is_some_and(|q| q.question_index == i))
                })
                .await
                .expect("question shown");
            assert_eq!(view.mode, ModeKind::Quiz);
            assert!(!view.input_enabled);

            let id = current_question(&view).unwrap().id;
            rt.dispatch(Event::SelectQuizOption {
                message_id: id,
                option: question.correct_answer.to_string(),
            })
            .await;
        }

        let view = rt
            .wait_for(WAIT, |v| v.mode == ModeKind::FreeForm)
            .await
            .expect("quiz ends");
        let summary = view.messages.last().unwrap();
        assert!(summary.text.contains(&format!(
            "You scored {n} out of {n}.",
            n = QUIZ_QUESTIONS.len()
        )));
        assert!(summary.text.contains("Excellent work!"));
        assert_eq!(summary.suggestions, vec![START_OVER_LABEL.to_string()]);
        assert!(rt.backend.recorded_utterances().is_empty());
    }

    #[tokio::test]
    async fn test_quiz_blocks_submit_and_ignores_double_answer() {
        let rt = TestRuntime::new().build();
        rt.submit("quiz").await;
        let view = rt
            .wait_for(WAIT, |v| current_question(v).is_some())
            .await
            .expect("first question");
        let id = current_question(&view).unwrap().id;

        rt.submit("hello?").await;
        rt.dispatch(Event::SelectQuizOption {
            message_id: id,
            option: QUIZ_QUESTIONS[0].correct_answer.to_string(),
        })
        .await;
        rt.dispatch(Event::SelectQuizOption {
            message_id: id,
            option: QUIZ_QUESTIONS[0].options[0].to_string(),
        })
        .await;

        let view = rt
            .wait_for(WAIT, |v| {
                current_question(v).is_some_and(|m| m.quiz.as_ref().is_some_and(|q| q.question_index == 1))
            })
            .await
            .expect("second question");
        assert_eq!(user_count(&view), 0);
        let feedback = view
            .messages
            .iter()
            .filter(|m| m.text.starts_with("Correct!") || m.text.starts_with("Not quite."))
            .count();
        assert_eq!(feedback, 1);
        let first = view.messages.iter().find(|m| m.id == id).unwrap();
        assert_eq!(
            first.quiz.as_ref().unwrap().selected_answer.as_deref(),
            Some(QUIZ_QUESTIONS[0].correct_answer)
        );
        assert!(rt.backend.recorded_utterances().is_empty());
    }

    #[tokio::test]
    async fn test_quiz_pacing_delays_steps() {
        let rt = TestRuntime::new()
            .pacing(QuizPacing::from_unit(Duration::from_millis(100)))
            .build();
        rt.submit("quiz").await;

        let intro = rt.settle().await;
        assert!(current_question(&intro).is_none());

        let view = rt.wait_for(WAIT, |v| current_question(v).is_some()).await;
        assert!(view.is_some());
    }

    #[tokio::test]
    async fn test_faq_walkthrough() {
        let rt = TestRuntime::new().build();
        rt.click("View FAQs").await;
        let topics = rt
            .wait_for(WAIT, |v| v.mode == ModeKind::Faq)
            .await
            .expect("faq entered");
        let chips = &topics.messages.last().unwrap().suggestions;
        assert_eq!(chips.last().map(String::as_str), Some(faq::EXIT_LABEL));
        let topic = chips[0].clone();

        rt.click(&topic).await;
        let questions = rt
            .wait_for(WAIT, |v| v.messages.last().is_some_and(|m| m.text.contains(&topic)))
            .await
            .expect("question list");
        // Every older chip is gone
        let with_chips = questions.messages.iter().filter(|m| !m.suggestions.is_empty()).count();
        assert_eq!(with_chips, 1);

        rt.click(faq::BACK_LABEL).await;
        rt.click(faq::EXIT_LABEL).await;
        let done = rt
            .wait_for(WAIT, |v| v.mode == ModeKind::FreeForm)
            .await
            .expect("faq exited");
        assert_eq!(
            done.messages.last().unwrap().text,
            "You've exited the FAQ section. How else can I help you?"
        );
        assert_eq!(user_count(&done), 0);
        assert!(rt.backend.recorded_utterances().is_empty());
    }

    #[tokio::test]
    async fn test_start_over_restarts_quiz() {
        let rt = TestRuntime::new().build();
        rt.submit("quiz").await;
        for (i, question) in QUIZ_QUESTIONS.iter().enumerate() {
            let view = rt
                .wait_for(WAIT, |v| {
                    current_question(v).is_some_and(|m| m.quiz.as_ref().is_some_and(|q| q.question_index == i))
                })
                .await
                .expect("question shown");
            let wrong = question
                .options
                .iter()
                .find(|o| **o != question.correct_answer)
                .unwrap();
            rt.dispatch(Event::SelectQuizOption {
                message_id: current_question(&view).unwrap().id,
                option: (*wrong).to_string(),
            })
            .await;
        }
        let done = rt
            .wait_for(WAIT, |v| v.mode == ModeKind::FreeForm)
            .await
            .expect("quiz over");
        assert!(done.messages.last().unwrap().text.contains("Thanks for playing!"));

        rt.click(START_OVER_LABEL).await;
        let restarted = rt
            .wait_for(WAIT, |v| {
                v.mode == ModeKind::Quiz
                    && current_question(v).is_some_and(|m| m.quiz.as_ref().is_some_and(|q| q.selected_answer.is_none()))
            })
            .await
            .expect("quiz restarted");
        assert!(restarted.messages.iter().all(|m| m.suggestions.is_empty()));
    }
}
