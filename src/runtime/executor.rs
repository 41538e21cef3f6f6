//! Chat runtime executor

use super::traits::Backend;
use crate::llm::{LlmError, LlmErrorKind};
use crate::state_machine::{
    transition, BackendFailure, ChatContext, ChatState, ChatView, Effect, Event,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Owns the chat state and applies events one at a time
pub struct ChatRuntime<B: Backend + 'static> {
    context: ChatContext,
    state: ChatState,
    backend: Arc<B>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    snapshot_tx: watch::Sender<ChatView>,
}

impl<B: Backend + 'static> ChatRuntime<B> {
    pub fn new(
        context: ChatContext,
        state: ChatState,
        backend: Arc<B>,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
        snapshot_tx: watch::Sender<ChatView>,
    ) -> Self {
        Self {
            context,
            state,
            backend,
            event_rx,
            event_tx,
            snapshot_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Starting chat runtime");
        self.snapshot_tx.send_replace(self.state.view());

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::info!("Chat runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        let name = event.name();

        // Pure state transition
        let result = match transition(&self.state, &self.context, event) {
            Ok(r) => r,
            Err(e) => {
                // Ignored actions are never surfaced to the user
                tracing::debug!(event = name, reason = %e, "Event ignored");
                return;
            }
        };

        tracing::debug!(
            event = name,
            mode = ?result.new_state.mode.kind(),
            in_flight = result.new_state.is_in_flight(),
            messages = result.new_state.transcript.messages().len(),
            effects = result.effects.len(),
            "Event applied"
        );

        self.state = result.new_state;
        self.snapshot_tx.send_replace(self.state.view());

        for effect in result.effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::RequestReply { utterance } => {
                let backend = self.backend.clone();
                let event_tx = self.event_tx.clone();

                tokio::spawn(async move {
                    tracing::info!(chars = utterance.len(), "Requesting backend reply");

                    // Run the call in its own task so a panic still reports back
                    let call = tokio::spawn(async move { backend.send(&utterance).await });
                    let event = match call.await {
                        Ok(Ok(text)) => Event::BackendReply { text },
                        Ok(Err(e)) => Event::BackendFailed {
                            failure: backend_failure(e),
                        },
                        Err(e) => {
                            tracing::error!(error = %e, "Backend task failed");
                            Event::BackendFailed {
                                failure: BackendFailure::opaque(),
                            }
                        }
                    };
                    if event_tx.send(event).await.is_err() {
                        tracing::debug!("Runtime gone before backend result arrived");
                    }
                });
            }

            Effect::ScheduleQuizTick { delay, generation } => {
                let event_tx = self.event_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if event_tx.send(Event::QuizTick { generation }).await.is_err() {
                        tracing::debug!(generation, "Runtime gone before quiz tick fired");
                    }
                });
            }
        }
    }
}

fn backend_failure(error: LlmError) -> BackendFailure {
    match error.kind {
        LlmErrorKind::Uninitialized => BackendFailure::uninitialized(),
        _ if error.message.trim().is_empty() => BackendFailure::opaque(),
        _ => BackendFailure::recoverable(error.message),
    }
}
