//! Runtime for executing the chat coordinator
//!
//! One task owns the [`ChatState`] and drains a single event channel, so every
//! action observes the result of the previous one. Snapshots are published on
//! a watch channel for the HTTP surface.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ChatRuntime;
pub use traits::*;

use crate::state_machine::{ChatContext, ChatState, ChatView, Event};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

const EVENT_BUFFER: usize = 64;

#[derive(Debug, Error)]
#[error("Chat runtime is not running")]
pub struct RuntimeClosed;

/// Handle to interact with the running chat
#[derive(Clone)]
pub struct ChatHandle {
    event_tx: mpsc::Sender<Event>,
    snapshot_rx: watch::Receiver<ChatView>,
}

impl ChatHandle {
    /// Queue an event for the runtime
    pub async fn dispatch(&self, event: Event) -> Result<(), RuntimeClosed> {
        self.event_tx.send(event).await.map_err(|_| RuntimeClosed)
    }

    /// Latest published view
    pub fn snapshot(&self) -> ChatView {
        self.snapshot_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatView> {
        self.snapshot_rx.clone()
    }
}

/// Start a greeted chat on the current tokio runtime
pub fn spawn<B: Backend + 'static>(context: ChatContext, backend: Arc<B>) -> ChatHandle {
    let state = ChatState::greeted();
    let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
    let (snapshot_tx, snapshot_rx) = watch::channel(state.view());

    let runtime = ChatRuntime::new(context, state, backend, event_rx, event_tx.clone(), snapshot_tx);
    tokio::spawn(runtime.run());

    ChatHandle {
        event_tx,
        snapshot_rx,
    }
}
