//! HTTP API for the chat widget
//!
//! A rendering surface reads the transcript (once or as a stream) and posts
//! user actions back; every action is queued to the chat runtime.

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::runtime::ChatHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatHandle,
}

impl AppState {
    pub fn new(chat: ChatHandle) -> Self {
        Self { chat }
    }
}
