//! Chat coordinator state machine
//!
//! Elm-style: [`transition`] is pure, and every side effect (backend calls,
//! quiz pacing timers) is returned as an [`Effect`] for the runtime to run.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::{BackendFailure, Event};
pub use state::{ChatContext, ChatState, ChatView, QuizPacing};
pub use transition::transition;
