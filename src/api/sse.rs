//! Server-Sent Events support

use crate::state_machine::ChatView;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

/// Stream every published view as a `snapshot` event, starting with the
/// current one
pub fn sse_stream(
    snapshot_rx: watch::Receiver<ChatView>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let snapshots = WatchStream::new(snapshot_rx).filter_map(|view| snapshot_event(&view).map(Ok));

    Sse::new(snapshots).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn snapshot_event(view: &ChatView) -> Option<Event> {
    match serde_json::to_string(view) {
        Ok(data) => Some(Event::default().event("snapshot").data(data)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize snapshot");
            None
        }
    }
}
