//! The subscription side of live updates
//!
//! Server-sent events; every committed change to a note arrives as one
//! turbo-stream fragment ready to be applied to the list

use std::convert::Infallible;

use axum::response::sse::Event;
use axum::response::sse::KeepAlive;
use axum::response::sse::Sse;
use axum::Extension;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tokio_stream::StreamExt;

use crate::broadcast::Broadcaster;

use super::render;

/// Subscribe to the notes list
///
/// Request:
/// ```sh
/// curl -v -H 'Accept: text/event-stream' http://localhost:3000/notes/events
/// ```
#[allow(clippy::unused_async)]
pub async fn subscribe(
    Extension(broadcaster): Extension<Broadcaster>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(broadcaster.subscribe())
        // a lagged subscriber misses events, that is not an error
        .filter_map(|event| event.ok())
        .map(|event| {
            Ok::<Event, Infallible>(
                Event::default()
                    .event("notes")
                    .data(render::event_fragment(&event)),
            )
        });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
