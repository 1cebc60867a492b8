//! All route setup for the HTTP surface

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use crate::storage::Storage;

mod events;
mod notes;
mod render;
mod request;

/// Get the Axum router for all routes
pub fn router<S: Storage>() -> Router {
    Router::new()
        .route("/", get(notes::index::<S>))
        .route("/notes", get(notes::index::<S>).post(notes::create::<S>))
        .route("/notes/new", get(notes::new))
        .route("/notes/events", get(events::subscribe))
        .route(
            "/notes/{id}",
            get(notes::show::<S>)
                .post(notes::submit::<S>)
                .patch(notes::update::<S>)
                .put(notes::update::<S>)
                .delete(notes::destroy::<S>),
        )
        .route("/notes/{id}/edit", get(notes::edit::<S>))
        .route("/up", get(up))
}

/// Liveness probe
#[allow(clippy::unused_async)]
async fn up() -> StatusCode {
    StatusCode::OK
}
