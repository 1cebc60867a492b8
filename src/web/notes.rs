//! Notes handlers
//!
//! Every request on the notes resource lands here. A handler looks up,
//! validates, persists, and publishes; the returned [`View`] decides how
//! the outcome is shown.

use axum::Extension;
use uuid::Uuid;

use crate::broadcast::Broadcaster;
use crate::notes;
use crate::notes::Note;
use crate::storage::CreateNoteValues;
use crate::storage::Storage;
use crate::storage::UpdateNoteValues;

use super::render::Error;
use super::render::FormTarget;
use super::render::Outcome;
use super::render::View;
use super::request::ClientFormat;
use super::request::NoteForm;
use super::request::NoteParams;
use super::request::PathParameters;

/// List all notes, newest first
///
/// Request:
/// ```sh
/// curl -v -H 'Accept: application/json' http://localhost:3000/notes
/// ```
///
/// Response:
/// ```json
/// { "data": [ { "id": "<uuid>", "title": "Groceries", ... } ] }
/// ```
pub async fn index<S: Storage>(
    format: ClientFormat,
    Extension(storage): Extension<S>,
) -> Result<View, Error> {
    let notes = storage
        .find_all_notes()
        .await
        .map_err(|err| Error::internal_server_error(err).with_format(format))?;

    Ok(View::new(format, Outcome::Index(notes)))
}

/// Show a single note
pub async fn show<S: Storage>(
    format: ClientFormat,
    Extension(storage): Extension<S>,
    PathParameters(id): PathParameters<Uuid>,
) -> Result<View, Error> {
    let note = fetch_note(&storage, &id, format).await?;

    Ok(View::new(format, Outcome::Show(note)))
}

/// The blank note template for the new-note form
#[allow(clippy::unused_async)]
pub async fn new(format: ClientFormat) -> View {
    View::new(format, Outcome::BlankForm)
}

/// An existing note for the edit form
pub async fn edit<S: Storage>(
    format: ClientFormat,
    Extension(storage): Extension<S>,
    PathParameters(id): PathParameters<Uuid>,
) -> Result<View, Error> {
    let note = fetch_note(&storage, &id, format).await?;

    Ok(View::new(format, Outcome::EditForm(note)))
}

/// Create a note
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' -H 'Accept: application/json' \
///     -d '{ "title": "Groceries", "body": "Milk, eggs" }' \
///     http://localhost:3000/notes
/// ```
///
/// Response:
/// ```json
/// { "data": { "id": "<uuid>", "title": "Groceries", ... } }
/// ```
///
/// A note that fails validation is never persisted and never broadcast
pub async fn create<S: Storage>(
    format: ClientFormat,
    Extension(storage): Extension<S>,
    Extension(broadcaster): Extension<Broadcaster>,
    NoteForm(params): NoteForm,
) -> Result<View, Error> {
    if let Err(errors) = notes::validate(&params.title, &params.body) {
        return Ok(View::new(
            format,
            Outcome::Invalid {
                title: params.title,
                body: params.body,
                errors,
                target: FormTarget::New,
            },
        ));
    }

    let values = CreateNoteValues {
        title: &params.title,
        body: &params.body,
    };

    let note = storage
        .create_note(&values)
        .await
        .map_err(|err| Error::internal_server_error(err).with_format(format))?;

    broadcaster.publish_append(&note);

    Ok(View::new(format, Outcome::Created(note)))
}

/// Update a note
pub async fn update<S: Storage>(
    format: ClientFormat,
    Extension(storage): Extension<S>,
    Extension(broadcaster): Extension<Broadcaster>,
    PathParameters(id): PathParameters<Uuid>,
    NoteForm(params): NoteForm,
) -> Result<View, Error> {
    apply_update(format, &storage, &broadcaster, &id, params).await
}

/// Delete a note
pub async fn destroy<S: Storage>(
    format: ClientFormat,
    Extension(storage): Extension<S>,
    Extension(broadcaster): Extension<Broadcaster>,
    PathParameters(id): PathParameters<Uuid>,
) -> Result<View, Error> {
    apply_destroy(format, &storage, &broadcaster, &id).await
}

/// Dispatch a plain HTML form submission
///
/// HTML forms can only POST; the hidden `_method` field carries the verb
/// the form actually means, following the usual override convention
pub async fn submit<S: Storage>(
    format: ClientFormat,
    Extension(storage): Extension<S>,
    Extension(broadcaster): Extension<Broadcaster>,
    PathParameters(id): PathParameters<Uuid>,
    NoteForm(params): NoteForm,
) -> Result<View, Error> {
    if params.method.as_deref() == Some("delete") {
        apply_destroy(format, &storage, &broadcaster, &id).await
    } else {
        apply_update(format, &storage, &broadcaster, &id, params).await
    }
}

async fn apply_update<S: Storage>(
    format: ClientFormat,
    storage: &S,
    broadcaster: &Broadcaster,
    id: &Uuid,
    params: NoteParams,
) -> Result<View, Error> {
    let note = fetch_note(storage, id, format).await?;

    if let Err(errors) = notes::validate(&params.title, &params.body) {
        return Ok(View::new(
            format,
            Outcome::Invalid {
                title: params.title,
                body: params.body,
                errors,
                target: FormTarget::Edit(*id),
            },
        ));
    }

    let values = UpdateNoteValues {
        title: &params.title,
        body: &params.body,
    };

    let note = storage
        .update_note(&note, &values)
        .await
        .map_err(|err| Error::internal_server_error(err).with_format(format))?;

    broadcaster.publish_replace(&note);

    Ok(View::new(format, Outcome::Updated(note)))
}

async fn apply_destroy<S: Storage>(
    format: ClientFormat,
    storage: &S,
    broadcaster: &Broadcaster,
    id: &Uuid,
) -> Result<View, Error> {
    let note = fetch_note(storage, id, format).await?;

    // deletion itself is not validated
    storage
        .delete_note(&note)
        .await
        .map_err(|err| Error::internal_server_error(err).with_format(format))?;

    broadcaster.publish_remove(&note.id);

    Ok(View::new(format, Outcome::Deleted(note.id)))
}

/// Fetch a note from storage
///
/// The explicit lookup step shared by show, edit, update, and delete; an
/// unknown identifier ends the request before the handler specific logic
async fn fetch_note<S: Storage>(
    storage: &S,
    id: &Uuid,
    format: ClientFormat,
) -> Result<Note, Error> {
    storage
        .find_single_note_by_id(id)
        .await
        .map_err(|err| Error::internal_server_error(err).with_format(format))?
        .map_or_else(
            || Err(Error::not_found("Note not found").with_format(format)),
            Ok,
        )
}
