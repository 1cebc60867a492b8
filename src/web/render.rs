//! Rendering of handler outcomes
//!
//! Handlers decide *what* happened; this module decides how it is shown.
//! The same [`Outcome`] turns into a server rendered page, a JSON document,
//! or a turbo-stream fragment depending on the client's [`ClientFormat`].

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Json;
use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::broadcast::NoteEvent;
use crate::notes;
use crate::notes::FieldErrors;
use crate::notes::Note;

use super::request::ClientFormat;

/// Content type of turbo-stream fragments
pub const TURBO_STREAM: &str = "text/vnd.turbo-stream.html";

/// Note response going to the user
///
/// Basically filtering which fields are shown to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    /// Note ID
    pub id: Uuid,

    /// Title of the note
    pub title: String,

    /// Body of the note
    pub body: String,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,
}

impl NoteResponse {
    /// Create a response from a [`Note`](Note)
    fn from_note(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            body: note.body,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }

    /// Create a response from multiple [`Note`](Note)s
    fn from_note_multiple(mut notes: Vec<Note>) -> Vec<Self> {
        notes.drain(..).map(Self::from_note).collect::<Vec<Self>>()
    }
}

#[derive(Serialize)]
struct DataWrapper<D>
where
    D: Serialize,
{
    data: D,
}

/// The blank note template behind `GET /notes/new`
#[derive(Default, Serialize)]
struct BlankNote {
    title: String,
    body: String,
}

/// What a handler decided, independent of representation
pub enum Outcome {
    /// The full list of notes, newest first
    Index(Vec<Note>),

    /// One looked up note
    Show(Note),

    /// The blank note template
    BlankForm,

    /// One looked up note, headed for the edit form
    EditForm(Note),

    /// A note was created and persisted
    Created(Note),

    /// A note was updated and persisted
    Updated(Note),

    /// A note was removed
    Deleted(Uuid),

    /// Validation failed; nothing was persisted
    ///
    /// Carries the submitted candidate values so the form can be
    /// re-rendered as the user left it
    Invalid {
        title: String,
        body: String,
        errors: FieldErrors,
        target: FormTarget,
    },
}

/// Which form page a validation failure re-renders
pub enum FormTarget {
    New,
    Edit(Uuid),
}

/// A handler outcome paired with the representation the client asked for
pub struct View {
    format: ClientFormat,
    outcome: Outcome,
}

impl View {
    pub fn new(format: ClientFormat, outcome: Outcome) -> Self {
        Self { format, outcome }
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        match self.format {
            ClientFormat::Json => json_response(self.outcome),
            ClientFormat::Html => page_response(self.outcome),
            ClientFormat::Stream => stream_response(self.outcome),
        }
    }
}

fn json_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Index(notes) => (
            StatusCode::OK,
            Json(DataWrapper {
                data: NoteResponse::from_note_multiple(notes),
            }),
        )
            .into_response(),
        Outcome::Show(note) | Outcome::EditForm(note) | Outcome::Updated(note) => (
            StatusCode::OK,
            Json(DataWrapper {
                data: NoteResponse::from_note(note),
            }),
        )
            .into_response(),
        Outcome::BlankForm => (
            StatusCode::OK,
            Json(DataWrapper {
                data: BlankNote::default(),
            }),
        )
            .into_response(),
        Outcome::Created(note) => (
            StatusCode::CREATED,
            Json(DataWrapper {
                data: NoteResponse::from_note(note),
            }),
        )
            .into_response(),
        Outcome::Deleted(_) => StatusCode::NO_CONTENT.into_response(),
        Outcome::Invalid { errors, .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
        }
    }
}

fn page_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Index(notes) => Html(index_page(&notes)).into_response(),
        Outcome::Show(note) => Html(show_page(&note)).into_response(),
        Outcome::BlankForm => Html(new_page("", "", None)).into_response(),
        Outcome::EditForm(note) => {
            Html(edit_page(&note.id, &note.title, &note.body, None)).into_response()
        }
        Outcome::Created(note) | Outcome::Updated(note) => {
            Redirect::to(&format!("/notes/{}", note.id)).into_response()
        }
        Outcome::Deleted(_) => Redirect::to("/notes").into_response(),
        Outcome::Invalid {
            title,
            body,
            errors,
            target,
        } => {
            let page = match target {
                FormTarget::New => new_page(&title, &body, Some(&errors)),
                FormTarget::Edit(id) => edit_page(&id, &title, &body, Some(&errors)),
            };

            (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()
        }
    }
}

fn stream_response(outcome: Outcome) -> Response {
    match outcome {
        // the direct fragment for a delete from the list view; this is the
        // requesting client's own response, not the broadcast
        Outcome::Deleted(id) => {
            ([(CONTENT_TYPE, TURBO_STREAM)], remove_fragment(&id)).into_response()
        }
        outcome => page_response(outcome),
    }
}

/// Fragment for one published notes-list event
pub fn event_fragment(event: &NoteEvent) -> String {
    match event {
        NoteEvent::Append(note) => append_fragment(note),
        NoteEvent::Replace(note) => replace_fragment(note),
        NoteEvent::Remove(id) => remove_fragment(id),
    }
}

fn append_fragment(note: &Note) -> String {
    format!(
        r#"<turbo-stream action="append" target="notes"><template>{}</template></turbo-stream>"#,
        note_item(note)
    )
}

fn replace_fragment(note: &Note) -> String {
    format!(
        r#"<turbo-stream action="replace" target="{}"><template>{}</template></turbo-stream>"#,
        note.dom_id(),
        note_item(note)
    )
}

fn remove_fragment(id: &Uuid) -> String {
    format!(
        r#"<turbo-stream action="remove" target="{}"></turbo-stream>"#,
        notes::dom_id_for(id)
    )
}

/// One list item, shared by the index page and the list fragments
fn note_item(note: &Note) -> String {
    format!(
        r#"<li id="{}"><a href="/notes/{}">{}</a></li>"#,
        note.dom_id(),
        note.id,
        escape(&note.title)
    )
}

fn layout(title: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>{} | Notely</title></head><body>{main}</body></html>"#,
        escape(title)
    )
}

fn index_page(notes: &[Note]) -> String {
    let items = notes.iter().map(note_item).collect::<String>();

    layout(
        "Notes",
        &format!(
            r#"<h1>Notes</h1><ul id="notes">{items}</ul><p><a href="/notes/new">New note</a></p>"#
        ),
    )
}

fn show_page(note: &Note) -> String {
    layout(
        &note.title,
        &format!(
            r#"<article id="{dom_id}"><h1>{title}</h1><p>{body}</p></article><p><a href="/notes/{id}/edit">Edit</a> <a href="/notes">Back</a></p><form method="post" action="/notes/{id}"><input type="hidden" name="_method" value="delete"><button type="submit">Delete</button></form>"#,
            dom_id = note.dom_id(),
            title = escape(&note.title),
            body = escape(&note.body),
            id = note.id,
        ),
    )
}

fn new_page(title: &str, body: &str, errors: Option<&FieldErrors>) -> String {
    layout("New note", &note_form("/notes", None, title, body, errors))
}

fn edit_page(id: &Uuid, title: &str, body: &str, errors: Option<&FieldErrors>) -> String {
    layout(
        "Edit note",
        &note_form(&format!("/notes/{id}"), Some("patch"), title, body, errors),
    )
}

fn note_form(
    action: &str,
    method: Option<&str>,
    title: &str,
    body: &str,
    errors: Option<&FieldErrors>,
) -> String {
    let errors = errors.cloned().unwrap_or_default();

    let method_field = method.map_or_else(String::new, |method| {
        format!(r#"<input type="hidden" name="_method" value="{method}">"#)
    });

    format!(
        r#"<form method="post" action="{action}">{method_field}<p><label for="note_title">Title</label>{title_errors}<input type="text" id="note_title" name="title" value="{title}"></p><p><label for="note_body">Body</label>{body_errors}<textarea id="note_body" name="body">{body}</textarea></p><p><button type="submit">Save</button> <a href="/notes">Back</a></p></form>"#,
        title = escape(title),
        body = escape(body),
        title_errors = error_spans(&errors.title),
        body_errors = error_spans(&errors.body),
    )
}

fn error_spans(messages: &[&'static str]) -> String {
    messages
        .iter()
        .map(|message| format!(r#"<span class="error">{message}</span>"#))
        .collect()
}

/// The generic error page for browser clients
fn error_page(status_code: StatusCode, message: &str) -> String {
    layout(
        "Error",
        &format!("<h1>{status_code}</h1><p>{}</p>", escape(message)),
    )
}

/// Minimal HTML escaping for user supplied text
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            ch => escaped.push(ch),
        }
    }

    escaped
}

/// Hold data for a failed interaction
pub struct Error {
    status_code: StatusCode,
    message: String,
    description: Option<String>,
    format: ClientFormat,
}

impl Error {
    pub fn bad_request<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::with_status(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::with_status(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_server_error<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn with_status<M>(status_code: StatusCode, message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code,
            message: message.to_string(),
            description: None,
            format: ClientFormat::Json,
        }
    }

    pub fn with_description<M>(self, description: M) -> Self
    where
        M: ToString,
    {
        Self {
            description: Some(description.to_string()),
            ..self
        }
    }

    pub fn with_format(self, format: ClientFormat) -> Self {
        Self { format, ..self }
    }
}

#[derive(Serialize)]
struct ErrorWrapper<D>
where
    D: Serialize,
{
    error: D,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<D>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.format {
            // browsers get the generic error page
            ClientFormat::Html | ClientFormat::Stream => (
                self.status_code,
                Html(error_page(self.status_code, &self.message)),
            )
                .into_response(),
            ClientFormat::Json => (
                self.status_code,
                Json(ErrorWrapper {
                    error: self.message,
                    description: self.description,
                }),
            )
                .into_response(),
        }
    }
}
