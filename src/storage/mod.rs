//! All things related to the storage of notes

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::notes::Note;

pub use memory::Memory;

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
use postgres::Postgres;

/// Setup the storage
#[cfg(not(feature = "postgres"))]
#[allow(clippy::unused_async)]
pub async fn setup() -> Memory {
    Memory::new()
}

/// Setup the storage
#[cfg(feature = "postgres")]
pub async fn setup() -> Postgres {
    Postgres::new().await
}

/// Storage errors
#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum Error {
    /// A connection error with the storage
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to create a Note
///
/// Only the user-supplied attributes; the identifier and timestamps are
/// assigned by the storage
pub struct CreateNoteValues<'a> {
    /// Title of the note
    pub title: &'a str,

    /// Body of the note
    pub body: &'a str,
}

/// Values to update a Note
///
/// Both fields are replaced as a whole; `updated_at` is refreshed
pub struct UpdateNoteValues<'a> {
    /// New title of the note
    pub title: &'a str,

    /// New body of the note
    pub body: &'a str,
}

/// Storage with all supported operations
///
/// Operations are atomic with respect to a single note; there are no
/// cross-note transactions
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Find all notes, newest first
    async fn find_all_notes(&self) -> Result<Vec<Note>>;

    /// Find a single note by its ID
    async fn find_single_note_by_id(&self, id: &Uuid) -> Result<Option<Note>>;

    /// Create a note
    async fn create_note(&self, values: &CreateNoteValues) -> Result<Note>;

    /// Update a note
    async fn update_note(&self, note: &Note, values: &UpdateNoteValues) -> Result<Note>;

    /// Delete a note
    ///
    /// The removal is permanent, there is no soft-delete
    async fn delete_note(&self, note: &Note) -> Result<()>;
}
