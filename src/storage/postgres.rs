//! Postgres storage

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use chrono::Utc;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::notes::Note;

use super::CreateNoteValues;
use super::Error;
use super::Result;
use super::Storage;
use super::UpdateNoteValues;

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// Row type for notes
#[derive(sqlx::FromRow)]
struct SqlxNote {
    id: Uuid,
    title: String,
    body: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl SqlxNote {
    fn into_note(self) -> Note {
        Note {
            id: self.id,
            title: self.title,
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Postgres storage
#[derive(Clone)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Create Postgres storage
    ///
    /// Uses the `DATABASE_URL` environment variable
    ///
    /// Migrations will be run
    pub async fn new() -> Self {
        let database_connection_string = std::env::var("DATABASE_URL").expect("Valid DATABASE_URL");

        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_connection_string)
            .await
            .expect("Valid connection");

        let migration_result = MIGRATOR.run(&connection_pool).await;

        if let Err(err) = migration_result {
            panic!("Migrations could not run: {err}");
        }

        Self { connection_pool }
    }
}

#[async_trait]
impl Storage for Postgres {
    async fn find_all_notes(&self) -> Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, SqlxNote>(
            "SELECT id, title, body, created_at, updated_at
            FROM notes
            ORDER BY created_at DESC",
        )
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(notes.into_iter().map(SqlxNote::into_note).collect())
    }

    async fn find_single_note_by_id(&self, id: &Uuid) -> Result<Option<Note>> {
        let note = sqlx::query_as::<_, SqlxNote>(
            "SELECT id, title, body, created_at, updated_at
            FROM notes
            WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(note.map(SqlxNote::into_note))
    }

    async fn create_note(&self, values: &CreateNoteValues) -> Result<Note> {
        let note = Note {
            id: Uuid::new_v4(),
            title: values.title.to_string(),
            body: values.body.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        };

        sqlx::query(
            "INSERT INTO notes (id, title, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.body)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(note)
    }

    async fn update_note(&self, note: &Note, values: &UpdateNoteValues) -> Result<Note> {
        let updated_at = Utc::now().naive_utc();

        sqlx::query(
            "UPDATE notes
            SET title = $1, body = $2, updated_at = $3
            WHERE id = $4",
        )
        .bind(values.title)
        .bind(values.body)
        .bind(updated_at)
        .bind(note.id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(Note {
            id: note.id,
            title: values.title.to_string(),
            body: values.body.to_string(),
            created_at: note.created_at,
            updated_at,
        })
    }

    async fn delete_note(&self, note: &Note) -> Result<()> {
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(note.id)
            .execute(&self.connection_pool)
            .await
            .map_err(connection_error)?;

        Ok(())
    }
}

/// Map any sqlx error to a storage connection error
fn connection_error(err: sqlx::Error) -> Error {
    Error::Connection(err.to_string())
}
