//! The note itself, plus the rules it has to satisfy before it is persisted

use chrono::naive::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// Validation message for a missing required field
pub const BLANK: &str = "can't be blank";

/// A persisted note
#[derive(Clone, Debug)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Note {
    /// DOM id of the note's list element, the target of fragment updates
    pub fn dom_id(&self) -> String {
        format!("note_{}", self.id)
    }
}

/// DOM id for a note that is only known by its identifier
pub fn dom_id_for(id: &Uuid) -> String {
    format!("note_{id}")
}

/// Field-level validation errors, keyed by attribute name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub title: Vec<&'static str>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<&'static str>,
}

impl FieldErrors {
    fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }
}

/// Check the presence rules for a note
///
/// Both `title` and `body` are required to be non-empty after trimming,
/// nothing else is checked. Runs before any storage mutation; the submitted
/// values themselves are stored untrimmed.
pub fn validate(title: &str, body: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if title.trim().is_empty() {
        errors.title.push(BLANK);
    }

    if body.trim().is_empty() {
        errors.body.push(BLANK);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
