use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{ArchiveState, NoteId};

/// A user-authored text note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Note {
    /// Archive partition this note currently belongs to.
    pub const fn archive_state(&self) -> ArchiveState {
        ArchiveState::from_archived(self.is_archived)
    }
}

/// Data required to insert a new [`Note`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`Note`]. Only fields set to `Some` are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_archived: Option<bool>,
}

impl NoteChanges {
    /// Changes that only flip the archive flag.
    pub fn archived(is_archived: bool) -> Self {
        Self {
            is_archived: Some(is_archived),
            ..Self::default()
        }
    }

    /// Returns `true` if the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.is_archived.is_none()
    }
}

/// A note together with the categories attached to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteWithCategories {
    pub note: Note,
    pub categories: Vec<Category>,
}
