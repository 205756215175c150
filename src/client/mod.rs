//! Client library for the notes HTTP API.
//!
//! [`HttpNotesClient`] wraps every endpoint and collapses any transport or
//! response failure into a [`ClientError`] carrying a human-readable message.
//! [`NoteBoard`] keeps a local view of notes and categories with optimistic
//! updates on top of any [`NotesApi`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dto::categories::CategoryDto;
use crate::dto::notes::{NoteDetailDto, NoteDto};

pub mod board;
pub mod http;

pub use board::{BoardNote, BoardState, NoteBoard};
pub use http::HttpNotesClient;

/// Connection settings injected into the client at start-up.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API scope, e.g. `http://localhost:3001/api`.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Failure of a client call. Subtypes are not distinguished.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    message: String,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Body sent when creating a note.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

/// Partial note update. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Operations exposed by the notes API.
#[allow(async_fn_in_trait)]
pub trait NotesApi {
    async fn list_notes(&self, active: bool) -> ClientResult<Vec<NoteDto>>;
    async fn get_note(&self, id: i32) -> ClientResult<NoteDetailDto>;
    async fn create_note(&self, draft: &NoteDraft) -> ClientResult<NoteDto>;
    async fn update_note(&self, id: i32, update: &NoteUpdate) -> ClientResult<NoteDto>;
    async fn delete_note(&self, id: i32) -> ClientResult<()>;
    async fn toggle_archive(&self, id: i32) -> ClientResult<NoteDto>;
    async fn add_category_to_note(&self, note_id: i32, category_id: i32) -> ClientResult<()>;
    async fn remove_category_from_note(&self, note_id: i32, category_id: i32)
    -> ClientResult<()>;
    async fn list_notes_by_category(
        &self,
        category_id: i32,
        active: bool,
    ) -> ClientResult<Vec<NoteDto>>;
    async fn list_categories(&self) -> ClientResult<Vec<CategoryDto>>;
    async fn create_category(&self, draft: &CategoryDraft) -> ClientResult<CategoryDto>;
    async fn update_category(&self, id: i32, update: &CategoryUpdate)
    -> ClientResult<CategoryDto>;
    async fn delete_category(&self, id: i32) -> ClientResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_update_serializes_present_fields_only() {
        let update = NoteUpdate {
            is_archived: Some(true),
            ..NoteUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"isArchived": true})
        );
    }

    #[test]
    fn note_draft_omits_default_archive_flag() {
        let draft = NoteDraft {
            title: "A".into(),
            content: "B".into(),
            is_archived: None,
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"title": "A", "content": "B"})
        );
    }
}
