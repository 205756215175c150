use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::note::{NewNote, NoteChanges};

/// Body of `POST /api/notes`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteForm {
    #[validate(length(max = 255))]
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_archived: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateNoteFormPayload {
    pub title: String,
    pub content: String,
    pub is_archived: bool,
}

impl CreateNoteFormPayload {
    pub fn into_new_note(self) -> NewNote {
        let now = Utc::now().naive_utc();
        NewNote {
            title: self.title,
            content: self.content,
            is_archived: self.is_archived,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `PUT /api/notes/{id}`. Absent or `null` fields are left as is.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteForm {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Error)]
pub enum NoteFormError {
    #[error("Note form validation failed: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for NoteFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<CreateNoteForm> for CreateNoteFormPayload {
    type Error = NoteFormError;

    fn try_from(value: CreateNoteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            title: value.title,
            content: value.content,
            is_archived: value.is_archived,
        })
    }
}

impl TryFrom<UpdateNoteForm> for NoteChanges {
    type Error = NoteFormError;

    fn try_from(value: UpdateNoteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            title: value.title,
            content: value.content,
            is_archived: value.is_archived,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_form_defaults_to_active() {
        let form: CreateNoteForm =
            serde_json::from_str(r#"{"title": "A", "content": "B"}"#).unwrap();
        let payload: CreateNoteFormPayload = form.try_into().unwrap();
        assert!(!payload.is_archived);

        let note = payload.into_new_note();
        assert_eq!(note.title, "A");
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn create_form_rejects_long_titles() {
        let form = CreateNoteForm {
            title: "x".repeat(256),
            content: String::new(),
            is_archived: false,
        };
        let payload: Result<CreateNoteFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn update_form_keeps_only_present_fields() {
        let form: UpdateNoteForm =
            serde_json::from_str(r#"{"content": "new", "title": null}"#).unwrap();
        let changes: NoteChanges = form.try_into().unwrap();
        assert_eq!(changes.title, None);
        assert_eq!(changes.content.as_deref(), Some("new"));
        assert_eq!(changes.is_archived, None);
    }
}
