use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::note::{
    NewNote as DomainNewNote, Note as DomainNote, NoteChanges as DomainNoteChanges,
};
use crate::domain::types::TypeConstraintError;

/// Diesel model representing the `notes` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::notes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Note`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::notes)]
pub struct NewNote<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset applied by partial updates. `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::notes)]
pub struct NoteChanges<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub is_archived: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Note> for DomainNote {
    type Error = TypeConstraintError;

    fn try_from(note: Note) -> Result<Self, Self::Error> {
        Ok(Self {
            id: note.id.try_into()?,
            title: note.title,
            content: note.content,
            is_archived: note.is_archived,
            created_at: note.created_at,
            updated_at: note.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewNote> for NewNote<'a> {
    fn from(note: &'a DomainNewNote) -> Self {
        Self {
            title: note.title.as_str(),
            content: note.content.as_str(),
            is_archived: note.is_archived,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

impl<'a> NoteChanges<'a> {
    pub fn new(changes: &'a DomainNoteChanges, updated_at: NaiveDateTime) -> Self {
        Self {
            title: changes.title.as_deref(),
            content: changes.content.as_deref(),
            is_archived: changes.is_archived,
            updated_at,
        }
    }
}
