use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::note::{Note, NoteWithCategories};
use crate::dto::categories::CategoryDto;

/// Note as exposed over the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Note> for NoteDto {
    fn from(value: Note) -> Self {
        Self {
            id: value.id.get(),
            title: value.title,
            content: value.content,
            is_archived: value.is_archived,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Single note response including its attached categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDetailDto {
    #[serde(flatten)]
    pub note: NoteDto,
    pub categories: Vec<CategoryDto>,
}

impl From<NoteWithCategories> for NoteDetailDto {
    fn from(value: NoteWithCategories) -> Self {
        Self {
            note: value.note.into(),
            categories: value.categories.into_iter().map(CategoryDto::from).collect(),
        }
    }
}
