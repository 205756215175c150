use diesel::prelude::*;

use crate::domain::note_category::NoteCategory as DomainNoteCategory;

/// Row of the `note_categories` join table.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::note_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NoteCategory {
    pub note_id: i32,
    pub category_id: i32,
}

impl From<DomainNoteCategory> for NoteCategory {
    fn from(link: DomainNoteCategory) -> Self {
        Self {
            note_id: link.note_id.get(),
            category_id: link.category_id.get(),
        }
    }
}
