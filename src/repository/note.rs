use chrono::Utc;
use diesel::prelude::*;

use crate::domain::category::Category;
use crate::domain::note::{NewNote, Note, NoteChanges};
use crate::domain::note_category::NoteCategory;
use crate::domain::types::{CategoryId, NoteId};
use crate::models::category::Category as DbCategory;
use crate::models::note::{Note as DbNote, NewNote as DbNewNote, NoteChanges as DbNoteChanges};
use crate::models::note_category::NoteCategory as DbNoteCategory;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, NoteListQuery, NoteReader, NoteWriter};

impl NoteReader for DieselRepository {
    fn list_notes(&self, query: NoteListQuery) -> RepositoryResult<Vec<Note>> {
        use crate::schema::{note_categories, notes};

        let mut conn = self.conn()?;

        let mut items = notes::table
            .filter(notes::is_archived.eq(query.state.is_archived()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            items = items.filter(
                notes::id.eq_any(
                    note_categories::table
                        .filter(note_categories::category_id.eq(category_id.get()))
                        .select(note_categories::note_id),
                ),
            );
        }

        let items = items
            .order((notes::created_at.desc(), notes::id.desc()))
            .select(DbNote::as_select())
            .load::<DbNote>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Note>, _>>()?;

        Ok(items)
    }

    fn get_note_by_id(&self, id: NoteId) -> RepositoryResult<Option<Note>> {
        use crate::schema::notes;

        let mut conn = self.conn()?;

        let note = notes::table
            .find(id.get())
            .select(DbNote::as_select())
            .first::<DbNote>(&mut conn)
            .optional()?;

        let note = note.map(TryInto::try_into).transpose()?;
        Ok(note)
    }

    fn list_categories_for_note(&self, id: NoteId) -> RepositoryResult<Vec<Category>> {
        use crate::schema::{categories, note_categories};

        let mut conn = self.conn()?;

        let items = categories::table
            .inner_join(note_categories::table)
            .filter(note_categories::note_id.eq(id.get()))
            .select(DbCategory::as_select())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn note_has_category(
        &self,
        note_id: NoteId,
        category_id: CategoryId,
    ) -> RepositoryResult<bool> {
        use crate::schema::note_categories;

        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(
            note_categories::table.find((note_id.get(), category_id.get())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }
}

impl NoteWriter for DieselRepository {
    fn create_note(&self, note: &NewNote) -> RepositoryResult<Note> {
        use crate::schema::notes;

        let mut conn = self.conn()?;
        let db_note = DbNewNote::from(note);

        let created = diesel::insert_into(notes::table)
            .values(&db_note)
            .returning(DbNote::as_returning())
            .get_result::<DbNote>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_note(&self, id: NoteId, changes: &NoteChanges) -> RepositoryResult<Option<Note>> {
        use crate::schema::notes;

        let mut conn = self.conn()?;
        let db_changes = DbNoteChanges::new(changes, Utc::now().naive_utc());

        let updated = diesel::update(notes::table.find(id.get()))
            .set(&db_changes)
            .returning(DbNote::as_returning())
            .get_result::<DbNote>(&mut conn)
            .optional()?;

        let updated = updated.map(TryInto::try_into).transpose()?;
        Ok(updated)
    }

    fn delete_note(&self, id: NoteId) -> RepositoryResult<usize> {
        use crate::schema::{note_categories, notes};

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            diesel::delete(note_categories::table.filter(note_categories::note_id.eq(id.get())))
                .execute(conn)?;

            diesel::delete(notes::table.find(id.get())).execute(conn)
        })?;

        Ok(affected)
    }

    fn add_category_to_note(
        &self,
        note_id: NoteId,
        category_id: CategoryId,
    ) -> RepositoryResult<usize> {
        use crate::schema::note_categories;

        let mut conn = self.conn()?;
        let link = DbNoteCategory::from(NoteCategory {
            note_id,
            category_id,
        });

        let affected = diesel::insert_or_ignore_into(note_categories::table)
            .values(&link)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn remove_category_from_note(
        &self,
        note_id: NoteId,
        category_id: CategoryId,
    ) -> RepositoryResult<usize> {
        use crate::schema::note_categories;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(note_categories::table.find((note_id.get(), category_id.get())))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
