use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryChanges, NewCategory};
use crate::domain::note::{NewNote, Note, NoteChanges};
use crate::domain::types::{ArchiveState, CategoryId, NoteId};

use self::errors::RepositoryResult;

pub mod category;
pub mod errors;
pub mod note;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing notes.
///
/// Results are always ordered newest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteListQuery {
    /// Archive partition to list.
    pub state: ArchiveState,
    /// Restrict to notes linked to a category.
    pub category_id: Option<CategoryId>,
}

impl NoteListQuery {
    pub fn new(state: ArchiveState) -> Self {
        Self {
            state,
            category_id: None,
        }
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Read-only operations for note entities.
pub trait NoteReader {
    /// List notes matching the supplied query, newest first.
    fn list_notes(&self, query: NoteListQuery) -> RepositoryResult<Vec<Note>>;
    /// Retrieve a note by its identifier.
    fn get_note_by_id(&self, id: NoteId) -> RepositoryResult<Option<Note>>;
    /// Categories linked to a note, in no particular order.
    fn list_categories_for_note(&self, id: NoteId) -> RepositoryResult<Vec<Category>>;
    /// Whether the note is already linked to the category.
    fn note_has_category(&self, note_id: NoteId, category_id: CategoryId)
    -> RepositoryResult<bool>;
}

/// Write operations for note entities and their category links.
pub trait NoteWriter {
    /// Persist a new note and return it with its assigned id.
    fn create_note(&self, note: &NewNote) -> RepositoryResult<Note>;
    /// Apply a partial update. Returns `None` if the note does not exist.
    fn update_note(&self, id: NoteId, changes: &NoteChanges) -> RepositoryResult<Option<Note>>;
    /// Delete a note together with its category links.
    fn delete_note(&self, id: NoteId) -> RepositoryResult<usize>;
    /// Link a note to a category. Linking twice leaves a single row.
    fn add_category_to_note(
        &self,
        note_id: NoteId,
        category_id: CategoryId,
    ) -> RepositoryResult<usize>;
    /// Remove the link between a note and a category, if any.
    fn remove_category_from_note(
        &self,
        note_id: NoteId,
        category_id: CategoryId,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return it with its assigned id.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Apply a partial update. Returns `None` if the category does not exist.
    fn update_category(
        &self,
        id: CategoryId,
        changes: &CategoryChanges,
    ) -> RepositoryResult<Option<Category>>;
    /// Delete a category and every note link referencing it.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}
