//! Local view of notes and categories with optimistic mutations.
//!
//! Every mutation snapshots the current state, applies the expected outcome
//! locally, issues the request and then either reconciles with the server's
//! answer or restores the snapshot. This only keeps the view responsive: it
//! is not a consistency mechanism, and the server remains the source of truth
//! on the next [`NoteBoard::load`].

use std::collections::BTreeSet;

use crate::client::{
    CategoryDraft, CategoryUpdate, ClientError, ClientResult, NoteDraft, NoteUpdate, NotesApi,
};
use crate::dto::categories::CategoryDto;
use crate::dto::notes::NoteDto;

/// A note as shown by the board, with the ids of its categories.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardNote {
    pub note: NoteDto,
    pub category_ids: BTreeSet<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub notes: Vec<BoardNote>,
    pub categories: Vec<CategoryDto>,
}

impl BoardState {
    fn note_mut(&mut self, id: i32) -> Option<&mut BoardNote> {
        self.notes.iter_mut().find(|n| n.note.id == id)
    }

    /// Replace the stored note with the server's version, keeping its
    /// category ids.
    fn reconcile_note(&mut self, note: NoteDto) {
        if let Some(entry) = self.note_mut(note.id) {
            entry.note = note;
        }
    }

    fn reconcile_category(&mut self, category: CategoryDto) {
        if let Some(entry) = self.categories.iter_mut().find(|c| c.id == category.id) {
            *entry = category;
        }
        self.sort_categories();
    }

    /// Keeps the server's listing order: name, then id.
    fn sort_categories(&mut self) {
        self.categories
            .sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    }
}

/// Client-side note board layered over a [`NotesApi`].
pub struct NoteBoard<A> {
    api: A,
    state: BoardState,
}

impl<A> NoteBoard<A>
where
    A: NotesApi,
{
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: BoardState::default(),
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Notes on the requested side of the archive partition, optionally
    /// restricted to one category.
    pub fn visible_notes(&self, show_archived: bool, category_id: Option<i32>) -> Vec<&BoardNote> {
        self.state
            .notes
            .iter()
            .filter(|n| n.note.is_archived == show_archived)
            .filter(|n| category_id.is_none_or(|id| n.category_ids.contains(&id)))
            .collect()
    }

    fn rollback(&mut self, snapshot: BoardState, err: ClientError) -> ClientError {
        log::error!("{err} Reverting local changes.");
        self.state = snapshot;
        err
    }

    /// Replace the local view with the server's current state.
    pub async fn load(&mut self) -> ClientResult<()> {
        let categories = self.api.list_categories().await?;

        let mut notes = Vec::new();
        for active in [true, false] {
            notes.extend(
                self.api
                    .list_notes(active)
                    .await?
                    .into_iter()
                    .map(|note| BoardNote {
                        note,
                        category_ids: BTreeSet::new(),
                    }),
            );
        }

        // Links are collected per category, so the request count does not
        // grow with the number of notes.
        for category in &categories {
            for active in [true, false] {
                for linked in self.api.list_notes_by_category(category.id, active).await? {
                    if let Some(entry) = notes.iter_mut().find(|n| n.note.id == linked.id) {
                        entry.category_ids.insert(category.id);
                    }
                }
            }
        }

        let mut state = BoardState { notes, categories };
        state.sort_categories();
        self.state = state;
        Ok(())
    }

    /// Creates a note. The id is assigned by the server, so the note is only
    /// added once the request succeeds.
    pub async fn create_note(&mut self, draft: &NoteDraft) -> ClientResult<NoteDto> {
        let note = self.api.create_note(draft).await?;
        self.state.notes.insert(
            0,
            BoardNote {
                note: note.clone(),
                category_ids: BTreeSet::new(),
            },
        );
        Ok(note)
    }

    pub async fn update_note(&mut self, id: i32, update: &NoteUpdate) -> ClientResult<NoteDto> {
        let snapshot = self.state.clone();
        if let Some(entry) = self.state.note_mut(id) {
            if let Some(title) = &update.title {
                entry.note.title = title.clone();
            }
            if let Some(content) = &update.content {
                entry.note.content = content.clone();
            }
            if let Some(is_archived) = update.is_archived {
                entry.note.is_archived = is_archived;
            }
        }

        match self.api.update_note(id, update).await {
            Ok(note) => {
                self.state.reconcile_note(note.clone());
                Ok(note)
            }
            Err(err) => Err(self.rollback(snapshot, err)),
        }
    }

    pub async fn toggle_archive(&mut self, id: i32) -> ClientResult<NoteDto> {
        let snapshot = self.state.clone();
        if let Some(entry) = self.state.note_mut(id) {
            entry.note.is_archived = !entry.note.is_archived;
        }

        match self.api.toggle_archive(id).await {
            Ok(note) => {
                self.state.reconcile_note(note.clone());
                Ok(note)
            }
            Err(err) => Err(self.rollback(snapshot, err)),
        }
    }

    pub async fn delete_note(&mut self, id: i32) -> ClientResult<()> {
        let snapshot = self.state.clone();
        self.state.notes.retain(|n| n.note.id != id);

        match self.api.delete_note(id).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.rollback(snapshot, err)),
        }
    }

    pub async fn add_category(&mut self, note_id: i32, category_id: i32) -> ClientResult<()> {
        let snapshot = self.state.clone();
        if let Some(entry) = self.state.note_mut(note_id) {
            entry.category_ids.insert(category_id);
        }

        match self.api.add_category_to_note(note_id, category_id).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.rollback(snapshot, err)),
        }
    }

    pub async fn remove_category(&mut self, note_id: i32, category_id: i32) -> ClientResult<()> {
        let snapshot = self.state.clone();
        if let Some(entry) = self.state.note_mut(note_id) {
            entry.category_ids.remove(&category_id);
        }

        match self.api.remove_category_from_note(note_id, category_id).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.rollback(snapshot, err)),
        }
    }

    pub async fn create_category(&mut self, draft: &CategoryDraft) -> ClientResult<CategoryDto> {
        let category = self.api.create_category(draft).await?;
        self.state.categories.push(category.clone());
        self.state.sort_categories();
        Ok(category)
    }

    pub async fn update_category(
        &mut self,
        id: i32,
        update: &CategoryUpdate,
    ) -> ClientResult<CategoryDto> {
        let snapshot = self.state.clone();
        if let Some(entry) = self.state.categories.iter_mut().find(|c| c.id == id) {
            if let Some(name) = &update.name {
                entry.name = name.clone();
            }
            if let Some(color) = &update.color {
                entry.color = color.clone();
            }
        }

        match self.api.update_category(id, update).await {
            Ok(category) => {
                self.state.reconcile_category(category.clone());
                Ok(category)
            }
            Err(err) => Err(self.rollback(snapshot, err)),
        }
    }

    /// Removes the category and detaches it from every local note.
    pub async fn delete_category(&mut self, id: i32) -> ClientResult<()> {
        let snapshot = self.state.clone();
        self.state.categories.retain(|c| c.id != id);
        for entry in &mut self.state.notes {
            entry.category_ids.remove(&id);
        }

        match self.api.delete_category(id).await {
            Ok(()) => Ok(()),
            Err(err) => Err(self.rollback(snapshot, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::DateTime;

    use super::*;
    use crate::dto::notes::NoteDetailDto;

    fn note(id: i32, is_archived: bool) -> NoteDto {
        let at = DateTime::from_timestamp(i64::from(id), 0).unwrap().naive_utc();
        NoteDto {
            id,
            title: format!("Note {id}"),
            content: String::new(),
            is_archived,
            created_at: at,
            updated_at: at,
        }
    }

    fn category(id: i32, name: &str) -> CategoryDto {
        CategoryDto {
            id,
            name: name.into(),
            color: "bg-red-100 text-red-800".into(),
        }
    }

    /// In-memory stand-in for the server that can be told to fail.
    #[derive(Default)]
    struct FakeApi {
        notes: RefCell<Vec<NoteDto>>,
        categories: RefCell<Vec<CategoryDto>>,
        links: RefCell<BTreeSet<(i32, i32)>>,
        fail: Cell<bool>,
        detail_requests: Cell<usize>,
    }

    impl FakeApi {
        fn check(&self) -> ClientResult<()> {
            if self.fail.get() {
                Err(ClientError::new("Request failed."))
            } else {
                Ok(())
            }
        }

        fn find_note(&self, id: i32) -> ClientResult<NoteDto> {
            self.notes
                .borrow()
                .iter()
                .find(|n| n.id == id)
                .cloned()
                .ok_or_else(|| ClientError::new("Note not found."))
        }
    }

    impl NotesApi for FakeApi {
        async fn list_notes(&self, active: bool) -> ClientResult<Vec<NoteDto>> {
            self.check()?;
            Ok(self
                .notes
                .borrow()
                .iter()
                .filter(|n| n.is_archived != active)
                .cloned()
                .collect())
        }

        async fn get_note(&self, id: i32) -> ClientResult<NoteDetailDto> {
            self.check()?;
            self.detail_requests.set(self.detail_requests.get() + 1);
            let note = self.find_note(id)?;
            let categories = self
                .categories
                .borrow()
                .iter()
                .filter(|c| self.links.borrow().contains(&(id, c.id)))
                .cloned()
                .collect();
            Ok(NoteDetailDto { note, categories })
        }

        async fn create_note(&self, draft: &NoteDraft) -> ClientResult<NoteDto> {
            self.check()?;
            let id = self.notes.borrow().len() as i32 + 100;
            let mut created = note(id, draft.is_archived.unwrap_or(false));
            created.title = draft.title.clone();
            created.content = draft.content.clone();
            self.notes.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update_note(&self, id: i32, update: &NoteUpdate) -> ClientResult<NoteDto> {
            self.check()?;
            let mut notes = self.notes.borrow_mut();
            let stored = notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| ClientError::new("Note not found."))?;
            if let Some(title) = &update.title {
                stored.title = title.clone();
            }
            if let Some(content) = &update.content {
                stored.content = content.clone();
            }
            if let Some(is_archived) = update.is_archived {
                stored.is_archived = is_archived;
            }
            Ok(stored.clone())
        }

        async fn delete_note(&self, id: i32) -> ClientResult<()> {
            self.check()?;
            self.notes.borrow_mut().retain(|n| n.id != id);
            Ok(())
        }

        async fn toggle_archive(&self, id: i32) -> ClientResult<NoteDto> {
            self.check()?;
            let current = self.find_note(id)?;
            let update = NoteUpdate {
                is_archived: Some(!current.is_archived),
                ..NoteUpdate::default()
            };
            self.update_note(id, &update).await
        }

        async fn add_category_to_note(&self, note_id: i32, category_id: i32) -> ClientResult<()> {
            self.check()?;
            self.links.borrow_mut().insert((note_id, category_id));
            Ok(())
        }

        async fn remove_category_from_note(
            &self,
            note_id: i32,
            category_id: i32,
        ) -> ClientResult<()> {
            self.check()?;
            self.links.borrow_mut().remove(&(note_id, category_id));
            Ok(())
        }

        async fn list_notes_by_category(
            &self,
            category_id: i32,
            active: bool,
        ) -> ClientResult<Vec<NoteDto>> {
            let notes = self.list_notes(active).await?;
            Ok(notes
                .into_iter()
                .filter(|n| self.links.borrow().contains(&(n.id, category_id)))
                .collect())
        }

        async fn list_categories(&self) -> ClientResult<Vec<CategoryDto>> {
            self.check()?;
            Ok(self.categories.borrow().clone())
        }

        async fn create_category(&self, draft: &CategoryDraft) -> ClientResult<CategoryDto> {
            self.check()?;
            let created = CategoryDto {
                id: self.categories.borrow().len() as i32 + 100,
                name: draft.name.clone(),
                color: draft.color.clone(),
            };
            self.categories.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update_category(
            &self,
            id: i32,
            update: &CategoryUpdate,
        ) -> ClientResult<CategoryDto> {
            self.check()?;
            let mut categories = self.categories.borrow_mut();
            let stored = categories
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| ClientError::new("Category not found."))?;
            if let Some(name) = &update.name {
                stored.name = name.clone();
            }
            if let Some(color) = &update.color {
                stored.color = color.clone();
            }
            Ok(stored.clone())
        }

        async fn delete_category(&self, id: i32) -> ClientResult<()> {
            self.check()?;
            self.categories.borrow_mut().retain(|c| c.id != id);
            self.links.borrow_mut().retain(|(_, category_id)| *category_id != id);
            Ok(())
        }
    }

    async fn loaded_board() -> NoteBoard<FakeApi> {
        let api = FakeApi::default();
        api.notes
            .borrow_mut()
            .extend([note(1, false), note(2, false), note(3, true)]);
        api.categories
            .borrow_mut()
            .extend([category(10, "Work"), category(11, "Ideas")]);
        api.links.borrow_mut().insert((1, 10));

        let mut board = NoteBoard::new(api);
        board.load().await.unwrap();
        board
    }

    #[actix_web::test]
    async fn load_builds_view_with_category_ids() {
        let board = loaded_board().await;

        assert_eq!(board.state().notes.len(), 3);
        assert_eq!(board.state().categories.len(), 2);
        assert_eq!(board.visible_notes(false, None).len(), 2);
        assert_eq!(board.visible_notes(true, None).len(), 1);

        let work = board.visible_notes(false, Some(10));
        assert_eq!(work.len(), 1);
        assert_eq!(work[0].note.id, 1);
    }

    #[actix_web::test]
    async fn load_collects_links_without_per_note_requests() {
        let board = loaded_board().await;

        assert_eq!(board.api().detail_requests.get(), 0);
        let first = board
            .state()
            .notes
            .iter()
            .find(|n| n.note.id == 1)
            .unwrap();
        assert_eq!(first.category_ids, BTreeSet::from([10]));
    }

    #[actix_web::test]
    async fn load_orders_categories_by_name() {
        let board = loaded_board().await;

        let names: Vec<_> = board
            .state()
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ideas", "Work"]);
    }

    #[actix_web::test]
    async fn toggle_archive_reconciles_with_server() {
        let mut board = loaded_board().await;

        let note = board.toggle_archive(2).await.unwrap();
        assert!(note.is_archived);
        assert_eq!(board.visible_notes(true, None).len(), 2);
    }

    #[actix_web::test]
    async fn failed_toggle_restores_previous_state() {
        let mut board = loaded_board().await;
        let before = board.state().clone();
        board.api().fail.set(true);

        let err = board.toggle_archive(2).await.unwrap_err();
        assert_eq!(err.message(), "Request failed.");
        assert_eq!(board.state(), &before);
    }

    #[actix_web::test]
    async fn failed_delete_restores_note() {
        let mut board = loaded_board().await;
        board.api().fail.set(true);

        assert!(board.delete_note(1).await.is_err());
        assert!(board.state().notes.iter().any(|n| n.note.id == 1));
    }

    #[actix_web::test]
    async fn category_links_update_optimistically() {
        let mut board = loaded_board().await;

        board.add_category(2, 11).await.unwrap();
        board.add_category(2, 11).await.unwrap();
        assert_eq!(board.visible_notes(false, Some(11)).len(), 1);
        assert_eq!(board.api().links.borrow().len(), 2);

        board.remove_category(2, 11).await.unwrap();
        assert!(board.visible_notes(false, Some(11)).is_empty());

        board.api().fail.set(true);
        assert!(board.add_category(2, 11).await.is_err());
        assert!(board.visible_notes(false, Some(11)).is_empty());
    }

    #[actix_web::test]
    async fn deleting_category_detaches_local_notes() {
        let mut board = loaded_board().await;

        board.delete_category(10).await.unwrap();
        assert!(board.state().categories.iter().all(|c| c.id != 10));
        assert!(board.visible_notes(false, Some(10)).is_empty());
        assert!(board.api().links.borrow().is_empty());
    }

    #[actix_web::test]
    async fn failed_category_update_keeps_old_name() {
        let mut board = loaded_board().await;
        board.api().fail.set(true);

        let update = CategoryUpdate {
            name: Some("Office".into()),
            color: None,
        };
        assert!(board.update_category(10, &update).await.is_err());
        assert!(board.state().categories.iter().any(|c| c.name == "Work"));
    }

    #[actix_web::test]
    async fn renamed_category_keeps_name_order() {
        let mut board = loaded_board().await;

        let update = CategoryUpdate {
            name: Some("Admin".into()),
            color: None,
        };
        board.update_category(10, &update).await.unwrap();

        let ids: Vec<_> = board.state().categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(board.state().categories[0].name, "Admin");
    }

    #[actix_web::test]
    async fn created_note_is_shown_first() {
        let mut board = loaded_board().await;
        let draft = NoteDraft {
            title: "Fresh".into(),
            content: "text".into(),
            is_archived: None,
        };

        let created = board.create_note(&draft).await.unwrap();
        assert_eq!(board.visible_notes(false, None)[0].note.id, created.id);
    }
}
