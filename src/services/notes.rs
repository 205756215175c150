use crate::domain::note::{Note, NoteChanges, NoteWithCategories};
use crate::domain::types::{ArchiveState, CategoryId, NoteId};
use crate::dto::categories::CategoryDto;
use crate::dto::notes::{NoteDetailDto, NoteDto};
use crate::forms::notes::CreateNoteFormPayload;
use crate::repository::{CategoryReader, NoteListQuery, NoteReader, NoteWriter};
use crate::services::categories::require_category;

use super::{ServiceError, ServiceResult};

/// Loads a note or fails with [`ServiceError::NotFound`].
pub(crate) fn require_note<R>(id: NoteId, repo: &R) -> ServiceResult<Note>
where
    R: NoteReader,
{
    match repo.get_note_by_id(id) {
        Ok(Some(note)) => Ok(note),
        Ok(None) => Err(ServiceError::note_not_found(id)),
        Err(e) => {
            log::error!("Failed to get note {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn load_notes<R>(query: NoteListQuery, repo: &R) -> ServiceResult<Vec<NoteDto>>
where
    R: NoteReader,
{
    match repo.list_notes(query) {
        Ok(notes) => Ok(notes.into_iter().map(NoteDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list notes: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Notes on one side of the archive partition, newest first.
///
/// `active_only == true` lists notes that are not archived, `false` lists the
/// archived ones.
pub fn list_notes<R>(active_only: bool, repo: &R) -> ServiceResult<Vec<NoteDto>>
where
    R: NoteReader,
{
    load_notes(NoteListQuery::new(ArchiveState::from_active(active_only)), repo)
}

pub fn get_note<R>(id: NoteId, repo: &R) -> ServiceResult<NoteDto>
where
    R: NoteReader,
{
    require_note(id, repo).map(NoteDto::from)
}

/// Fetches a note together with the categories attached to it.
pub fn get_note_with_categories<R>(id: NoteId, repo: &R) -> ServiceResult<NoteDetailDto>
where
    R: NoteReader,
{
    let note = require_note(id, repo)?;

    let categories = repo.list_categories_for_note(id).map_err(|e| {
        log::error!("Failed to list categories for note {id}: {e}");
        ServiceError::Internal
    })?;

    Ok(NoteWithCategories { note, categories }.into())
}

pub fn create_note<R>(payload: CreateNoteFormPayload, repo: &R) -> ServiceResult<NoteDto>
where
    R: NoteWriter,
{
    let note = payload.into_new_note();
    match repo.create_note(&note) {
        Ok(created) => {
            log::info!("Created note {}", created.id);
            Ok(created.into())
        }
        Err(e) => {
            log::error!("Failed to create note: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Applies the fields present in `changes` to an existing note.
///
/// An update carrying no fields returns the note unchanged.
pub fn update_note<R>(id: NoteId, changes: NoteChanges, repo: &R) -> ServiceResult<NoteDto>
where
    R: NoteReader + NoteWriter,
{
    let note = require_note(id, repo)?;
    if changes.is_empty() {
        return Ok(note.into());
    }

    match repo.update_note(id, &changes) {
        Ok(Some(updated)) => Ok(updated.into()),
        Ok(None) => Err(ServiceError::note_not_found(id)),
        Err(e) => {
            log::error!("Failed to update note {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes a note. Its category links are removed in the same transaction.
pub fn delete_note<R>(id: NoteId, repo: &R) -> ServiceResult<()>
where
    R: NoteReader + NoteWriter,
{
    require_note(id, repo)?;

    match repo.delete_note(id) {
        Ok(_) => {
            log::info!("Deleted note {id}");
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete note {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Moves a note to the other side of the archive partition.
pub fn toggle_archive<R>(id: NoteId, repo: &R) -> ServiceResult<NoteDto>
where
    R: NoteReader + NoteWriter,
{
    let note = require_note(id, repo)?;
    let target = note.archive_state().toggled();

    match repo.update_note(id, &NoteChanges::archived(target.is_archived())) {
        Ok(Some(updated)) => Ok(updated.into()),
        Ok(None) => Err(ServiceError::note_not_found(id)),
        Err(e) => {
            log::error!("Failed to toggle archive state of note {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Attaches a category to a note. Attaching an already attached category is
/// a no-op.
pub fn add_category_to_note<R>(
    note_id: NoteId,
    category_id: CategoryId,
    repo: &R,
) -> ServiceResult<()>
where
    R: NoteReader + NoteWriter + CategoryReader,
{
    require_note(note_id, repo)?;
    require_category(category_id, repo)?;

    let linked = repo
        .note_has_category(note_id, category_id)
        .map_err(|e| {
            log::error!("Failed to check category {category_id} on note {note_id}: {e}");
            ServiceError::Internal
        })?;
    if linked {
        return Ok(());
    }

    match repo.add_category_to_note(note_id, category_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to add category {category_id} to note {note_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Detaches a category from a note. Detaching a category that is not attached
/// is a no-op.
pub fn remove_category_from_note<R>(
    note_id: NoteId,
    category_id: CategoryId,
    repo: &R,
) -> ServiceResult<()>
where
    R: NoteReader + NoteWriter + CategoryReader,
{
    require_note(note_id, repo)?;
    require_category(category_id, repo)?;

    let linked = repo
        .note_has_category(note_id, category_id)
        .map_err(|e| {
            log::error!("Failed to check category {category_id} on note {note_id}: {e}");
            ServiceError::Internal
        })?;
    if !linked {
        return Ok(());
    }

    match repo.remove_category_from_note(note_id, category_id) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to remove category {category_id} from note {note_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_notes_by_category<R>(
    category_id: CategoryId,
    active_only: bool,
    repo: &R,
) -> ServiceResult<Vec<NoteDto>>
where
    R: NoteReader + CategoryReader,
{
    require_category(category_id, repo)?;

    let query = NoteListQuery::new(ArchiveState::from_active(active_only)).category(category_id);
    load_notes(query, repo)
}

pub fn list_categories_for_note<R>(note_id: NoteId, repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: NoteReader,
{
    require_note(note_id, repo)?;

    match repo.list_categories_for_note(note_id) {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories for note {note_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
