use crate::domain::category::{Category, CategoryChanges};
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::CreateCategoryFormPayload;
use crate::repository::{CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

/// Loads a category or fails with [`ServiceError::NotFound`].
pub(crate) fn require_category<R>(id: CategoryId, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::category_not_found(id)),
        Err(e) => {
            log::error!("Failed to get category {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_category<R>(id: CategoryId, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    require_category(id, repo).map(CategoryDto::from)
}

pub fn create_category<R>(payload: CreateCategoryFormPayload, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    let category = payload.into_new_category();
    match repo.create_category(&category) {
        Ok(created) => {
            log::info!("Created category {} ({})", created.id, created.name);
            Ok(created.into())
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_category<R>(
    id: CategoryId,
    changes: CategoryChanges,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter,
{
    let category = require_category(id, repo)?;
    if changes.is_empty() {
        return Ok(category.into());
    }

    match repo.update_category(id, &changes) {
        Ok(Some(updated)) => Ok(updated.into()),
        Ok(None) => Err(ServiceError::category_not_found(id)),
        Err(e) => {
            log::error!("Failed to update category {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes a category after detaching it from every note.
///
/// Both steps run in one store transaction, so an interrupted deletion leaves
/// neither the category nor orphaned links behind.
pub fn delete_category<R>(id: CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    require_category(id, repo)?;

    match repo.delete_category(id) {
        Ok(_) => {
            log::info!("Deleted category {id}");
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete category {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
