use chrono::Utc;
use diesel::prelude::*;

use crate::domain::category::{Category, CategoryChanges, NewCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{
    Category as DbCategory, CategoryChanges as DbCategoryChanges, NewCategory as DbNewCategory,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order((categories::name.asc(), categories::id.asc()))
            .select(DbCategory::as_select())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id.get())
            .select(DbCategory::as_select())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category = DbNewCategory::from(category);

        let created = diesel::insert_into(categories::table)
            .values(&db_category)
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_category(
        &self,
        id: CategoryId,
        changes: &CategoryChanges,
    ) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_changes = DbCategoryChanges::new(changes, Utc::now().naive_utc());

        let updated = diesel::update(categories::table.find(id.get()))
            .set(&db_changes)
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)
            .optional()?;

        let updated = updated.map(TryInto::try_into).transpose()?;
        Ok(updated)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::{categories, note_categories};

        let mut conn = self.conn()?;

        // Links go first so no join row outlives its category.
        let affected = conn.transaction(|conn| {
            diesel::delete(
                note_categories::table.filter(note_categories::category_id.eq(id.get())),
            )
            .execute(conn)?;

            diesel::delete(categories::table.find(id.get())).execute(conn)
        })?;

        Ok(affected)
    }
}
