use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, CategoryChanges as DomainCategoryChanges,
    NewCategory as DomainNewCategory,
};
use crate::domain::types::{CategoryColor, CategoryName, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChanges<'a> {
    pub name: Option<&'a str>,
    pub color: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.name)?,
            color: CategoryColor::new(category.color)?,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCategory> for NewCategory<'a> {
    fn from(category: &'a DomainNewCategory) -> Self {
        Self {
            name: category.name.as_str(),
            color: category.color.as_str(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl<'a> CategoryChanges<'a> {
    pub fn new(changes: &'a DomainCategoryChanges, updated_at: NaiveDateTime) -> Self {
        Self {
            name: changes.name.as_ref().map(CategoryName::as_str),
            color: changes.color.as_ref().map(CategoryColor::as_str),
            updated_at,
        }
    }
}
