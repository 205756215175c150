use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryColor, CategoryId, CategoryName};

/// User-defined label used to group notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub color: CategoryColor,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub color: CategoryColor,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`Category`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryChanges {
    pub name: Option<CategoryName>,
    pub color: Option<CategoryColor>,
}

impl CategoryChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}
