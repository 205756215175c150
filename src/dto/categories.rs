use serde::{Deserialize, Serialize};

use crate::domain::category::Category;

/// Category as exposed over the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub color: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            color: value.color.into_inner(),
        }
    }
}
