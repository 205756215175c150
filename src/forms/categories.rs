use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{CategoryChanges, NewCategory};
use crate::domain::types::{CategoryColor, CategoryName, TypeConstraintError};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryForm {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 128))]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryFormPayload {
    pub name: CategoryName,
    pub color: CategoryColor,
}

impl CreateCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            color: self.color,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub color: Option<String>,
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateCategoryForm> for CreateCategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(value: CreateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: CategoryName::new(value.name)?,
            color: CategoryColor::new(value.color)?,
        })
    }
}

impl TryFrom<UpdateCategoryForm> for CategoryChanges {
    type Error = CategoryFormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: value.name.map(CategoryName::new).transpose()?,
            color: value.color.map(CategoryColor::new).transpose()?,
        })
    }
}
