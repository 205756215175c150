//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers and labels are validated once at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

id_newtype!(NoteId, "Unique identifier for a note.", "note_id");
id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);

non_empty_string_newtype!(
    CategoryName,
    "Category label enforcing non-empty values.",
    "category name"
);
non_empty_string_newtype!(
    CategoryColor,
    "Opaque display-style token (a CSS class list) attached to a category.",
    "category color"
);

/// Archive partition a note belongs to.
///
/// Every note is in exactly one of the two states; list queries select one
/// side of the partition.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveState {
    #[default]
    Active,
    Archived,
}

impl ArchiveState {
    /// Maps an `active` flag as used by the HTTP API onto a state.
    pub const fn from_active(active: bool) -> Self {
        if active { Self::Active } else { Self::Archived }
    }

    /// Maps the persisted `is_archived` column onto a state.
    pub const fn from_archived(is_archived: bool) -> Self {
        if is_archived {
            Self::Archived
        } else {
            Self::Active
        }
    }

    /// Value of the `is_archived` column for notes in this state.
    pub const fn is_archived(self) -> bool {
        matches!(self, Self::Archived)
    }

    /// The opposite side of the partition.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Archived,
            Self::Archived => Self::Active,
        }
    }

    /// String representation used in templates and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl Display for ArchiveState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ArchiveState {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "archive state: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_category_names() {
        let value = CategoryName::new("  Work  ").unwrap();
        assert_eq!(value.as_str(), "Work");
    }

    #[test]
    fn rejects_blank_category_colors() {
        let err = CategoryColor::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("category color"));
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = NoteId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("note_id"));
        assert!(CategoryId::new(-3).is_err());
    }

    #[test]
    fn archive_state_is_a_partition() {
        for state in [ArchiveState::Active, ArchiveState::Archived] {
            assert_ne!(state, state.toggled());
            assert_eq!(state, state.toggled().toggled());
            assert_eq!(ArchiveState::from_archived(state.is_archived()), state);
        }
        assert_eq!(ArchiveState::from_active(true), ArchiveState::Active);
        assert_eq!(ArchiveState::from_active(false), ArchiveState::Archived);
    }

    #[test]
    fn parses_archive_state() {
        assert_eq!(
            ArchiveState::try_from(" archived ").unwrap(),
            ArchiveState::Archived
        );
        assert!(ArchiveState::try_from("deleted").is_err());
    }
}
