//! Persistence-agnostic domain entities.

pub mod category;
pub mod note;
pub mod note_category;
pub mod types;
