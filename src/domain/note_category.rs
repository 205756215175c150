use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, NoteId};

/// Link between a note and a category. The pair is unique.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NoteCategory {
    pub note_id: NoteId,
    pub category_id: CategoryId,
}
