use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested note or category does not exist. Carries a message naming
    /// the missing id.
    #[error("{0}")]
    NotFound(String),
    /// Client supplied malformed or constraint-violating input.
    #[error("{0}")]
    Validation(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl ServiceError {
    pub fn note_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Note with ID {id} not found"))
    }

    pub fn category_not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Category with ID {id} not found"))
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
