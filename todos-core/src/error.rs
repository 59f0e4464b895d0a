//! Error types for list store operations.
//!
//! Every variant's `Display` is the message shown to the user, so the
//! request layer can surface errors without further formatting.

use thiserror::Error;

/// Rejected input: bad name length or a duplicate list name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("List name must be between 1 and 100 characters.")]
    ListNameLength,

    #[error("List name must be unique.")]
    ListNameTaken,

    #[error("Todo must be between 1 and 100 characters.")]
    TodoNameLength,
}

/// A list or todo index that does not address an element.
///
/// The id is kept as text so that unparsable ids from a request path are
/// reported the same way as out-of-range ones.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("List with the id {0} was not found.")]
    List(String),

    #[error("Todo with the id {0} was not found.")]
    Todo(String),
}

impl NotFoundError {
    pub fn list(id: impl ToString) -> Self {
        Self::List(id.to_string())
    }

    pub fn todo(id: impl ToString) -> Self {
        Self::Todo(id.to_string())
    }
}

/// Any failure of a list store operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
