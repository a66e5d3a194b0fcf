//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::{ArticleId, AuthorId, MagazineId};

/// Input rejected by a constructor or setter.
///
/// Raised before any mutation, so a failed call leaves the catalog untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("author name must be a non-empty string")]
    EmptyAuthorName,

    #[error("magazine name must be between {min} and {max} characters, got {len}")]
    MagazineNameLength { len: usize, min: usize, max: usize },

    #[error("magazine category must be a non-empty string")]
    EmptyCategory,

    #[error("article title must be between {min} and {max} characters, got {len}")]
    TitleLength { len: usize, min: usize, max: usize },
}

/// Domain errors represent business logic violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("unknown author: {0}")]
    UnknownAuthor(AuthorId),

    #[error("unknown magazine: {0}")]
    UnknownMagazine(MagazineId),

    #[error("unknown article: {0}")]
    UnknownArticle(ArticleId),

    #[error("inconsistent graph: {0}")]
    Inconsistent(String),
}

/// Result type for catalog operations.
pub type DomainResult<T> = Result<T, DomainError>;
