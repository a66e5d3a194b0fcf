//! Domain layer: entities, validation and the relationship graph
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod catalog;
pub mod entities;
pub mod error;
pub mod queries;
pub mod validation;

pub use catalog::Catalog;
pub use entities::{Article, ArticleId, Author, AuthorId, Magazine, MagazineId};
pub use error::{DomainError, DomainResult, ValidationError};
pub use queries::{ArticleView, AuthorView, MagazineView};
pub use validation::{LengthRange, ValidationRules};
