//! Many-to-many relationship model of authors, magazines and articles.
//!
//! A [`Catalog`] owns every entity; handles ([`AuthorId`], [`MagazineId`],
//! [`ArticleId`]) address them. Creating an article is the only operation
//! that links an author to a magazine, and it registers the article with both
//! parents in one step.
//!
//! ```
//! use masthead::Catalog;
//!
//! let mut catalog = Catalog::new();
//! let jane = catalog.add_author("Jane Doe")?;
//! let vogue = catalog.add_magazine("Vogue", "Fashion")?;
//! catalog.add_article(jane, vogue, "A Day in the Life")?;
//!
//! assert_eq!(catalog.author(jane)?.topic_areas(), vec!["Fashion".to_string()]);
//! assert_eq!(catalog.top_publisher().map(|m| m.id()), Some(vogue));
//! # Ok::<(), masthead::DomainError>(())
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod tree_traits;
pub mod util;

pub use config::Settings;
pub use domain::{
    ArticleId, ArticleView, AuthorId, AuthorView, Catalog, DomainError, DomainResult,
    MagazineId, MagazineView, ValidationError, ValidationRules,
};
pub use errors::{SettingsError, SettingsResult};
