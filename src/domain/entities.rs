//! Domain entities: authors, magazines and the articles joining them

use std::fmt;

use generational_arena::Index;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            /// Tag of the issuing catalog
            pub(crate) catalog: u64,
            pub(crate) index: Index,
        }

        impl $name {
            pub(crate) fn new(catalog: u64, index: Index) -> Self {
                Self { catalog, index }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let (slot, generation) = self.index.into_raw_parts();
                write!(f, concat!($label, "#{}:{}.{}"), self.catalog, slot, generation)
            }
        }
    };
}

entity_id!(
    /// Handle to an [`Author`] stored in a [`Catalog`](crate::domain::Catalog).
    AuthorId,
    "author"
);
entity_id!(
    /// Handle to a [`Magazine`] stored in a [`Catalog`](crate::domain::Catalog).
    MagazineId,
    "magazine"
);
entity_id!(
    /// Handle to an [`Article`] stored in a [`Catalog`](crate::domain::Catalog).
    ArticleId,
    "article"
);

/// A writer. Owns nothing but the index of articles written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub(crate) name: String,
    /// Back-references, in the order the articles were bound to this author
    pub(crate) articles: Vec<ArticleId>,
}

impl Author {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            articles: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn articles(&self) -> &[ArticleId] {
        &self.articles
    }
}

/// A publication with a topic category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Magazine {
    pub(crate) name: String,
    pub(crate) category: String,
    /// Back-references, in the order the articles were bound to this magazine
    pub(crate) articles: Vec<ArticleId>,
}

impl Magazine {
    pub(crate) fn new(name: String, category: String) -> Self {
        Self {
            name,
            category,
            articles: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn articles(&self) -> &[ArticleId] {
        &self.articles
    }
}

/// Join entity binding exactly one author to exactly one magazine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub(crate) title: String,
    pub(crate) author: AuthorId,
    pub(crate) magazine: MagazineId,
}

impl Article {
    pub(crate) fn new(title: String, author: AuthorId, magazine: MagazineId) -> Self {
        Self {
            title,
            author,
            magazine,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> AuthorId {
        self.author
    }

    pub fn magazine(&self) -> MagazineId {
        self.magazine
    }
}

/// Append `id` unless already present; collections never hold duplicates.
pub(crate) fn push_unique(ids: &mut Vec<ArticleId>, id: ArticleId) -> bool {
    if ids.contains(&id) {
        false
    } else {
        ids.push(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_id_when_displayed_then_shows_label_catalog_slot_and_generation() {
        let id = AuthorId::new(7, Index::from_raw_parts(3, 1));
        assert_eq!(id.to_string(), "author#7:3.1");
    }

    #[test]
    fn given_existing_id_when_push_unique_then_collection_unchanged() {
        let a = ArticleId::new(0, Index::from_raw_parts(0, 0));
        let b = ArticleId::new(0, Index::from_raw_parts(1, 0));
        let mut ids = vec![a];

        assert!(!push_unique(&mut ids, a));
        assert!(push_unique(&mut ids, b));
        assert_eq!(ids, vec![a, b]);
    }
}
