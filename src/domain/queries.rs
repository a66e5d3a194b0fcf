//! Read-only views over catalog entities.
//!
//! Every derived set (an author's magazines, a magazine's contributors, topic
//! areas) is recomputed from the article lists on each call; nothing is
//! cached. Queries over an entity without articles return an empty `Vec`.

use std::fmt;

use itertools::Itertools;

use crate::domain::catalog::Catalog;
use crate::domain::entities::{Article, ArticleId, Author, AuthorId, Magazine, MagazineId};
use crate::domain::error::DomainResult;

/// Resolve article handles, skipping any that no longer exist.
fn resolve<'a>(
    catalog: &'a Catalog,
    ids: &'a [ArticleId],
) -> impl Iterator<Item = &'a Article> + 'a {
    ids.iter()
        .filter_map(move |&id| catalog.article_entry(id).ok())
}

#[derive(Clone, Copy)]
pub struct AuthorView<'a> {
    catalog: &'a Catalog,
    id: AuthorId,
    author: &'a Author,
}

impl<'a> AuthorView<'a> {
    pub(crate) fn new(catalog: &'a Catalog, id: AuthorId, author: &'a Author) -> Self {
        Self {
            catalog,
            id,
            author,
        }
    }

    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        self.author.name()
    }

    pub fn articles(&self) -> &'a [ArticleId] {
        self.author.articles()
    }

    /// Distinct magazines this author has written for, in first-appearance order.
    pub fn magazines(&self) -> Vec<MagazineId> {
        resolve(self.catalog, self.author.articles())
            .map(|article| article.magazine())
            .unique()
            .collect()
    }

    /// Sorted, de-duplicated categories of the magazines written for.
    pub fn topic_areas(&self) -> Vec<String> {
        resolve(self.catalog, self.author.articles())
            .filter_map(|article| self.catalog.magazine_entry(article.magazine()).ok())
            .map(|magazine| magazine.category().to_string())
            .sorted()
            .dedup()
            .collect()
    }
}

impl fmt::Debug for AuthorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorView")
            .field("id", &self.id)
            .field("name", &self.author.name)
            .field("articles", &self.author.articles.len())
            .finish()
    }
}

#[derive(Clone, Copy)]
pub struct MagazineView<'a> {
    catalog: &'a Catalog,
    id: MagazineId,
    magazine: &'a Magazine,
}

impl<'a> MagazineView<'a> {
    pub(crate) fn new(catalog: &'a Catalog, id: MagazineId, magazine: &'a Magazine) -> Self {
        Self {
            catalog,
            id,
            magazine,
        }
    }

    pub fn id(&self) -> MagazineId {
        self.id
    }

    pub(crate) fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn name(&self) -> &'a str {
        self.magazine.name()
    }

    pub fn category(&self) -> &'a str {
        self.magazine.category()
    }

    pub fn articles(&self) -> &'a [ArticleId] {
        self.magazine.articles()
    }

    /// Titles in article order.
    pub fn article_titles(&self) -> Vec<String> {
        resolve(self.catalog, self.magazine.articles())
            .map(|article| article.title().to_string())
            .collect()
    }

    /// Distinct authors published here, in first-appearance order.
    pub fn contributors(&self) -> Vec<AuthorId> {
        resolve(self.catalog, self.magazine.articles())
            .map(|article| article.author())
            .unique()
            .collect()
    }

    /// Authors with more than `contributor_threshold` articles in this magazine.
    pub fn contributing_authors(&self) -> Vec<AuthorId> {
        let threshold = self.catalog.rules().contributor_threshold;
        let counts = resolve(self.catalog, self.magazine.articles())
            .map(|article| article.author())
            .counts();
        self.contributors()
            .into_iter()
            .filter(|author| counts.get(author).copied().unwrap_or(0) > threshold)
            .collect()
    }
}

impl fmt::Debug for MagazineView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MagazineView")
            .field("id", &self.id)
            .field("name", &self.magazine.name)
            .field("category", &self.magazine.category)
            .field("articles", &self.magazine.articles.len())
            .finish()
    }
}

#[derive(Clone, Copy)]
pub struct ArticleView<'a> {
    catalog: &'a Catalog,
    id: ArticleId,
    article: &'a Article,
}

impl<'a> ArticleView<'a> {
    pub(crate) fn new(catalog: &'a Catalog, id: ArticleId, article: &'a Article) -> Self {
        Self {
            catalog,
            id,
            article,
        }
    }

    pub fn id(&self) -> ArticleId {
        self.id
    }

    pub fn title(&self) -> &'a str {
        self.article.title()
    }

    pub fn author_id(&self) -> AuthorId {
        self.article.author()
    }

    pub fn magazine_id(&self) -> MagazineId {
        self.article.magazine()
    }

    pub fn author(&self) -> DomainResult<AuthorView<'a>> {
        self.catalog.author(self.article.author())
    }

    pub fn magazine(&self) -> DomainResult<MagazineView<'a>> {
        self.catalog.magazine(self.article.magazine())
    }
}

impl fmt::Debug for ArticleView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleView")
            .field("id", &self.id)
            .field("title", &self.article.title)
            .field("author", &self.article.author)
            .field("magazine", &self.article.magazine)
            .finish()
    }
}
