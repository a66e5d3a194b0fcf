use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::entities::{
    push_unique, Article, ArticleId, Author, AuthorId, Magazine, MagazineId,
};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::queries::{ArticleView, AuthorView, MagazineView};
use crate::domain::validation::ValidationRules;

static NEXT_CATALOG_TAG: AtomicU64 = AtomicU64::new(0);

/// Arena-backed object graph of authors, magazines and articles.
///
/// Articles are the only relationship-forming entity: creating or re-parenting
/// one updates the back-reference lists of both parents in the same call.
/// The magazine and article registries record every entity in construction
/// order and live as long as the catalog, or until [`Catalog::clear`].
///
/// The catalog defines no internal synchronization; share it across threads
/// only behind the caller's own lock.
///
/// Every handle carries the tag of the catalog that issued it; handles from
/// another catalog are rejected like stale ones.
#[derive(Debug)]
pub struct Catalog {
    tag: u64,
    authors: Arena<Author>,
    magazines: Arena<Magazine>,
    articles: Arena<Article>,
    author_registry: Vec<AuthorId>,
    magazine_registry: Vec<MagazineId>,
    article_registry: Vec<ArticleId>,
    rules: ValidationRules,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::with_rules(ValidationRules::default())
    }

    pub fn with_rules(rules: ValidationRules) -> Self {
        Self {
            tag: NEXT_CATALOG_TAG.fetch_add(1, Ordering::Relaxed),
            authors: Arena::new(),
            magazines: Arena::new(),
            articles: Arena::new(),
            author_registry: Vec::new(),
            magazine_registry: Vec::new(),
            article_registry: Vec::new(),
            rules,
        }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    // ------------------------------------------------------------
    // Construction and mutation
    // ------------------------------------------------------------

    #[instrument(level = "trace", skip(self))]
    pub fn add_author(&mut self, name: &str) -> DomainResult<AuthorId> {
        self.rules.author_name(name)?;
        let index = self.authors.insert(Author::new(name.to_string()));
        let id = AuthorId::new(self.tag, index);
        self.author_registry.push(id);
        debug!("add_author: {} name={:?}", id, name);
        Ok(id)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn rename_author(&mut self, author: AuthorId, name: &str) -> DomainResult<()> {
        self.rules.author_name(name)?;
        self.author_entry_mut(author)?.name = name.to_string();
        debug!("rename_author: {} name={:?}", author, name);
        Ok(())
    }

    /// Create a magazine and append it to the magazine registry.
    #[instrument(level = "trace", skip(self))]
    pub fn add_magazine(&mut self, name: &str, category: &str) -> DomainResult<MagazineId> {
        self.rules.magazine_name(name)?;
        self.rules.category(category)?;
        let id = MagazineId::new(
            self.tag,
            self.magazines
                .insert(Magazine::new(name.to_string(), category.to_string())),
        );
        self.magazine_registry.push(id);
        debug!(
            "add_magazine: {} name={:?} category={:?}",
            id, name, category
        );
        Ok(id)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn rename_magazine(&mut self, magazine: MagazineId, name: &str) -> DomainResult<()> {
        self.rules.magazine_name(name)?;
        self.magazine_entry_mut(magazine)?.name = name.to_string();
        debug!("rename_magazine: {} name={:?}", magazine, name);
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_category(&mut self, magazine: MagazineId, category: &str) -> DomainResult<()> {
        self.rules.category(category)?;
        self.magazine_entry_mut(magazine)?.category = category.to_string();
        debug!("set_category: {} category={:?}", magazine, category);
        Ok(())
    }

    /// Create an article written by `author` for `magazine`.
    ///
    /// Title and both handles are checked before anything is inserted, so a
    /// rejected article is never visible in either parent or the registry.
    #[instrument(level = "trace", skip(self))]
    pub fn add_article(
        &mut self,
        author: AuthorId,
        magazine: MagazineId,
        title: &str,
    ) -> DomainResult<ArticleId> {
        self.rules.title(title)?;
        self.author_entry(author)?;
        self.magazine_entry(magazine)?;

        let id = ArticleId::new(
            self.tag,
            self.articles
                .insert(Article::new(title.to_string(), author, magazine)),
        );
        push_unique(&mut self.author_entry_mut(author)?.articles, id);
        push_unique(&mut self.magazine_entry_mut(magazine)?.articles, id);
        self.article_registry.push(id);

        debug!(
            "add_article: {} author={} magazine={} title={:?}",
            id, author, magazine, title
        );
        Ok(id)
    }

    /// Bind an existing article to `magazine`, moving it out of its current one.
    pub fn attach_article(
        &mut self,
        magazine: MagazineId,
        article: ArticleId,
    ) -> DomainResult<()> {
        self.set_article_magazine(article, magazine)
    }

    /// Move `article` to `new_author`: removed from the old author's list,
    /// then appended to the new one. Same author is a no-op.
    #[instrument(level = "trace", skip(self))]
    pub fn set_article_author(
        &mut self,
        article: ArticleId,
        new_author: AuthorId,
    ) -> DomainResult<()> {
        self.author_entry(new_author)?;
        let old_author = self.article_entry(article)?.author;
        if old_author == new_author {
            return Ok(());
        }
        self.author_entry(old_author)?;

        self.author_entry_mut(old_author)?
            .articles
            .retain(|id| *id != article);
        self.article_entry_mut(article)?.author = new_author;
        push_unique(&mut self.author_entry_mut(new_author)?.articles, article);

        debug!(
            "set_article_author: {} {} -> {}",
            article, old_author, new_author
        );
        Ok(())
    }

    /// Move `article` to `new_magazine`, symmetric to [`Catalog::set_article_author`].
    #[instrument(level = "trace", skip(self))]
    pub fn set_article_magazine(
        &mut self,
        article: ArticleId,
        new_magazine: MagazineId,
    ) -> DomainResult<()> {
        self.magazine_entry(new_magazine)?;
        let old_magazine = self.article_entry(article)?.magazine;
        if old_magazine == new_magazine {
            return Ok(());
        }
        self.magazine_entry(old_magazine)?;

        self.magazine_entry_mut(old_magazine)?
            .articles
            .retain(|id| *id != article);
        self.article_entry_mut(article)?.magazine = new_magazine;
        push_unique(&mut self.magazine_entry_mut(new_magazine)?.articles, article);

        debug!(
            "set_article_magazine: {} {} -> {}",
            article, old_magazine, new_magazine
        );
        Ok(())
    }

    /// Drop every entity and reset both registries.
    ///
    /// Entries are removed one by one so the arenas bump their generations;
    /// handles issued before the reset are rejected afterwards.
    pub fn clear(&mut self) {
        debug!(
            "clear: authors={} magazines={} articles={}",
            self.authors.len(),
            self.magazines.len(),
            self.articles.len()
        );
        self.authors.retain(|_, _| false);
        self.magazines.retain(|_, _| false);
        self.articles.retain(|_, _| false);
        self.author_registry.clear();
        self.magazine_registry.clear();
        self.article_registry.clear();
    }

    // ------------------------------------------------------------
    // Lookup and registries
    // ------------------------------------------------------------

    pub fn author(&self, id: AuthorId) -> DomainResult<AuthorView<'_>> {
        Ok(AuthorView::new(self, id, self.author_entry(id)?))
    }

    pub fn magazine(&self, id: MagazineId) -> DomainResult<MagazineView<'_>> {
        Ok(MagazineView::new(self, id, self.magazine_entry(id)?))
    }

    pub fn article(&self, id: ArticleId) -> DomainResult<ArticleView<'_>> {
        Ok(ArticleView::new(self, id, self.article_entry(id)?))
    }

    /// Authors in construction order.
    pub fn authors(&self) -> impl Iterator<Item = AuthorView<'_>> + '_ {
        self.author_registry
            .iter()
            .filter_map(move |&id| self.author(id).ok())
    }

    /// Magazine registry, in construction order.
    pub fn magazines(&self) -> impl Iterator<Item = MagazineView<'_>> + '_ {
        self.magazine_registry
            .iter()
            .filter_map(move |&id| self.magazine(id).ok())
    }

    /// Article registry, in construction order.
    pub fn articles(&self) -> impl Iterator<Item = ArticleView<'_>> + '_ {
        self.article_registry
            .iter()
            .filter_map(move |&id| self.article(id).ok())
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn magazine_count(&self) -> usize {
        self.magazines.len()
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    /// Magazine with the most articles. Ties go to the magazine registered first.
    #[instrument(level = "debug", skip(self))]
    pub fn top_publisher(&self) -> Option<MagazineView<'_>> {
        let mut top: Option<(MagazineId, usize)> = None;
        for &id in &self.magazine_registry {
            let Some(magazine) = self.magazines.get(id.index) else {
                continue;
            };
            let count = magazine.articles.len();
            if top.map_or(true, |(_, best)| count > best) {
                top = Some((id, count));
            }
        }
        top.and_then(|(id, _)| self.magazine(id).ok())
    }

    /// Verify that every article sits exactly once in its author's and its
    /// magazine's list, and that no list holds a foreign article.
    pub fn check_consistency(&self) -> DomainResult<()> {
        for (index, article) in self.articles.iter() {
            let id = ArticleId::new(self.tag, index);
            let author = self.author_entry(article.author)?;
            let in_author = author.articles.iter().filter(|a| **a == id).count();
            if in_author != 1 {
                return Err(DomainError::Inconsistent(format!(
                    "{} listed {} times by {}",
                    id, in_author, article.author
                )));
            }
            let magazine = self.magazine_entry(article.magazine)?;
            let in_magazine = magazine.articles.iter().filter(|a| **a == id).count();
            if in_magazine != 1 {
                return Err(DomainError::Inconsistent(format!(
                    "{} listed {} times by {}",
                    id, in_magazine, article.magazine
                )));
            }
        }
        for (index, author) in self.authors.iter() {
            let owner = AuthorId::new(self.tag, index);
            for &id in &author.articles {
                if self.article_entry(id)?.author != owner {
                    return Err(DomainError::Inconsistent(format!(
                        "{} lists {} written by someone else",
                        owner, id
                    )));
                }
            }
        }
        for (index, magazine) in self.magazines.iter() {
            let owner = MagazineId::new(self.tag, index);
            for &id in &magazine.articles {
                if self.article_entry(id)?.magazine != owner {
                    return Err(DomainError::Inconsistent(format!(
                        "{} lists {} published elsewhere",
                        owner, id
                    )));
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------
    // Arena access
    // ------------------------------------------------------------

    /// Arena index for a handle issued by this catalog, `None` for foreign ones.
    fn local(&self, catalog: u64, index: Index) -> Option<Index> {
        (catalog == self.tag).then_some(index)
    }

    #[instrument(level = "trace", skip(self))]
    pub(crate) fn author_entry(&self, id: AuthorId) -> DomainResult<&Author> {
        self.local(id.catalog, id.index)
            .and_then(|index| self.authors.get(index))
            .ok_or(DomainError::UnknownAuthor(id))
    }

    #[instrument(level = "trace", skip(self))]
    pub(crate) fn magazine_entry(&self, id: MagazineId) -> DomainResult<&Magazine> {
        self.local(id.catalog, id.index)
            .and_then(|index| self.magazines.get(index))
            .ok_or(DomainError::UnknownMagazine(id))
    }

    #[instrument(level = "trace", skip(self))]
    pub(crate) fn article_entry(&self, id: ArticleId) -> DomainResult<&Article> {
        self.local(id.catalog, id.index)
            .and_then(|index| self.articles.get(index))
            .ok_or(DomainError::UnknownArticle(id))
    }

    fn author_entry_mut(&mut self, id: AuthorId) -> DomainResult<&mut Author> {
        let index = self.local(id.catalog, id.index);
        index
            .and_then(|index| self.authors.get_mut(index))
            .ok_or(DomainError::UnknownAuthor(id))
    }

    fn magazine_entry_mut(&mut self, id: MagazineId) -> DomainResult<&mut Magazine> {
        let index = self.local(id.catalog, id.index);
        index
            .and_then(|index| self.magazines.get_mut(index))
            .ok_or(DomainError::UnknownMagazine(id))
    }

    fn article_entry_mut(&mut self, id: ArticleId) -> DomainResult<&mut Article> {
        let index = self.local(id.catalog, id.index);
        index
            .and_then(|index| self.articles.get_mut(index))
            .ok_or(DomainError::UnknownArticle(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ValidationError;

    #[test]
    fn given_invalid_title_when_adding_article_then_nothing_is_registered() {
        let mut catalog = Catalog::new();
        let author = catalog.add_author("Jane Doe").unwrap();
        let magazine = catalog.add_magazine("Vogue", "Fashion").unwrap();

        let result = catalog.add_article(author, magazine, "Hi");

        assert_eq!(
            result,
            Err(DomainError::Validation(ValidationError::TitleLength {
                len: 2,
                min: 5,
                max: 50
            }))
        );
        assert_eq!(catalog.article_count(), 0);
        assert!(catalog.author_entry(author).unwrap().articles.is_empty());
        assert!(catalog.magazine_entry(magazine).unwrap().articles.is_empty());
        assert_eq!(catalog.articles().count(), 0);
    }

    #[test]
    fn given_unknown_magazine_when_adding_article_then_author_untouched() {
        let mut catalog = Catalog::new();
        let author = catalog.add_author("Jane Doe").unwrap();
        let magazine = catalog.add_magazine("Vogue", "Fashion").unwrap();
        catalog.clear();
        let author_again = catalog.add_author("Jane Doe").unwrap();

        let result = catalog.add_article(author_again, magazine, "A Day in the Life");

        assert_eq!(result, Err(DomainError::UnknownMagazine(magazine)));
        assert!(catalog.author(author_again).unwrap().articles().is_empty());
        assert_ne!(author, author_again);
    }

    #[test]
    fn given_cleared_catalog_when_using_old_handles_then_rejects() {
        let mut catalog = Catalog::new();
        let author = catalog.add_author("Jane Doe").unwrap();
        catalog.clear();
        let _fresh = catalog.add_author("John Roe").unwrap();

        assert_eq!(
            catalog.author(author).err(),
            Some(DomainError::UnknownAuthor(author))
        );
        assert_eq!(catalog.author_count(), 1);
    }

    #[test]
    fn given_same_author_when_reassigning_then_noop() {
        let mut catalog = Catalog::new();
        let author = catalog.add_author("Jane Doe").unwrap();
        let magazine = catalog.add_magazine("Vogue", "Fashion").unwrap();
        let article = catalog
            .add_article(author, magazine, "A Day in the Life")
            .unwrap();

        catalog.set_article_author(article, author).unwrap();
        catalog.attach_article(magazine, article).unwrap();

        assert_eq!(catalog.author(author).unwrap().articles(), &[article]);
        assert_eq!(catalog.magazine(magazine).unwrap().articles(), &[article]);
        catalog.check_consistency().unwrap();
    }

    #[test]
    fn given_handles_from_another_catalog_when_used_then_rejected() {
        let mut ours = Catalog::new();
        let mut theirs = Catalog::new();
        let jane = ours.add_author("Jane Doe").unwrap();
        let vogue = ours.add_magazine("Vogue", "Fashion").unwrap();
        let ghost = theirs.add_author("Ghost Writer").unwrap();
        let elle = theirs.add_magazine("Elle", "Fashion").unwrap();
        assert_eq!(jane.index, ghost.index);

        assert_eq!(
            ours.author(ghost).err(),
            Some(DomainError::UnknownAuthor(ghost))
        );
        assert_eq!(
            ours.add_article(jane, elle, "A Day in the Life"),
            Err(DomainError::UnknownMagazine(elle))
        );
        assert_eq!(ours.article_count(), 0);
        assert!(ours.author(jane).unwrap().articles().is_empty());
        assert!(ours.magazine(vogue).unwrap().articles().is_empty());
    }
}
