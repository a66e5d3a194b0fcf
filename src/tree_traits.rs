use termtree::Tree;
use tracing::instrument;

use crate::domain::{Catalog, MagazineView};

/// Render an entity graph as a printable tree.
pub trait CatalogTree {
    fn to_tree_string(&self) -> Tree<String>;
}

impl CatalogTree for MagazineView<'_> {
    /// `name [category]` with one leaf per article: `"title" by author`.
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self
            .articles()
            .iter()
            .filter_map(|&id| self.catalog().article(id).ok())
            .map(|article| {
                let author = article
                    .author()
                    .map(|a| a.name().to_string())
                    .unwrap_or_else(|_| article.author_id().to_string());
                Tree::new(format!("{:?} by {}", article.title(), author))
            })
            .collect();

        Tree::new(format!("{} [{}]", self.name(), self.category())).with_leaves(leaves)
    }
}

// Magazines in registry order, each with its articles
impl CatalogTree for Catalog {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        if self.magazine_count() == 0 {
            return Tree::new("Empty catalog".to_string());
        }
        let leaves: Vec<_> = self.magazines().map(|m| m.to_tree_string()).collect();
        Tree::new(format!(
            "catalog ({} authors, {} magazines, {} articles)",
            self.author_count(),
            self.magazine_count(),
            self.article_count()
        ))
        .with_leaves(leaves)
    }
}
