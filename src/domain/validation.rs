//! Input rules gating entity construction and mutation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::ValidationError;

/// Inclusive character-count bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }
}

/// Constraints applied by the catalog. Defaults match the published model:
/// magazine names of 2..=16 characters, titles of 5..=50 characters, and
/// contributing authors with more than 2 articles in a magazine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationRules {
    pub magazine_name: LengthRange,
    pub title: LengthRange,
    /// An author contributes to a magazine when their article count exceeds this
    pub contributor_threshold: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            magazine_name: LengthRange::new(2, 16),
            title: LengthRange::new(5, 50),
            contributor_threshold: 2,
        }
    }
}

/// Length in characters, not bytes.
fn char_len(value: &str) -> usize {
    value.chars().count()
}

impl ValidationRules {
    pub fn author_name(&self, name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            debug!("author_name: rejected empty name");
            return Err(ValidationError::EmptyAuthorName);
        }
        Ok(())
    }

    pub fn magazine_name(&self, name: &str) -> Result<(), ValidationError> {
        let len = char_len(name);
        if !self.magazine_name.contains(len) {
            debug!("magazine_name: rejected {:?} (len={})", name, len);
            return Err(ValidationError::MagazineNameLength {
                len,
                min: self.magazine_name.min,
                max: self.magazine_name.max,
            });
        }
        Ok(())
    }

    pub fn category(&self, category: &str) -> Result<(), ValidationError> {
        if category.is_empty() {
            debug!("category: rejected empty category");
            return Err(ValidationError::EmptyCategory);
        }
        Ok(())
    }

    pub fn title(&self, title: &str) -> Result<(), ValidationError> {
        let len = char_len(title);
        if !self.title.contains(len) {
            debug!("title: rejected {:?} (len={})", title, len);
            return Err(ValidationError::TitleLength {
                len,
                min: self.title.min,
                max: self.title.max,
            });
        }
        Ok(())
    }
}
