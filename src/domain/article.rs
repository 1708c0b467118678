//! Articles, as far as this store needs them.
//!
//! Articles belong to the editorial side of the site. The store only
//! tracks who wrote them so the author's name survives when a bio is
//! removed.

use serde::{Deserialize, Serialize};

use super::ids::{ArticleId, BioId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,

    /// Staff author, if the article was written by someone with a bio
    pub author: Option<BioId>,

    /// Byline recorded on the article itself
    pub author_name: Option<String>,
}

impl NewArticle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            author_name: None,
        }
    }

    pub fn by(mut self, author: BioId) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub author: Option<BioId>,
    pub author_name: Option<String>,
}

impl Article {
    /// No byline recorded yet (unset or blank)
    pub fn needs_author_name(&self) -> bool {
        self.author_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(author_name: Option<&str>) -> Article {
        Article {
            id: ArticleId(1),
            title: "Storm closes harbor".to_string(),
            author: Some(BioId(1)),
            author_name: author_name.map(str::to_string),
        }
    }

    #[test]
    fn test_needs_author_name() {
        assert!(article(None).needs_author_name());
        assert!(article(Some("")).needs_author_name());
        assert!(article(Some("  ")).needs_author_name());
        assert!(!article(Some("A. Smith")).needs_author_name());
    }
}
