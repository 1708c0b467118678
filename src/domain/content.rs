//! Editorial content pages ("About us", "Underwriting", ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::ContentId;
use super::slug::Permalink;
use super::validation::{self, Validate, ValidationError, IMAGE_MAX, TITLE_MAX};

/// A content page not yet written to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContent {
    pub title: String,

    /// Rich-text body (opaque markup)
    pub text: String,

    /// Reference to an externally stored image
    pub image: Option<String>,

    /// Explicit slug; derived from the title when unset
    pub slug: Option<String>,
}

impl NewContent {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            image: None,
            slug: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// A stored content page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub id: ContentId,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub slug: Option<String>,
}

fn validate_fields(
    title: &str,
    image: Option<&str>,
    slug: Option<&str>,
) -> Result<(), ValidationError> {
    validation::required_max_len("title", title, TITLE_MAX)?;
    validation::optional_max_len("image", image, IMAGE_MAX)?;
    validation::slug(slug)
}

impl Validate for NewContent {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.image.as_deref(), self.slug.as_deref())
    }
}

impl Validate for Content {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.image.as_deref(), self.slug.as_deref())
    }
}

impl Permalink for Content {
    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
