//! Staff bios.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{BioId, JobCategoryId, UserId};
use super::slug::Permalink;
use super::validation::{self, Validate, ValidationError, IMAGE_MAX, NAME_MAX};

/// A bio not yet written to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBio {
    /// Linked account in the identity system
    pub user: Option<UserId>,

    /// Display name; unique across bios when set
    pub name: Option<String>,

    pub job_title: String,
    pub job_category: Option<JobCategoryId>,
    pub image: Option<String>,

    /// Rich-text biography (opaque markup)
    pub text: String,

    /// Explicit slug; derived from the name when unset
    pub slug: Option<String>,

    /// Shown on the public staff page
    pub visible: bool,
}

impl NewBio {
    /// Start a bio for a role; name and other fields are optional
    pub fn new(job_title: impl Into<String>) -> Self {
        Self {
            user: None,
            name: None,
            job_title: job_title.into(),
            job_category: None,
            image: None,
            text: String::new(),
            slug: None,
            visible: true,
        }
    }

    /// Start a bio for a named staff member
    pub fn named(name: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self::new(job_title).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_user(mut self, user: UserId) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_category(mut self, category: JobCategoryId) -> Self {
        self.job_category = Some(category);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// A stored bio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bio {
    pub id: BioId,
    pub user: Option<UserId>,
    pub name: Option<String>,
    pub job_title: String,
    pub job_category: Option<JobCategoryId>,
    pub image: Option<String>,
    pub text: String,
    pub slug: Option<String>,
    pub visible: bool,
}

fn validate_fields(
    name: Option<&str>,
    job_title: &str,
    image: Option<&str>,
    slug: Option<&str>,
) -> Result<(), ValidationError> {
    validation::optional_max_len("name", name, NAME_MAX)?;
    validation::required_max_len("job_title", job_title, NAME_MAX)?;
    validation::optional_max_len("image", image, IMAGE_MAX)?;
    validation::slug(slug)
}

impl Validate for NewBio {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            self.name.as_deref(),
            &self.job_title,
            self.image.as_deref(),
            self.slug.as_deref(),
        )
    }
}

impl Validate for Bio {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            self.name.as_deref(),
            &self.job_title,
            self.image.as_deref(),
            self.slug.as_deref(),
        )
    }
}

impl Permalink for Bio {
    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

impl fmt::Display for Bio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "({})", self.job_title),
        }
    }
}
