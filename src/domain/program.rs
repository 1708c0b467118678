//! Programs (shows) carried on the station.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bio::Bio;
use super::ids::{BioId, ProgramId};
use super::slug::Permalink;
use super::validation::{self, Validate, ValidationError, LINK_MAX, NAME_MAX, TITLE_MAX};

/// A program not yet written to the store.
///
/// There is no slug field: the store always assigns it from the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProgram {
    /// Unique across programs
    pub title: String,

    /// Staff producer
    pub producer: Option<BioId>,

    /// Producer credit when the producer has no bio
    pub producer_name: Option<String>,

    /// Rich-text description (opaque markup)
    pub description: String,

    pub link: Option<String>,
}

impl NewProgram {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            producer: None,
            producer_name: None,
            description: description.into(),
            link: None,
        }
    }

    pub fn produced_by(mut self, producer: BioId) -> Self {
        self.producer = Some(producer);
        self
    }

    pub fn with_producer_name(mut self, name: impl Into<String>) -> Self {
        self.producer_name = Some(name.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// A stored program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub title: String,

    /// Assigned by the store; edits to this field are ignored
    pub slug: Option<String>,
    pub producer: Option<BioId>,
    pub producer_name: Option<String>,
    pub description: String,
    pub link: Option<String>,
}

impl Program {
    /// Name to credit as producer.
    ///
    /// `producer_bio` is the bio referenced by `producer`, when loaded.
    /// A named staff bio wins over the free-text `producer_name`.
    pub fn producer_credit<'a>(&'a self, producer_bio: Option<&'a Bio>) -> Option<&'a str> {
        producer_bio
            .filter(|bio| Some(bio.id) == self.producer)
            .and_then(|bio| bio.name.as_deref())
            .or(self.producer_name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

fn validate_fields(
    title: &str,
    producer_name: Option<&str>,
    link: Option<&str>,
) -> Result<(), ValidationError> {
    validation::required_max_len("title", title, TITLE_MAX)?;
    validation::optional_max_len("producer_name", producer_name, NAME_MAX)?;
    validation::optional_max_len("link", link, LINK_MAX)
}

impl Validate for NewProgram {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.title,
            self.producer_name.as_deref(),
            self.link.as_deref(),
        )
    }
}

impl Validate for Program {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.title,
            self.producer_name.as_deref(),
            self.link.as_deref(),
        )
    }
}

impl Permalink for Program {
    fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
