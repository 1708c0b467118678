//! Station announcements shown on the front page.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::AnnouncementId;
use super::validation::{self, Validate, ValidationError, IMAGE_MAX, TITLE_MAX};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub text: String,

    /// Publication date (optional)
    pub pub_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub active: bool,
}

impl NewAnnouncement {
    pub fn new(title: impl Into<String>, text: impl Into<String>, active: bool) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            pub_date: None,
            image: None,
            active,
        }
    }

    pub fn published_at(mut self, pub_date: DateTime<Utc>) -> Self {
        self.pub_date = Some(pub_date);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub text: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub active: bool,
}

fn validate_fields(title: &str, image: Option<&str>) -> Result<(), ValidationError> {
    validation::required_max_len("title", title, TITLE_MAX)?;
    validation::optional_max_len("image", image, IMAGE_MAX)
}

impl Validate for NewAnnouncement {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.image.as_deref())
    }
}

impl Validate for Announcement {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, self.image.as_deref())
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
