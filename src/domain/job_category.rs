//! Staff job categories used to group bios on the staff page.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::JobCategoryId;
use super::validation::{self, Validate, ValidationError, NAME_MAX};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJobCategory {
    pub name: String,

    /// Sort priority, lower first; unset sorts last
    pub priority: Option<i32>,
}

impl NewJobCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCategory {
    pub id: JobCategoryId,
    pub name: String,
    pub priority: Option<i32>,
}

impl Validate for NewJobCategory {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::required_max_len("name", &self.name, NAME_MAX)
    }
}

impl Validate for JobCategory {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::required_max_len("name", &self.name, NAME_MAX)
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
