//! Record types for the station website.
//!
//! This module contains the data structures and their field rules:
//! - Content, JobCategory, Bio, Announcement, Program: editorial records
//! - ScheduleSlot: radio/TV schedule entries with their broadcast Day
//! - Article: the slice of the editorial article the store needs
//! - Slug derivation and field validation shared by all of the above

pub mod announcement;
pub mod article;
pub mod bio;
pub mod content;
pub mod day;
pub mod ids;
pub mod job_category;
pub mod program;
pub mod schedule;
pub mod slug;
pub mod validation;

// Re-export commonly used types
pub use announcement::{Announcement, NewAnnouncement};
pub use article::{Article, NewArticle};
pub use bio::{Bio, NewBio};
pub use content::{Content, NewContent};
pub use day::{Day, DayError, DayGroup, Recurrence};
pub use ids::{
    AnnouncementId, ArticleId, BioId, ContentId, JobCategoryId, ProgramId, ScheduleSlotId, UserId,
};
pub use job_category::{JobCategory, NewJobCategory};
pub use program::{NewProgram, Program};
pub use schedule::{Medium, NewScheduleSlot, ScheduleSlot};
pub use slug::{collation_key, derive_slug, slugify, Permalink};
pub use validation::{Validate, ValidationError};
